//! The surface aggregate: mesh, field and the derived view geometry.

use std::path::Path;

use tracing::{debug, info, warn};
use trisurf_geom::{project_points, PlaneEquation, ViewBasis, ViewTransform};
use trisurf_io::IoError;
use trisurf_math::{Point2, Point3, Tolerance, Vec3};

use crate::config::{SurfaceOptions, ViewSpec};
use crate::error::{Result, SurfaceError};
use crate::field::{FieldRank, FieldTable};
use crate::mesh::Mesh;

/// A planar sampled surface expressed in a view basis.
///
/// All derived data (plane, basis, transforms, view coordinates) is
/// computed once during construction. A different view is obtained with
/// [`Surface::with_view`], which returns a new surface.
///
/// When built with `retain_mesh = false` the mesh is dropped after the
/// plane is fitted: [`Surface::mesh`] and [`Surface::view_coordinates`]
/// return `None`, while the plane and transforms stay available.
#[derive(Debug, Clone)]
pub struct Surface {
    field: FieldTable,
    mesh: Option<Mesh>,
    plane: PlaneEquation,
    anchor: Point3,
    basis: ViewBasis,
    transform: ViewTransform,
    view_coordinates: Option<Vec<Point2>>,
}

impl Surface {
    /// Build a surface from in-memory data.
    ///
    /// `field` must hold one sample per point. `faces` is ignored when the
    /// mesh is not retained.
    pub fn from_arrays(
        field: FieldTable,
        points: Vec<Point3>,
        faces: Vec<[usize; 3]>,
        view: &ViewSpec,
        options: SurfaceOptions,
    ) -> Result<Self> {
        check_lengths(&field, points.len())?;
        let faces = options.retain_mesh.then_some(faces);
        Self::assemble(field, points, faces, view)
    }

    /// Build a surface from the foamFile output of the OpenFOAM `sample`
    /// utility: a field file, a points file and a faces file.
    ///
    /// The faces file is only read when the mesh is retained.
    pub fn from_foam_files(
        vars_file: impl AsRef<Path>,
        points_file: impl AsRef<Path>,
        faces_file: impl AsRef<Path>,
        view: &ViewSpec,
        options: SurfaceOptions,
    ) -> Result<Self> {
        let field = FieldTable::from_table(&trisurf_io::read_field(vars_file)?)?;
        let points = trisurf_io::read_points(points_file)?;
        check_lengths(&field, points.len())?;
        let faces = if options.retain_mesh {
            Some(trisurf_io::read_faces(faces_file)?)
        } else {
            None
        };
        Self::assemble(field, points, faces, view)
    }

    /// Build a surface from a VTK file. Not supported.
    pub fn from_vtk(
        vtk_file: impl AsRef<Path>,
        view: &ViewSpec,
        options: SurfaceOptions,
    ) -> Result<Self> {
        debug!(?view, ?options, "VTK surface requested");
        match trisurf_io::read_vtk(vtk_file) {
            Err(IoError::UnsupportedFormat(msg)) => Err(SurfaceError::UnsupportedFormat(msg)),
            Err(e) => Err(e.into()),
            Ok(_) => Err(SurfaceError::UnsupportedFormat("VTK".into())),
        }
    }

    /// `faces` is `Some` exactly when the mesh is to be retained.
    fn assemble(
        field: FieldTable,
        points: Vec<Point3>,
        faces: Option<Vec<[usize; 3]>>,
        view: &ViewSpec,
    ) -> Result<Self> {
        let plane = PlaneEquation::fit(&points)?;
        let mesh = faces.map(|faces| Mesh::new(points, faces)).transpose()?;
        let (transform, basis, view_coordinates) = orient(&plane, mesh.as_ref(), view)?;

        info!(
            samples = field.len(),
            rank = ?field.rank(),
            faces = mesh.as_ref().map_or(0, Mesh::face_count),
            retained = mesh.is_some(),
            "surface constructed"
        );

        Ok(Self {
            field,
            mesh,
            plane,
            anchor: view.anchor,
            basis,
            transform,
            view_coordinates,
        })
    }

    /// A copy of this surface seen through a different view.
    ///
    /// The plane and field are reused; basis, transforms and view
    /// coordinates are recomputed.
    pub fn with_view(&self, view: &ViewSpec) -> Result<Self> {
        let (transform, basis, view_coordinates) = orient(&self.plane, self.mesh.as_ref(), view)?;
        Ok(Self {
            field: self.field.clone(),
            mesh: self.mesh.clone(),
            plane: self.plane,
            anchor: view.anchor,
            basis,
            transform,
            view_coordinates,
        })
    }

    /// Number of field samples (equal to the number of points).
    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// True if the surface has no samples. Never true for a constructed
    /// surface; provided for symmetry with [`Surface::len`].
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Field samples, in point order.
    pub fn field(&self) -> &FieldTable {
        &self.field
    }

    /// Scalar or vector field.
    pub fn field_rank(&self) -> FieldRank {
        self.field.rank()
    }

    /// The retained mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Points in the standard basis, if the mesh is retained.
    pub fn points(&self) -> Option<&[Point3]> {
        self.mesh.as_ref().map(Mesh::points)
    }

    /// Triangles, if the mesh is retained.
    pub fn faces(&self) -> Option<&[[usize; 3]]> {
        self.mesh.as_ref().map(Mesh::faces)
    }

    /// Plane through the surface.
    pub fn plane(&self) -> &PlaneEquation {
        &self.plane
    }

    /// View anchor in the standard basis.
    pub fn anchor(&self) -> &Point3 {
        &self.anchor
    }

    /// View basis in the standard basis.
    pub fn basis(&self) -> &ViewBasis {
        &self.basis
    }

    /// Standard-to-view and view-to-standard transforms.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// 2D view coordinates, one per point, if the mesh is retained.
    pub fn view_coordinates(&self) -> Option<&[Point2]> {
        self.view_coordinates.as_deref()
    }

    /// Vector samples expressed in the view basis. `None` for scalar
    /// fields.
    pub fn field_in_view(&self) -> Option<Vec<Vec3>> {
        self.field.vectors().map(|vs| {
            vs.iter()
                .map(|v| self.transform.vector_to_view(v))
                .collect()
        })
    }

    /// Express a standard-basis point in the view basis.
    pub fn to_view(&self, p: &Point3) -> Point3 {
        self.transform.to_view(p)
    }

    /// Express a view-basis point in the standard basis.
    pub fn to_standard(&self, p: &Point3) -> Point3 {
        self.transform.to_standard(p)
    }
}

fn check_lengths(field: &FieldTable, points: usize) -> Result<()> {
    if field.len() != points {
        return Err(SurfaceError::DimensionMismatch {
            fields: field.len(),
            points,
        });
    }
    Ok(())
}

/// Transforms, basis and (with a mesh) view coordinates for `view`.
fn orient(
    plane: &PlaneEquation,
    mesh: Option<&Mesh>,
    view: &ViewSpec,
) -> Result<(ViewTransform, ViewBasis, Option<Vec<Point2>>)> {
    let (transform, basis) = ViewTransform::build(&view.anchor, &view.x_dir, &view.y_dir)?;
    warn_if_off_plane(plane, &basis, &view.anchor);
    let view_coordinates = mesh.map(|m| project_points(m.points(), &transform.forward));
    Ok((transform, basis, view_coordinates))
}

fn warn_if_off_plane(plane: &PlaneEquation, basis: &ViewBasis, anchor: &Point3) {
    let tol = Tolerance::SAMPLED;
    if !basis.is_in_plane(plane, &tol) {
        warn!(
            x = ?basis.x().as_slice(),
            y = ?basis.y().as_slice(),
            "view directions are not in the surface plane"
        );
    }
    if !plane.contains(anchor, &tol) {
        warn!(
            distance = plane.distance(anchor),
            "view anchor is not on the surface plane"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    fn build(view: &ViewSpec, options: SurfaceOptions) -> Result<Surface> {
        Surface::from_arrays(
            FieldTable::scalar(vec![10.0, 20.0, 30.0]),
            triangle(),
            vec![[0, 1, 2]],
            view,
            options,
        )
    }

    fn assert_xy(actual: &[Point2], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert_relative_eq!(a.x, x, epsilon = 1e-12);
            assert_relative_eq!(a.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_standard_view() {
        let s = build(&ViewSpec::standard(), SurfaceOptions::default()).unwrap();
        assert_relative_eq!(s.plane().normal(), Vec3::z());
        assert_relative_eq!(s.plane().d(), 0.0);
        assert_xy(
            s.view_coordinates().unwrap(),
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
        );
        assert_eq!(s.field_rank(), FieldRank::Scalar);
        assert_eq!(s.len(), 3);
        assert_eq!(s.faces(), Some(&[[0, 1, 2]][..]));
    }

    #[test]
    fn test_anchor_shift() {
        let view = ViewSpec::new(Point3::new(1.0, 0.0, 0.0), Vec3::x(), Vec3::y());
        let s = build(&view, SurfaceOptions::default()).unwrap();
        assert_xy(
            s.view_coordinates().unwrap(),
            &[(-1.0, 0.0), (0.0, 0.0), (-1.0, 1.0)],
        );
    }

    #[test]
    fn test_mesh_not_retained() {
        let s = build(&ViewSpec::standard(), SurfaceOptions { retain_mesh: false }).unwrap();
        assert!(s.mesh().is_none());
        assert!(s.points().is_none());
        assert!(s.view_coordinates().is_none());
        // Transform is still usable.
        let v = s.to_view(&Point3::new(2.0, 3.0, 0.0));
        assert_relative_eq!(v, Point3::new(2.0, 3.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(s.plane().normal(), Vec3::z());
    }

    #[test]
    fn test_dimension_mismatch() {
        for retain_mesh in [true, false] {
            let err = Surface::from_arrays(
                FieldTable::scalar(vec![1.0, 2.0]),
                triangle(),
                vec![[0, 1, 2]],
                &ViewSpec::standard(),
                SurfaceOptions { retain_mesh },
            )
            .unwrap_err();
            assert!(matches!(
                err,
                SurfaceError::DimensionMismatch {
                    fields: 2,
                    points: 3
                }
            ));
        }
    }

    #[test]
    fn test_degenerate_plane() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let err = Surface::from_arrays(
            FieldTable::scalar(vec![0.0; 3]),
            points,
            vec![[0, 1, 2]],
            &ViewSpec::standard(),
            SurfaceOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Geom(trisurf_geom::GeomError::DegeneratePlane)
        ));
    }

    #[test]
    fn test_singular_basis() {
        let view = ViewSpec::new(Point3::origin(), Vec3::x(), Vec3::new(2.0, 0.0, 0.0));
        let err = build(&view, SurfaceOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Geom(trisurf_geom::GeomError::SingularBasis(_))
        ));
    }

    #[test]
    fn test_too_few_points_without_mesh() {
        let err = Surface::from_arrays(
            FieldTable::scalar(vec![0.0; 2]),
            triangle()[..2].to_vec(),
            vec![],
            &ViewSpec::standard(),
            SurfaceOptions { retain_mesh: false },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Geom(trisurf_geom::GeomError::TooFewPoints(2))
        ));
    }

    #[test]
    fn test_with_view() {
        let s = build(&ViewSpec::standard(), SurfaceOptions::default()).unwrap();
        let moved = s
            .with_view(&ViewSpec::new(
                Point3::new(0.0, 1.0, 0.0),
                Vec3::y(),
                Vec3::new(-1.0, 0.0, 0.0),
            ))
            .unwrap();
        assert_xy(
            moved.view_coordinates().unwrap(),
            &[(-1.0, 0.0), (-1.0, -1.0), (0.0, 0.0)],
        );
        // Original untouched.
        assert_xy(
            s.view_coordinates().unwrap(),
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
        );
        assert_eq!(moved.plane(), s.plane());
    }

    #[test]
    fn test_with_view_matches_fresh_construction() {
        let view = ViewSpec::new(
            Point3::new(0.5, 0.5, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        );
        let fresh = build(&view, SurfaceOptions::default()).unwrap();
        let moved = build(&ViewSpec::standard(), SurfaceOptions::default())
            .unwrap()
            .with_view(&view)
            .unwrap();
        assert_eq!(moved.transform(), fresh.transform());
        assert_eq!(moved.basis(), fresh.basis());
        assert_eq!(moved.anchor(), fresh.anchor());
        assert_eq!(moved.view_coordinates(), fresh.view_coordinates());
    }

    #[test]
    fn test_with_view_without_mesh() {
        let s = build(&ViewSpec::standard(), SurfaceOptions { retain_mesh: false }).unwrap();
        let moved = s
            .with_view(&ViewSpec::new(Point3::origin(), Vec3::y(), Vec3::x()))
            .unwrap();
        assert!(moved.view_coordinates().is_none());
        assert_relative_eq!(
            moved.to_view(&Point3::new(2.0, 3.0, 0.0)),
            Point3::new(3.0, 2.0, 0.0),
            epsilon = 1e-12
        );
        let err = s
            .with_view(&ViewSpec::new(Point3::origin(), Vec3::x(), Vec3::x()))
            .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Geom(trisurf_geom::GeomError::SingularBasis(_))
        ));
    }

    #[test]
    fn test_non_finite_points_rejected() {
        let mut points = triangle();
        points[1].x = f64::INFINITY;
        let err = Surface::from_arrays(
            FieldTable::scalar(vec![0.0; 3]),
            points,
            vec![[0, 1, 2]],
            &ViewSpec::standard(),
            SurfaceOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Geom(trisurf_geom::GeomError::DegeneratePlane)
        ));
    }

    #[test]
    fn test_vector_field_in_view() {
        let field = FieldTable::vector(&[Vec3::x(), Vec3::y(), Vec3::new(1.0, 1.0, 0.0)]);
        let view = ViewSpec::new(Point3::new(5.0, 5.0, 0.0), Vec3::y(), Vec3::new(-1.0, 0.0, 0.0));
        let s = Surface::from_arrays(
            field,
            triangle(),
            vec![[0, 1, 2]],
            &view,
            SurfaceOptions::default(),
        )
        .unwrap();
        assert_eq!(s.field_rank(), FieldRank::Vector);
        let vs = s.field_in_view().unwrap();
        assert_relative_eq!(vs[0], Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(vs[1], Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(vs[2], Vec3::new(1.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_scalar_field_has_no_view_vectors() {
        let s = build(&ViewSpec::standard(), SurfaceOptions::default()).unwrap();
        assert!(s.field_in_view().is_none());
    }

    #[test]
    fn test_round_trip_through_surface() {
        let view = ViewSpec::new(
            Point3::new(0.3, 0.2, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        );
        let s = build(&view, SurfaceOptions::default()).unwrap();
        for p in triangle() {
            let back = s.to_standard(&s.to_view(&p));
            assert_relative_eq!(back, p, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_vtk_unsupported() {
        let err = Surface::from_vtk("plane.vtk", &ViewSpec::standard(), SurfaceOptions::default())
            .unwrap_err();
        assert!(matches!(err, SurfaceError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_surface_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Surface>();
    }
}
