//! View description and construction options.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trisurf_io::IoError;
use trisurf_math::{Point3, Vec3};

use crate::error::{Result, SurfaceError};

/// Where the flat view is anchored and how it is oriented.
///
/// `x_dir` and `y_dir` should lie in the surface plane. They are used as
/// given, so their lengths set the units of the view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    /// Point of the plane that becomes `(0, 0)` in the view.
    pub anchor: Point3,
    /// Horizontal view direction, in the standard basis.
    pub x_dir: Vec3,
    /// Vertical view direction, in the standard basis.
    pub y_dir: Vec3,
}

impl ViewSpec {
    /// Create a view specification.
    pub fn new(anchor: Point3, x_dir: Vec3, y_dir: Vec3) -> Self {
        Self {
            anchor,
            x_dir,
            y_dir,
        }
    }

    /// The standard XY view at the origin.
    pub fn standard() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y())
    }
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self::standard()
    }
}

/// Options controlling surface construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Keep points and faces in the surface. When false the points are
    /// only used to fit the plane and are then dropped, and the surface
    /// has no view coordinates.
    pub retain_mesh: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { retain_mesh: true }
    }
}

/// Serialized form of a [`ViewSpec`]. Missing keys take the standard
/// XY view values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// View anchor `[x, y, z]`.
    pub anchor: [f64; 3],
    /// Horizontal view direction `[x, y, z]`.
    pub x_dir: [f64; 3],
    /// Vertical view direction `[x, y, z]`.
    pub y_dir: [f64; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            anchor: [0.0; 3],
            x_dir: [1.0, 0.0, 0.0],
            y_dir: [0.0, 1.0, 0.0],
        }
    }
}

impl From<&ViewConfig> for ViewSpec {
    fn from(c: &ViewConfig) -> Self {
        ViewSpec::new(
            Point3::from(c.anchor),
            Vec3::from(c.x_dir),
            Vec3::from(c.y_dir),
        )
    }
}

/// A TOML surface configuration.
///
/// ```toml
/// retain_mesh = true
///
/// [view]
/// anchor = [0.0, 0.0, 0.0]
/// x_dir = [1.0, 0.0, 0.0]
/// y_dir = [0.0, 1.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// See [`SurfaceOptions::retain_mesh`].
    pub retain_mesh: bool,
    /// The view.
    pub view: ViewConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            retain_mesh: SurfaceOptions::default().retain_mesh,
            view: ViewConfig::default(),
        }
    }
}

impl SurfaceConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SurfaceError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(IoError::from)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| SurfaceError::Config(e.to_string()))
    }

    /// Construction options.
    pub fn options(&self) -> SurfaceOptions {
        SurfaceOptions {
            retain_mesh: self.retain_mesh,
        }
    }

    /// The view described by this configuration.
    pub fn view_spec(&self) -> ViewSpec {
        ViewSpec::from(&self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cfg = SurfaceConfig::from_toml_str(
            r#"
            retain_mesh = false

            [view]
            anchor = [1.0, 2.0, 3.0]
            x_dir = [0.0, 1.0, 0.0]
            y_dir = [0.0, 0.0, 1.0]
            "#,
        )
        .unwrap();
        assert!(!cfg.options().retain_mesh);
        let view = cfg.view_spec();
        assert_eq!(view.anchor, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(view.x_dir, Vec3::y());
        assert_eq!(view.y_dir, Vec3::z());
    }

    #[test]
    fn test_defaults() {
        let cfg = SurfaceConfig::from_toml_str("").unwrap();
        assert!(cfg.options().retain_mesh);
        assert_eq!(cfg.view_spec(), ViewSpec::standard());
    }

    #[test]
    fn test_invalid_toml() {
        let err = SurfaceConfig::from_toml_str("[view]\nanchor = [1.0, 2.0]\n").unwrap_err();
        assert!(matches!(err, SurfaceError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = SurfaceConfig {
            retain_mesh: false,
            view: ViewConfig {
                anchor: [0.5, 0.0, 0.0],
                ..ViewConfig::default()
            },
        };
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(SurfaceConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file() {
        let err = SurfaceConfig::load("/nonexistent/trisurf.toml").unwrap_err();
        assert!(matches!(err, SurfaceError::Io(IoError::Io(_))));
    }
}
