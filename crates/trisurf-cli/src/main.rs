//! trisurf CLI - flatten sampled OpenFOAM cutting planes
//!
//! Reads the foamFile output of the `sample` utility and prints the plane,
//! the view transform or the 2D view coordinates of every point.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trisurf::{FieldRank, Surface, SurfaceConfig, SurfaceOptions, ViewSpec};

#[derive(Parser)]
#[command(name = "trisurf")]
#[command(author, version, about = "Flatten sampled cutting planes into 2D view coordinates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fitted plane and the view transform of a surface
    Info {
        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Write the 2D view coordinates and field values of every point
    Project {
        #[command(flatten)]
        surface: SurfaceArgs,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SurfaceArgs {
    /// Field file (scalar or vector samples)
    #[arg(long)]
    vars: PathBuf,
    /// Points file
    #[arg(long)]
    points: PathBuf,
    /// Faces file
    #[arg(long)]
    faces: PathBuf,
    /// TOML file with the view and options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// View anchor as x,y,z (overrides the config file)
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    anchor: Option<[f64; 3]>,
    /// Horizontal view direction as x,y,z (overrides the config file)
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    x_dir: Option<[f64; 3]>,
    /// Vertical view direction as x,y,z (overrides the config file)
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    y_dir: Option<[f64; 3]>,
    /// Do not keep the mesh (no view coordinates)
    #[arg(long)]
    no_mesh: bool,
}

impl SurfaceArgs {
    /// Config file first, then command-line overrides.
    fn resolve(&self) -> Result<SurfaceConfig> {
        let mut cfg = match &self.config {
            Some(path) => SurfaceConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => SurfaceConfig::default(),
        };
        if let Some(anchor) = self.anchor {
            cfg.view.anchor = anchor;
        }
        if let Some(x) = self.x_dir {
            cfg.view.x_dir = x;
        }
        if let Some(y) = self.y_dir {
            cfg.view.y_dir = y;
        }
        if self.no_mesh {
            cfg.retain_mesh = false;
        }
        Ok(cfg)
    }

    fn load(&self) -> Result<Surface> {
        let cfg = self.resolve()?;
        let view: ViewSpec = cfg.view_spec();
        let options: SurfaceOptions = cfg.options();
        Surface::from_foam_files(&self.vars, &self.points, &self.faces, &view, options)
            .with_context(|| format!("Failed to load surface from {:?}", self.points))
    }
}

fn parse_triple(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let num = |v: &str| v.parse::<f64>().map_err(|e| format!("'{v}': {e}"));
    Ok([num(x)?, num(y)?, num(z)?])
}

#[derive(Serialize)]
struct SurfaceInfo {
    samples: usize,
    rank: &'static str,
    faces: Option<usize>,
    plane: [f64; 4],
    anchor: [f64; 3],
    basis: [[f64; 3]; 3],
    transform: [[f64; 4]; 4],
    inverse_transform: [[f64; 4]; 4],
}

#[derive(Serialize)]
struct Projection {
    rank: &'static str,
    x: Vec<f64>,
    y: Vec<f64>,
    faces: Vec<[usize; 3]>,
    values: Vec<Vec<f64>>,
}

fn rank_name(rank: FieldRank) -> &'static str {
    match rank {
        FieldRank::Scalar => "scalar",
        FieldRank::Vector => "vector",
    }
}

fn rows4(m: &trisurf::Transform) -> [[f64; 4]; 4] {
    std::array::from_fn(|i| std::array::from_fn(|j| m.matrix[(i, j)]))
}

fn show_info(args: &SurfaceArgs, format: OutputFormat) -> Result<()> {
    let surface = args.load()?;
    let basis = surface.basis();
    let cols = [basis.x(), basis.y(), basis.z()];
    let info = SurfaceInfo {
        samples: surface.len(),
        rank: rank_name(surface.field_rank()),
        faces: surface.faces().map(<[_]>::len),
        plane: surface.plane().as_array(),
        anchor: surface.anchor().coords.into(),
        basis: cols.map(|c| c.into()),
        transform: rows4(&surface.transform().forward),
        inverse_transform: rows4(&surface.transform().inverse),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => {
            println!("Samples: {} ({})", info.samples, info.rank);
            match info.faces {
                Some(n) => println!("Faces:   {}", n),
                None => println!("Faces:   (mesh not retained)"),
            }
            let [a, b, c, d] = info.plane;
            println!("Plane:   {a}x + {b}y + {c}z + {d} = 0");
            println!("Anchor:  {:?}", info.anchor);
            for (name, v) in ["x", "y", "z"].iter().zip(info.basis) {
                println!("View {}:  {:?}", name, v);
            }
            println!("Transform (standard -> view):");
            for row in info.transform {
                println!("  {:?}", row);
            }
        }
    }
    Ok(())
}

fn project(args: &SurfaceArgs, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let surface = args.load()?;
    let Some(xy) = surface.view_coordinates() else {
        anyhow::bail!("view coordinates need the mesh; drop --no-mesh");
    };
    let field = surface.field();
    let projection = Projection {
        rank: rank_name(field.rank()),
        x: xy.iter().map(|p| p.x).collect(),
        y: xy.iter().map(|p| p.y).collect(),
        faces: surface.faces().unwrap_or_default().to_vec(),
        values: (0..field.len())
            .filter_map(|i| field.sample(i).map(<[f64]>::to_vec))
            .collect(),
    };

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&projection)?,
        OutputFormat::Text => {
            let mut out = String::new();
            for ((x, y), v) in projection
                .x
                .iter()
                .zip(&projection.y)
                .zip(&projection.values)
            {
                let values: Vec<String> = v.iter().map(f64::to_string).collect();
                out.push_str(&format!("{} {} {}\n", x, y, values.join(" ")));
            }
            out
        }
    };

    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            info!("wrote {} points to {:?}", xy.len(), path);
            println!("Wrote {} points to {}", xy.len(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "trisurf=info,trisurf_io=info,trisurf_geom=info",
            2 => "trisurf=debug,trisurf_io=debug,trisurf_geom=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Info { surface } => show_info(surface, cli.format)?,
        Commands::Project { surface, output } => project(surface, output.as_deref(), cli.format)?,
    }

    Ok(())
}
