use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use cubemarch::{
    field::Field,
    mesh::{Mesh, Provenance, Settings, ThreadPool, VertexPlacement},
};

/// Extracts an isosurface from a built-in scalar field
#[derive(Parser)]
#[clap(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Name of the mesh file to write
    out: PathBuf,

    /// Scalar field to sample
    #[clap(value_parser = parse_field)]
    field: Field,

    /// Threshold between inside and outside
    isovalue: f32,

    /// Lower bound of the sampled volume (on every axis)
    volume_min: f32,

    /// Upper bound of the sampled volume (on every axis)
    volume_max: f32,

    /// Side length of each cube
    stepsize: f32,

    /// Place vertices by linear interpolation instead of at edge midpoints
    #[clap(long)]
    interpolate: bool,

    /// Number of threads to use
    ///
    /// With no value, the global thread pool is used
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    /// Output file format
    #[clap(short, long, value_enum, default_value_t = Format::Ply)]
    format: Format,
}

#[derive(ValueEnum, Copy, Clone)]
enum Format {
    /// ASCII PLY with per-vertex normals
    Ply,
    /// Binary STL
    Stl,
}

fn parse_field(s: &str) -> Result<Field, String> {
    Field::from_name(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();
    let args = Args::parse();

    let pool = match args.threads {
        Some(n) if n.get() == 1 => None,
        Some(n) => Some(ThreadPool::Custom(
            rayon::ThreadPoolBuilder::new()
                .num_threads(n.get())
                .build()?,
        )),
        None => Some(ThreadPool::Global),
    };

    let settings = Settings {
        isovalue: args.isovalue,
        volume_min: args.volume_min,
        volume_max: args.volume_max,
        stepsize: args.stepsize,
        placement: if args.interpolate {
            VertexPlacement::Interpolated
        } else {
            VertexPlacement::Midpoint
        },
        threads: pool.as_ref(),
    };

    let start = Instant::now();
    let mesh = Mesh::build(&args.field, &settings)?;
    info!(
        "Built mesh with {} triangles in {:?}",
        mesh.triangle_count(),
        start.elapsed()
    );

    let start = Instant::now();
    match args.format {
        Format::Ply => {
            let comment =
                Provenance::new(args.field.to_string(), &settings).to_string();
            mesh.save_ply(&args.out, Some(comment.as_str()))?;
        }
        Format::Stl => mesh.save_stl(&args.out)?,
    }
    info!("Wrote {:?} in {:?}", args.out, start.elapsed());
    Ok(())
}
