//! Point query CLI.
//!
//! Resolves a geographic coordinate against a grid geometry and prints the
//! `(x, y, index, value)` tuple, optionally reading the value from a Zarr
//! array on disk. Without `--data` only the index resolution is printed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use zarrs_filesystem::FilesystemStore;

use array_store::{ArrayReader, ZarrArrayStore};
use grid_geometry::{GaussianGrid, GaussianGridType, GridSpec, RegularGrid, WrapPolicy};
use point_query::{gaussian_type_from_remark, QueryPipeline};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GridKind {
    /// Evenly spaced latitude/longitude grid
    Regular,
    /// Reduced Gaussian grid from the named catalog
    Gaussian,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WrapArg {
    None,
    Longitude,
    Both,
}

impl From<WrapArg> for WrapPolicy {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::None => WrapPolicy::None,
            WrapArg::Longitude => WrapPolicy::Longitude,
            WrapArg::Both => WrapPolicy::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "query-cli")]
#[command(about = "Resolve lat/lon coordinates to grid indices and stored values")]
struct Args {
    /// Grid family
    #[arg(long, value_enum)]
    grid: GridKind,

    /// Latitude to query
    #[arg(long)]
    lat: f64,

    /// Longitude to query
    #[arg(long)]
    lon: f64,

    /// Regular grid: number of points in X (longitude)
    #[arg(long)]
    nx: Option<u32>,

    /// Regular grid: number of points in Y (latitude)
    #[arg(long)]
    ny: Option<u32>,

    /// Regular grid: first grid point latitude
    #[arg(long)]
    lat_min: Option<f64>,

    /// Regular grid: first grid point longitude
    #[arg(long)]
    lon_min: Option<f64>,

    /// Regular grid: spacing in longitude (degrees)
    #[arg(long)]
    dx: Option<f64>,

    /// Regular grid: spacing in latitude (degrees)
    #[arg(long)]
    dy: Option<f64>,

    /// Regular grid: wrap policy for out-of-range coordinates
    #[arg(long, value_enum, default_value = "none")]
    wrap: WrapArg,

    /// Gaussian grid: catalog type (e.g. o1280, o320). Falls back to the
    /// grid type named in the array's CRS remark when omitted.
    #[arg(long)]
    gaussian_type: Option<String>,

    /// Zarr array to read the value from
    #[arg(long, env = "GRID_DATA_PATH")]
    data: Option<PathBuf>,

    /// Indices for leading (time/level) axes, comma-separated
    #[arg(long, value_delimiter = ',')]
    leading: Vec<u64>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let store: Option<Arc<dyn ArrayReader>> = match &args.data {
        Some(path) => {
            let fs = FilesystemStore::new(path)
                .with_context(|| format!("opening store at {}", path.display()))?;
            let reader = ZarrArrayStore::open(fs, "/")
                .with_context(|| format!("opening Zarr array at {}", path.display()))?;
            info!(path = %path.display(), dimensions = ?reader.metadata().dimensions(), "opened array");
            Some(Arc::new(reader))
        }
        None => None,
    };

    let spec = build_spec(&args, store.as_deref())?;
    print_grid(&spec);

    match store {
        Some(store) => {
            let units = store.attributes().units.clone();
            let pipeline = QueryPipeline::open(spec, store)
                .context("grid geometry does not match the stored array")?;
            match pipeline.query_value(args.lat, args.lon, &args.leading).await {
                Ok(sample) => {
                    print_point(args.lat, args.lon, sample.point);
                    match sample.value {
                        Some(value) => match units {
                            Some(units) => println!("Value: {value} {units}"),
                            None => println!("Value: {value}"),
                        },
                        None => println!("Value: missing"),
                    }
                }
                Err(err) if err.is_out_of_bounds() => {
                    println!("Value: no data at this point (outside grid coverage)");
                }
                Err(err) => return Err(err.into()),
            }
        }
        None => match spec.resolve(args.lat, args.lon) {
            Ok(point) => print_point(args.lat, args.lon, point),
            Err(err) if err.is_out_of_bounds() => {
                println!("Value: no data at this point (outside grid coverage)");
            }
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}

/// Build the grid geometry from flags, falling back to the array's CRS
/// remark for the Gaussian grid type.
fn build_spec(args: &Args, store: Option<&dyn ArrayReader>) -> Result<GridSpec> {
    match args.grid {
        GridKind::Regular => {
            let nx = args.nx.context("--nx is required for --grid regular")?;
            let ny = args.ny.context("--ny is required for --grid regular")?;
            let lat_min = args
                .lat_min
                .context("--lat-min is required for --grid regular")?;
            let lon_min = args
                .lon_min
                .context("--lon-min is required for --grid regular")?;
            let dx = args.dx.context("--dx is required for --grid regular")?;
            let dy = args.dy.context("--dy is required for --grid regular")?;
            let grid = RegularGrid::new(nx, ny, lat_min, lon_min, dx, dy, args.wrap.into())?;
            Ok(grid.into())
        }
        GridKind::Gaussian => {
            let grid_type = match &args.gaussian_type {
                Some(name) => GaussianGridType::parse(name)?,
                None => store
                    .and_then(|s| s.attributes().crs_remark.as_deref())
                    .and_then(gaussian_type_from_remark)
                    .context(
                        "--gaussian-type is required (no grid type hint found in the array)",
                    )?,
            };
            info!(%grid_type, "using Gaussian grid from catalog");
            Ok(GaussianGrid::new(grid_type).into())
        }
    }
}

fn print_grid(spec: &GridSpec) {
    match spec {
        GridSpec::Regular(grid) => println!(
            "Grid: regular nx={} ny={} latMin={} latMax={} lonMin={} lonMax={}",
            grid.nx(),
            grid.ny(),
            grid.lat_min(),
            grid.lat_max(),
            grid.lon_min(),
            grid.lon_max()
        ),
        GridSpec::Gaussian(grid) => println!(
            "Grid: gaussian type={} rows={} points={}",
            grid.grid_type()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "custom".to_string()),
            grid.rows().num_rows(),
            grid.total_points()
        ),
    }
}

fn print_point(lat: f64, lon: f64, point: grid_geometry::GridPoint) {
    println!(
        "Point: lat={lat} lon={lon} -> x={} y={} index={}",
        point.x, point.y, point.index
    );
}
