//! H3 geo point clustering tool
//!
//! Reads geographic points from a CSV file, bins them into H3 cells, and
//! groups adjacent cells of unusual density into clusters written out as a
//! GeoJSON feature collection.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use snafu::ResultExt;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod cluster;
mod error;


use cluster::{CellMap, Cluster, H3Grid, Point, PointList, Thresholds, cluster_cells};
use error::{CsvSnafu, IoSnafu, JsonSnafu, Result, WriteSnafu};

#[derive(Parser)]
#[command(name = "h3_cluster")]
#[command(about = "H3 grid density clustering tool for geo points", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output GeoJSON file with cluster polygons (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// H3 resolution (0 = coarsest, 15 = finest)
    #[arg(short, long, default_value_t = 5)]
    resolution: u8,

    /// Minimum number of points a cell needs to join a cluster
    #[arg(short = 'm', long)]
    min_points: Option<u64>,

    /// Minimum z-score a cell needs to join a cluster
    ///
    /// Both gates are off unless given. Pass `-m 1 -z 1` to get the
    /// thresholds of the earlier script version of this tool.
    #[arg(short = 'z', long, allow_negative_numbers = true)]
    min_z_score: Option<f64>,

    /// Zero-based index of the latitude column
    #[arg(long, default_value_t = 0)]
    lat_column: usize,

    /// Zero-based index of the longitude column
    #[arg(long, default_value_t = 1)]
    lng_column: usize,

    /// CSV file receiving every occupied cell with its total, z-score and label
    #[arg(long)]
    cells_output: Option<PathBuf>,

    /// Include member cell ids in the cluster properties
    #[arg(long)]
    with_cells: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// CSV columns holding the coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    lat: usize,
    lng: usize,
}

fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let columns = Columns {
        lat: args.lat_column,
        lng: args.lng_column,
    };
    let points = read_points(&args.input, columns)?;
    debug!(points = points.len(), input = ?args.input, "points read");

    let grid = H3Grid::new(args.resolution)?;
    let thresholds = Thresholds {
        min_points: args.min_points,
        min_z_score: args.min_z_score,
    };
    debug!(
        resolution = args.resolution,
        min_points = ?thresholds.min_points,
        min_z_score = ?thresholds.min_z_score,
        "clustering"
    );

    let clustering = cluster_cells(&grid, &points, &thresholds)?;
    if let Some(stats) = clustering.stats {
        info!(
            cells = clustering.cells.len(),
            mean = stats.mean,
            std_dev = stats.std_dev,
            clusters = clustering.clusters.len(),
            "clustering done"
        );
    } else {
        info!("no points to cluster");
    }

    if let Some(cells_output) = &args.cells_output {
        let file = create_file(cells_output)?;
        write_cells_csv(&clustering.cells, file)?;
        debug!(path = ?cells_output, "cells written");
    }

    let collection = feature_collection(&clustering.clusters, args.with_cells);
    match &args.output {
        None => write_geojson(&collection, io::stdout().lock()),
        Some(output_file) => {
            write_geojson(&collection, create_file(output_file)?)?;
            debug!(path = ?output_file, "clusters written");
            Ok(())
        }
    }
}

/// Reads points from a CSV file
///
/// The first row is taken as a header when its latitude field is not a
/// number. Rows that are too short or hold unparsable coordinates are skipped.
fn read_points(filename: &Path, columns: Columns) -> Result<PointList> {
    let file = File::open(filename).context(IoSnafu { path: filename })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut points = PointList::new();
    let mut skipped = 0;

    for (i, result) in reader.records().enumerate() {
        let record = result.context(CsvSnafu)?;

        let lat = record.get(columns.lat).map(|s| s.trim().parse::<f64>());
        let lng = record.get(columns.lng).map(|s| s.trim().parse::<f64>());
        match (lat, lng) {
            (Some(Ok(lat)), Some(Ok(lng))) => points.push(Point::new(lng, lat)),
            (Some(Err(_)), _) if i == 0 => debug!("skipping header row"),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "rows without valid coordinates skipped");
    }

    Ok(points)
}

/// Creates `path` along with any missing parent directories
fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(IoSnafu { path: parent })?;
    }
    File::create(path).context(IoSnafu { path })
}

/// Converts clusters into GeoJSON features, one per cluster in label order
fn feature_collection<C>(clusters: &[Cluster<C>], with_cells: bool) -> FeatureCollection
where
    C: Display,
{
    let features = clusters
        .iter()
        .map(|cluster| {
            let mut properties = JsonObject::new();
            properties.insert("label".to_string(), JsonValue::from(cluster.label));
            properties.insert("total".to_string(), JsonValue::from(cluster.total));
            properties.insert("cell_count".to_string(), JsonValue::from(cluster.cells.len()));
            if with_cells {
                let cells = cluster.cells.iter().map(|c| JsonValue::from(c.to_string()));
                properties.insert("cells".to_string(), JsonValue::Array(cells.collect()));
            }

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&cluster.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn write_geojson<W: Write>(collection: &FeatureCollection, mut writer: W) -> Result<()> {
    serde_json::to_writer(&mut writer, collection).context(JsonSnafu)?;
    writer.flush().context(WriteSnafu { target: "clusters" })
}

/// Writes one `cell,total,z_score,label` row per occupied cell
fn write_cells_csv<C, W>(cells: &CellMap<C>, writer: W) -> Result<()>
where
    C: Copy + Eq + std::hash::Hash + Display,
    W: Write,
{
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer
        .write_record(["cell", "total", "z_score", "label"])
        .context(CsvSnafu)?;

    for cell in cells.iter() {
        let label = cell.label.map(|l| l.to_string()).unwrap_or_default();
        writer
            .write_record([
                cell.id.to_string(),
                cell.total.to_string(),
                cell.z_score.to_string(),
                label,
            ])
            .context(CsvSnafu)?;
    }

    writer.flush().context(WriteSnafu { target: "cells" })
}
