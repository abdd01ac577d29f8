use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Invalid H3 resolution {}: {}", resolution, source))]
    InvalidResolution {
        resolution: u8,
        source: h3o::error::InvalidResolution,
    },

    #[snafu(display("Invalid coordinate (lng={}, lat={}): {}", lng, lat, source))]
    InvalidCoordinate {
        lng: f64,
        lat: f64,
        source: h3o::error::InvalidLatLng,
    },

    #[snafu(display("Cannot build geometry of cluster with {} cells: {}", cells, source))]
    Dissolve {
        cells: usize,
        source: h3o::error::DissolutionError,
    },

    #[snafu(display("CSV error: {}", source))]
    Csv { source: csv::Error },

    #[snafu(display("I/O error on {:?}: {}", path, source))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Cannot write {}: {}", target, source))]
    Write {
        target: &'static str,
        source: std::io::Error,
    },

    #[snafu(display("GeoJSON serialization error: {}", source))]
    Json { source: serde_json::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
