//! Helpers for exploring [Mushroom Observer](https://mushroomobserver.org)
//! open data: downloading the tab-separated data exports, summarizing their
//! coverage, a few spherical-geometry helpers for location bounding boxes,
//! and a concurrent bulk downloader for observation images.

mod client;
mod datasets;
mod geo;
mod images;
mod stats;
mod table;

pub use client::{HttpClient, USER_AGENT};
pub use datasets::{Dataset, DatasetClient, MO_HOMEPAGE};
pub use geo::{BoundingBox, polygon_area};
pub use images::{
    FetchConfig, FetchError, FetchOutcome, ImageFetcher, ImageSize, fetch_and_save,
};
pub use stats::{ColumnCoverage, ValueCount, ValueCounts, column_coverage, value_counts};
pub use table::{Row, Table};

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Http { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed export: {0}")]
    Parse(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unsupported image size: {0}px")]
    UnsupportedSize(u16),
}
