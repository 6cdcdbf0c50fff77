//! Error taxonomy for the chart pipeline.
//!
//! Each pipeline stage has its own error type. `ChartError` wraps them so the
//! top of the pipeline can handle all of them in one place before any
//! primitive is emitted.

use thiserror::Error;

/// Fetching or parsing the tabular source failed.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row on line {line} has an empty id")]
    MissingId { line: u64 },

    #[error("data source contains no rows")]
    Empty,
}

/// The records do not describe a single rooted tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedHierarchyError {
    #[error("no records to build a hierarchy from")]
    Empty,

    #[error("no root: every record has a parent")]
    NoRoot,

    #[error("ambiguous root: {} records have no parent ({})", ids.len(), ids.join(", "))]
    AmbiguousRoot { ids: Vec<String> },

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("record {id} references missing parent {parent_id}")]
    Orphan { id: String, parent_id: String },

    #[error("cycle detected in hierarchy at {id}")]
    Cycle { id: String },
}

/// The layout geometry cannot be computed without producing NaN coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidGeometryError {
    #[error("tree has no depth: cannot scale radius by a max depth of zero")]
    ZeroDepth,

    #[error("max radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    #[error("separation factors must be finite and positive (siblings={siblings}, cousins={cousins})")]
    InvalidSeparation { siblings: f64, cousins: f64 },
}

/// Any failure surfaced by a chart render pass.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    MalformedHierarchy(#[from] MalformedHierarchyError),

    #[error(transparent)]
    InvalidGeometry(#[from] InvalidGeometryError),
}

impl ChartError {
    /// Short category label used when surfacing the error to the page.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartError::DataLoad(_) => "data load error",
            ChartError::MalformedHierarchy(_) => "malformed hierarchy",
            ChartError::InvalidGeometry(_) => "invalid geometry",
        }
    }

    /// User-visible message, e.g. `data load error: data source contains no rows`.
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}
