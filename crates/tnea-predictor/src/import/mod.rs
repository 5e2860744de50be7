//! Loaders for the offline exports the service reads at startup.

mod careers;
mod offerings;
mod placements;
mod scholarships;

pub use careers::parse_career_paths;
pub use offerings::parse_offerings;
pub use placements::{merge_placements, parse_placements, PlacementRecord, MATCH_THRESHOLD};
pub use scholarships::parse_scholarships;

use crate::counseling::guidance::GuidanceCatalog;
use crate::counseling::offerings::Offering;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub const OFFERINGS_FILE: &str = "offerings.csv";
pub const PLACEMENTS_FILE: &str = "placements.csv";
pub const SCHOLARSHIPS_FILE: &str = "scholarships.csv";
pub const CAREER_PATHS_FILE: &str = "career_paths.json";

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::Json(err) => write!(f, "invalid JSON data: {}", err),
            ImportError::InvalidRow { line, reason } => {
                write!(f, "invalid record on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Csv(err) => Some(err),
            ImportError::Json(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Everything the service needs, read from one data directory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub offerings: Vec<Offering>,
    pub guidance: GuidanceCatalog,
    pub placements_matched: usize,
}

fn open(path: &Path) -> Result<File, ImportError> {
    File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Open an optional export; a missing file yields `None`.
fn open_optional(path: &Path) -> Result<Option<File>, ImportError> {
    if path.exists() {
        open(path).map(Some)
    } else {
        info!(path = %path.display(), "optional export not present");
        Ok(None)
    }
}

/// Load the data directory. Only the offering export is required.
pub fn load_directory(directory: &Path) -> Result<Dataset, ImportError> {
    let mut offerings = parse_offerings(open(&directory.join(OFFERINGS_FILE))?)?;

    let placements_matched = match open_optional(&directory.join(PLACEMENTS_FILE))? {
        Some(file) => merge_placements(&mut offerings, &parse_placements(file)?),
        None => 0,
    };

    let scholarships = match open_optional(&directory.join(SCHOLARSHIPS_FILE))? {
        Some(file) => parse_scholarships(file)?,
        None => Vec::new(),
    };

    let careers = match open_optional(&directory.join(CAREER_PATHS_FILE))? {
        Some(file) => parse_career_paths(file)?,
        None => Default::default(),
    };

    info!(
        directory = %directory.display(),
        offerings = offerings.len(),
        placements_matched,
        scholarships = scholarships.len(),
        career_domains = careers.domains().len(),
        "data directory loaded"
    );

    Ok(Dataset {
        offerings,
        guidance: GuidanceCatalog {
            scholarships,
            careers,
        },
        placements_matched,
    })
}
