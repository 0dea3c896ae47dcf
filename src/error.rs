//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Every resolution failure is a caller input problem; nothing is retried or
//! recovered internally. I/O and JSON variants only arise when loading requests.
use thiserror::Error;

use crate::types::ScalingMode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Invalid bands: band '{band}' is not available{}{}",
        in_product(.product),
        did_you_mean(.suggestion)
    )]
    UnknownBand {
        band: String,
        product: Option<String>,
        suggestion: Option<String>,
    },

    #[error("Invalid data type '{0}'")]
    InvalidDataType(String),

    #[error("Invalid scaling mode '{mode}' for band '{band}'")]
    InvalidScalingMode { mode: String, band: String },

    #[error("Invalid scaling: {0}")]
    InvalidScalingShape(String),

    #[error("Conflicting modes in scaling: '{first}' and '{second}'")]
    ModeConflict {
        first: ScalingMode,
        second: ScalingMode,
    },

    #[error("Invalid scaling parameters, cannot determine output data type or mode")]
    UnresolvableOutput,

    #[error("Invalid scaling incompatible bands for band '{band}' in products '{first}' and '{other}'")]
    IncompatibleBands {
        band: String,
        first: String,
        other: String,
    },

    #[error(transparent)]
    ProcessingLevel(#[from] ProcessingLevelError),

    #[error("{0}")]
    AlphaMask(String),
}

/// Problems with a band's processing level definitions, or with the level a
/// caller asked for.
#[derive(Debug, Error)]
pub enum ProcessingLevelError {
    #[error("Processing levels contains infinite loop")]
    InfiniteLoop,

    #[error("Processing levels contains dangling alias {0}")]
    DanglingAlias(String),

    #[error("Unknown processing_level value {level} for band {band}")]
    UnknownLevel { level: String, band: String },
}

fn in_product(product: &Option<String>) -> String {
    match product {
        Some(p) => format!(" in product '{}'", p),
        None => String::new(),
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{}'?", s),
        None => String::new(),
    }
}
