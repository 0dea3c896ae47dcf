use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("No products found in band catalog: {path}")]
    NoProducts { path: String },

    #[error("Invalid --scaling JSON: {0}")]
    InvalidScaling(serde_json::Error),

    #[error("Failed to render result: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Bandscale(#[from] bandscale::Error),
}
