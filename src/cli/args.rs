use clap::Parser;
use std::path::PathBuf;

use bandscale::DataType;

#[derive(Parser, Debug)]
#[command(name = "bandscale", version, about = "Resolve band scaling for rasterization")]
pub struct CliArgs {
    /// Band catalog JSON: one product object or a list of products
    #[arg(short, long)]
    pub products: PathBuf,

    /// Scaling request JSON; command line options override its fields
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Comma-separated band names, in output order
    #[arg(short, long, value_delimiter = ',')]
    pub bands: Vec<String>,

    /// Processing level (e.g. toa, surface, or a product-defined level)
    #[arg(long)]
    pub processing_level: Option<String>,

    /// Scaling: a mode (raw, display, auto, physical) or a JSON list/object
    #[arg(short, long)]
    pub scaling: Option<String>,

    /// Output data type
    #[arg(long, value_enum)]
    pub data_type: Option<DataType>,

    /// Alpha masking: true, false, or the name of a mask band
    #[arg(long)]
    pub mask_alpha: Option<String>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Pretty-print the JSON result
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
