use serde::{Deserialize, Serialize};

use crate::core::scaling::Scaling;
use crate::types::MaskAlpha;

/// A complete scaling request, suitable for request files and presets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalingRequest {
    pub bands: Vec<String>,
    /// Processing level name; None means the product's default
    #[serde(default)]
    pub processing_level: Option<String>,
    /// Scaling specification; None means no scaling
    #[serde(default)]
    pub scaling: Option<Scaling>,
    /// Output data type name; None means infer it
    #[serde(default)]
    pub data_type: Option<String>,
    /// None means mask only when every product has an alpha band
    #[serde(default)]
    pub mask_alpha: Option<MaskAlpha>,
}

impl ScalingRequest {
    pub fn new<B: AsRef<str>>(bands: &[B]) -> Self {
        Self {
            bands: bands.iter().map(|b| b.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }
}
