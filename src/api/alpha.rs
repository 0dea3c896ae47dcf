//! Alpha masking: decide whether the alpha band takes part in a rasterization,
//! and append it (and a matching scaling entry) when the caller left it out.
use tracing::debug;

use crate::api::Product;
use crate::core::scaling::{Scaling, append_alpha_scaling};
use crate::error::{Error, Result};
use crate::types::MaskAlpha;

pub const ALPHA_BAND: &str = "alpha";

/// Band list and scaling after alpha masking has been accounted for.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaPlan {
    pub bands: Vec<String>,
    pub scaling: Option<Scaling>,
    pub mask_alpha: bool,
    /// The alpha band was appended only for masking and is dropped afterwards.
    pub drop_alpha: bool,
    pub alpha_band: String,
}

pub fn plan_alpha_mask<B: AsRef<str>>(
    products: &[Product],
    bands: &[B],
    scaling: Option<Scaling>,
    mask_alpha: Option<&MaskAlpha>,
) -> Result<AlphaPlan> {
    let mut bands: Vec<String> = bands.iter().map(|b| b.as_ref().to_string()).collect();
    let (alpha_band, mask_alpha) = match mask_alpha {
        Some(MaskAlpha::Band(name)) => (name.clone(), true),
        Some(MaskAlpha::Enabled(enabled)) => (ALPHA_BAND.to_string(), *enabled),
        None => (
            ALPHA_BAND.to_string(),
            !products.is_empty() && products.iter().all(|p| p.bands.contains_key(ALPHA_BAND)),
        ),
    };

    let mut scaling = scaling;
    let mut drop_alpha = false;
    if mask_alpha {
        if let Some(product) = products
            .iter()
            .find(|p| !p.bands.contains_key(&alpha_band))
        {
            return Err(Error::AlphaMask(format!(
                "Cannot mask alpha: no {} band for the product '{}'. Try setting 'mask_alpha=False'.",
                alpha_band, product.id
            )));
        }
        match bands.iter().position(|b| *b == alpha_band) {
            None => {
                debug!("Appending {} band for masking", alpha_band);
                bands.push(alpha_band.clone());
                drop_alpha = true;
                scaling = append_alpha_scaling(scaling);
            }
            Some(i) if i != bands.len() - 1 => {
                return Err(Error::AlphaMask(
                    "Alpha must be the last band in order to reduce rasterization errors"
                        .to_string(),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(AlphaPlan {
        bands,
        scaling,
        mask_alpha,
        drop_alpha,
        alpha_band,
    })
}
