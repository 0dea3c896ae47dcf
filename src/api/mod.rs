//! High-level library API: resolve the scales and output data type for bands
//! of one product or of several products rasterized together, and plan a full
//! request including alpha masking. Prefer these entrypoints over the `core`
//! modules when integrating bandscale.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::data_type::common_data_type;
use crate::core::params::ScalingRequest;
use crate::core::properties::{BandProperties, BandRecord, properties_for_band};
use crate::core::scaling::{BandScale, Scale, Scaling, parse_scaling, resolve_mode_and_data_type};
use crate::error::{Error, Result};
use crate::types::{DataType, ScalingMode};

pub mod alpha;

pub use alpha::{ALPHA_BAND, AlphaPlan, plan_alpha_mask};

/// A product's band catalog, keyed by band name.
pub type BandMap = BTreeMap<String, BandRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub bands: BandMap,
}

/// Resolved scaling, ready to hand to a rasterization request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingResult {
    /// `None` when no band needs any transform, else one entry per band.
    pub scales: Option<Vec<Option<Scale>>>,
    pub data_type: DataType,
}

/// Bands, scales and masking flags for one rasterization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterPlan {
    pub bands: Vec<String>,
    pub scales: Option<Vec<Option<Scale>>>,
    pub data_type: DataType,
    pub mask_alpha: bool,
    pub drop_alpha: bool,
}

/// Determine GDAL-style band scaling parameters for bands of one product.
///
/// `properties` is the product's band catalog. Returns the per-band scales
/// (collapsed to `None` when no band is transformed) and the output type.
pub fn scaling_parameters<B: AsRef<str>>(
    properties: &BandMap,
    bands: &[B],
    processing_level: Option<&str>,
    scaling: Option<&Scaling>,
    data_type: Option<&str>,
) -> Result<ScalingResult> {
    let band_properties = resolve_bands(properties, bands, processing_level, None)?;
    let data_type = parse_requested_data_type(data_type)?;
    let band_types = data_types_of(&band_properties);

    let Some(scaling) = scaling else {
        return unscaled(data_type, &band_types);
    };

    let scales = parse_scaling(&band_properties, scaling)?;
    let (mode, data_type) = resolve_mode_and_data_type(&scales, data_type, &band_types)?;
    let resolved = materialize(&scales, mode, data_type);

    let scales = if resolved.iter().all(Option::is_none) {
        debug!("No band needs scaling, collapsing scales");
        None
    } else {
        Some(resolved)
    };
    Ok(ScalingResult { scales, data_type })
}

/// Determine GDAL-style band scaling parameters for bands rasterized from
/// several products at once.
///
/// Every band must exist in every product, and must resolve to the same
/// scale in every product. The returned scales follow `bands` and are not
/// collapsed.
pub fn multiproduct_scaling_parameters<B: AsRef<str>>(
    products: &[Product],
    bands: &[B],
    processing_level: Option<&str>,
    scaling: Option<&Scaling>,
    data_type: Option<&str>,
) -> Result<ScalingResult> {
    let product_properties = products
        .iter()
        .map(|product| {
            resolve_bands(&product.bands, bands, processing_level, Some(product.id.as_str()))
        })
        .collect::<Result<Vec<_>>>()?;
    let data_type = parse_requested_data_type(data_type)?;
    let band_types: Vec<DataType> = product_properties
        .iter()
        .flat_map(|props| data_types_of(props))
        .collect();

    let Some(scaling) = scaling else {
        return unscaled(data_type, &band_types);
    };

    // all bands of the first product, then all bands of the second, and so on
    let mut scales: Vec<BandScale<'_>> = Vec::with_capacity(band_types.len());
    for props in &product_properties {
        scales.extend(parse_scaling(props, scaling)?);
    }

    let (mode, data_type) = resolve_mode_and_data_type(&scales, data_type, &band_types)?;
    let mut resolved = materialize(&scales, mode, data_type);

    let band_count = bands.len();
    for (i, product) in products.iter().enumerate().skip(1) {
        for (j, band) in bands.iter().enumerate() {
            if resolved[i * band_count + j] != resolved[j] {
                return Err(Error::IncompatibleBands {
                    band: band.as_ref().to_string(),
                    first: products[0].id.clone(),
                    other: product.id.clone(),
                });
            }
        }
    }

    resolved.truncate(band_count);
    Ok(ScalingResult {
        scales: Some(resolved),
        data_type,
    })
}

/// Plan a rasterization of `request` over `products`.
///
/// A single product is resolved on the requested bands and the alpha band is
/// appended afterwards with no scale, so it never widens the output type.
/// Several products are resolved with the alpha band already appended, and
/// it must then agree across products like any other band.
pub fn resolve_request(products: &[Product], request: &ScalingRequest) -> Result<RasterPlan> {
    let processing_level = request.processing_level.as_deref();
    let data_type = request.data_type.as_deref();

    let (plan, result) = match products {
        [product] => {
            let mut result = scaling_parameters(
                &product.bands,
                &request.bands,
                processing_level,
                request.scaling.as_ref(),
                data_type,
            )?;
            let plan =
                plan_alpha_mask(products, &request.bands, None, request.mask_alpha.as_ref())?;
            if plan.drop_alpha {
                if let Some(scales) = result.scales.as_mut() {
                    scales.push(None);
                }
            }
            (plan, result)
        }
        _ => {
            let plan = plan_alpha_mask(
                products,
                &request.bands,
                request.scaling.clone(),
                request.mask_alpha.as_ref(),
            )?;
            let result = multiproduct_scaling_parameters(
                products,
                &plan.bands,
                processing_level,
                plan.scaling.as_ref(),
                data_type,
            )?;
            (plan, result)
        }
    };

    info!(
        "Resolved {} band(s) across {} product(s) to {}",
        plan.bands.len(),
        products.len(),
        result.data_type
    );
    Ok(RasterPlan {
        bands: plan.bands,
        scales: result.scales,
        data_type: result.data_type,
        mask_alpha: plan.mask_alpha,
        drop_alpha: plan.drop_alpha,
    })
}

fn resolve_bands<B: AsRef<str>>(
    properties: &BandMap,
    bands: &[B],
    processing_level: Option<&str>,
    product: Option<&str>,
) -> Result<Vec<BandProperties>> {
    bands
        .iter()
        .map(|band| {
            let band = band.as_ref();
            let record = properties.get(band).ok_or_else(|| {
                let derived = format!("derived:{}", band);
                Error::UnknownBand {
                    band: band.to_string(),
                    product: product.map(str::to_string),
                    suggestion: properties.contains_key(&derived).then_some(derived),
                }
            })?;
            properties_for_band(band, record, processing_level)
        })
        .collect()
}

fn parse_requested_data_type(data_type: Option<&str>) -> Result<Option<DataType>> {
    data_type.map(str::parse).transpose()
}

fn data_types_of(properties: &[BandProperties]) -> Vec<DataType> {
    properties.iter().map(|p| p.data_type).collect()
}

fn unscaled(data_type: Option<DataType>, band_types: &[DataType]) -> Result<ScalingResult> {
    let data_type = match data_type {
        Some(dt) => dt,
        None => common_data_type(band_types).ok_or(Error::UnresolvableOutput)?,
    };
    Ok(ScalingResult {
        scales: None,
        data_type,
    })
}

fn materialize(
    scales: &[BandScale<'_>],
    mode: ScalingMode,
    data_type: DataType,
) -> Vec<Option<Scale>> {
    debug!("Materializing {} scale(s) for mode {} to {}", scales.len(), mode, data_type);
    scales
        .iter()
        .map(|scale| scale.get_scale(mode, data_type))
        .collect()
}
