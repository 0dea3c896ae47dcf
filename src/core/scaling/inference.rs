//! Choosing one scaling mode and one output data type for a set of band
//! scales: explicit modes first, then implied modes, then the output ranges
//! the scales would produce.
use tracing::debug;

use crate::core::data_type::{common_data_type, data_type_from_range};
use crate::core::scaling::band_scale::{BandScale, ModeHint};
use crate::error::{Error, Result};
use crate::types::{DataType, Number, ScalingMode};

/// Combine the modes of `scales` that are explicit (`implied == false`) or
/// implied (`implied == true`).
///
/// `auto` and `display` merge to `display`. Any other disagreement between
/// explicit modes is an error; between implied modes it just means no mode.
pub fn check_modes(scales: &[BandScale<'_>], implied: bool) -> Result<Option<ScalingMode>> {
    let mut mode: Option<ScalingMode> = None;
    for scale in scales {
        let candidate = match (scale.mode_hint(), implied) {
            (ModeHint::Explicit(m), false) | (ModeHint::Implied(m), true) => m,
            _ => continue,
        };
        match mode {
            None => mode = Some(candidate),
            Some(current) if current == candidate => {}
            Some(current) if is_display_like(current) && is_display_like(candidate) => {
                mode = Some(ScalingMode::Display);
            }
            Some(current) if implied => {
                debug!(
                    "Implied modes '{}' and '{}' disagree on band {}, no mode implied",
                    current,
                    candidate,
                    scale.properties().name
                );
                return Ok(None);
            }
            Some(current) => {
                return Err(Error::ModeConflict {
                    first: current,
                    second: candidate,
                });
            }
        }
    }
    Ok(mode)
}

fn is_display_like(mode: ScalingMode) -> bool {
    matches!(mode, ScalingMode::Auto | ScalingMode::Display)
}

/// Find an output data type that can hold every known output bound.
///
/// Returns `None` only when no scale has any known bound, e.g. every band is
/// a 4-tuple with percentage outputs.
pub fn check_implied_data_type(scales: &[BandScale<'_>]) -> Option<DataType> {
    let ranges: Vec<[Option<Number>; 2]> = scales.iter().map(BandScale::output_range).collect();
    let mins: Vec<Number> = ranges.iter().filter_map(|r| r[0]).collect();
    let maxs: Vec<Number> = ranges.iter().filter_map(|r| r[1]).collect();

    let is_float = mins.iter().chain(&maxs).any(|n| n.is_float());
    let min = mins.iter().map(|n| n.as_f64()).reduce(f64::min);
    let max = maxs.iter().map(|n| n.as_f64()).reduce(f64::max);
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(data_type_from_range(min, max, is_float))
}

/// Mode implied by an output data type when no mode was given or implied.
pub fn default_mode_for(data_type: DataType) -> ScalingMode {
    match data_type {
        DataType::Byte => ScalingMode::Display,
        DataType::Float32 | DataType::Float64 => ScalingMode::Physical,
        _ => ScalingMode::Raw,
    }
}

/// Output data type implied by a mode. Raw output keeps the common type of
/// the bands' own data types.
pub fn default_data_type_for(mode: ScalingMode, band_types: &[DataType]) -> Result<DataType> {
    match mode {
        ScalingMode::Raw => common_data_type(band_types).ok_or(Error::UnresolvableOutput),
        ScalingMode::Physical => Ok(DataType::Float64),
        ScalingMode::Display | ScalingMode::Auto => Ok(DataType::Byte),
    }
}

/// Settle the mode and output data type for `scales`.
///
/// An explicit `data_type` is kept as given. `band_types` are the data types
/// of every band involved, used when raw output needs a common type.
pub fn resolve_mode_and_data_type(
    scales: &[BandScale<'_>],
    data_type: Option<DataType>,
    band_types: &[DataType],
) -> Result<(ScalingMode, DataType)> {
    let mut mode = check_modes(scales, false)?;
    let mut data_type = data_type;

    if mode.is_none() && data_type.is_none() {
        mode = check_modes(scales, true)?;
        if mode.is_none() {
            data_type = check_implied_data_type(scales);
            if data_type.is_none() {
                return Err(Error::UnresolvableOutput);
            }
            debug!("Output data type implied from scale ranges: {:?}", data_type);
        }
    }

    match (mode, data_type) {
        (Some(mode), Some(data_type)) => Ok((mode, data_type)),
        (None, Some(data_type)) => {
            let mode = default_mode_for(data_type);
            debug!("Mode {} defaulted from data type {}", mode, data_type);
            Ok((mode, data_type))
        }
        (Some(mode), None) => {
            let data_type = default_data_type_for(mode, band_types)?;
            debug!("Data type {} defaulted from mode {}", data_type, mode);
            Ok((mode, data_type))
        }
        (None, None) => Err(Error::UnresolvableOutput),
    }
}
