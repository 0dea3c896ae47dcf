//! Band records as delivered by catalog metadata, processing level
//! resolution, and the resolved per-band properties the scaling engine reads.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProcessingLevelError, Result};
use crate::types::{BandType, DataType, Number, Range};

/// Alias chains longer than this are treated as a definition loop.
pub const MAX_ALIAS_DEPTH: usize = 10;

/// The processing-step function that keeps the raw band's type and ranges.
pub const DLSR_FUNCTION: &str = "dlsr";

/// Processing levels that bands without explicit definitions accept.
const LEGACY_PROCESSING_LEVELS: [&str; 3] = ["default", "toa", "surface"];

const LEGACY_DATA_TYPE: DataType = DataType::UInt16;
const LEGACY_DATA_RANGE: Range = [Number::Int(0), Number::Int(10000)];

/// Band metadata as stored in a product's band catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    /// Absent for derived bands.
    #[serde(rename = "type", default)]
    pub band_type: Option<BandType>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub data_range: Option<Range>,
    #[serde(default, alias = "default_range")]
    pub display_range: Option<Range>,
    #[serde(default)]
    pub physical_range: Option<Range>,
    #[serde(default)]
    pub processing_levels: Option<BTreeMap<String, ProcessingLevel>>,
}

/// A named processing level: either another level's name or a list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessingLevel {
    Alias(String),
    Steps(Vec<ProcessingStep>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    pub function: String,
    pub parameter: String,
    pub index: i64,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub data_range: Option<Range>,
    #[serde(default)]
    pub display_range: Option<Range>,
    #[serde(default)]
    pub physical_range: Option<Range>,
}

/// Properties of one band after defaults and processing level are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BandProperties {
    pub name: String,
    pub band_type: BandType,
    pub data_type: DataType,
    pub data_range: Range,
    pub display_range: Range,
    pub physical_range: Range,
}

/// Resolve a processing level through any aliases to its steps.
///
/// A missing or empty `level` means `"default"`. An unknown top-level name is
/// not an error and yields `None`; an alias pointing at nothing is.
pub fn resolve_processing_level<'a>(
    level: Option<&str>,
    levels: &'a BTreeMap<String, ProcessingLevel>,
) -> std::result::Result<Option<&'a [ProcessingStep]>, ProcessingLevelError> {
    let mut name = level.filter(|l| !l.is_empty()).unwrap_or("default");
    for depth in 0..MAX_ALIAS_DEPTH {
        match levels.get(name) {
            None if depth > 0 => {
                return Err(ProcessingLevelError::DanglingAlias(name.to_string()));
            }
            None => return Ok(None),
            Some(ProcessingLevel::Alias(target)) => name = target.as_str(),
            Some(ProcessingLevel::Steps(steps)) => return Ok(Some(steps.as_slice())),
        }
    }
    Err(ProcessingLevelError::InfiniteLoop)
}

/// Gather the properties of a band under a processing level.
///
/// Missing base `data_type`/`data_range` fall back to `UInt16` and `[0, 10000]`.
/// When the level resolves to steps, the last step overrides type and ranges
/// (type defaulting to `Float64`), except for a `dlsr` step, which keeps the
/// raw band definition.
pub fn properties_for_band(
    name: &str,
    band: &BandRecord,
    processing_level: Option<&str>,
) -> Result<BandProperties> {
    let band_type = band.band_type.unwrap_or_default();

    let mut data_type = parse_data_type(band.data_type.as_deref())?.unwrap_or(LEGACY_DATA_TYPE);
    let mut data_range = band.data_range.unwrap_or(LEGACY_DATA_RANGE);
    let mut display_range = band.display_range.unwrap_or(data_range);
    let mut physical_range = band.physical_range.unwrap_or(data_range);

    match band.processing_levels.as_ref().filter(|levels| !levels.is_empty()) {
        None => {
            // not an error for legacy bands, nor for mask and class bands
            if let Some(level) = processing_level.filter(|l| !l.is_empty()) {
                if !LEGACY_PROCESSING_LEVELS.contains(&level) && !band_type.is_categorical() {
                    return Err(ProcessingLevelError::UnknownLevel {
                        level: level.to_string(),
                        band: name.to_string(),
                    }
                    .into());
                }
            }
        }
        Some(levels) => {
            let steps = resolve_processing_level(processing_level, levels)?;
            if let Some(step) = steps.and_then(|s| s.last()) {
                if step.function == DLSR_FUNCTION {
                    debug!("Band {} keeps raw properties for dlsr processing", name);
                } else {
                    data_type =
                        parse_data_type(step.data_type.as_deref())?.unwrap_or(DataType::Float64);
                    data_range = step.data_range.unwrap_or(data_type.range());
                    display_range = step.display_range.unwrap_or(data_range);
                    physical_range = step.physical_range.unwrap_or(data_range);
                }
            }
        }
    }

    Ok(BandProperties {
        name: name.to_string(),
        band_type,
        data_type,
        data_range,
        display_range,
        physical_range,
    })
}

fn parse_data_type(value: Option<&str>) -> Result<Option<DataType>> {
    value
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn record(value: serde_json::Value) -> BandRecord {
        serde_json::from_value(value).unwrap()
    }

    fn levels(value: serde_json::Value) -> BTreeMap<String, ProcessingLevel> {
        serde_json::from_value(value).unwrap()
    }

    fn reflectance_band() -> BandRecord {
        record(json!({
            "type": "spectral",
            "data_type": "UInt16",
            "data_range": [0, 65535],
            "processing_levels": {
                "DN": [],
                "default": "toa_reflectance",
                "toa": "toa_reflectance",
                "toa_reflectance": [
                    {"function": "gain_bias", "parameter": "reflectance_gain_bias", "index": 2}
                ],
                "toa_radiance": [
                    {
                        "function": "gain_bias",
                        "parameter": "radiance_gain_bias",
                        "index": 2,
                        "data_type": "Float64",
                        "data_range": [0.0, 100.0]
                    }
                ],
                "surface": [
                    {"function": "dlsr", "parameter": "surface_reflectance", "index": 0}
                ]
            }
        }))
    }

    #[test]
    fn resolves_alias_chain() {
        let levels = levels(json!({
            "a": "b",
            "b": "c",
            "c": [{"function": "gain_bias", "parameter": "p", "index": 1}]
        }));
        let steps = resolve_processing_level(Some("a"), &levels).unwrap().unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].function, "gain_bias");
    }

    #[test]
    fn missing_level_means_default() {
        let levels = levels(json!({"default": "x", "x": []}));
        let steps = resolve_processing_level(None, &levels).unwrap().unwrap();
        assert!(steps.is_empty());
        let steps = resolve_processing_level(Some(""), &levels).unwrap().unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn unknown_top_level_is_not_an_error() {
        let levels = levels(json!({"default": []}));
        assert!(resolve_processing_level(Some("nope"), &levels).unwrap().is_none());
    }

    #[test]
    fn dangling_alias_is_an_error() {
        let levels = levels(json!({"default": "gone"}));
        let err = resolve_processing_level(None, &levels).unwrap_err();
        assert!(matches!(err, ProcessingLevelError::DanglingAlias(name) if name == "gone"));
    }

    #[test]
    fn alias_cycle_is_an_error() {
        let levels = levels(json!({"a": "b", "b": "a"}));
        let err = resolve_processing_level(Some("a"), &levels).unwrap_err();
        assert!(matches!(err, ProcessingLevelError::InfiniteLoop));
    }

    #[test]
    fn legacy_defaults_apply_to_bare_records() {
        let props = properties_for_band("b", &BandRecord::default(), None).unwrap();
        assert_eq!(props.band_type, BandType::Generic);
        assert_eq!(props.data_type, DataType::UInt16);
        assert_eq!(props.data_range, [Number::Int(0), Number::Int(10000)]);
        assert_eq!(props.display_range, props.data_range);
        assert_eq!(props.physical_range, props.data_range);
    }

    #[test]
    fn display_range_accepts_legacy_field_name() {
        let band = record(json!({"type": "spectral", "default_range": [0, 4000]}));
        let props = properties_for_band("red", &band, None).unwrap();
        assert_eq!(props.display_range, [Number::Int(0), Number::Int(4000)]);
    }

    #[test]
    fn default_level_applies_last_step_as_float64() {
        let props = properties_for_band("red", &reflectance_band(), None).unwrap();
        assert_eq!(props.data_type, DataType::Float64);
        assert_eq!(props.data_range, [Number::Float(0.0), Number::Float(1.0)]);
        assert!(props.data_range[0].is_float());
    }

    #[test]
    fn step_ranges_override_band_ranges() {
        let props = properties_for_band("red", &reflectance_band(), Some("toa_radiance")).unwrap();
        assert_eq!(props.data_type, DataType::Float64);
        assert_eq!(props.data_range, [Number::Float(0.0), Number::Float(100.0)]);
        assert_eq!(props.physical_range, props.data_range);
    }

    #[test]
    fn empty_step_list_keeps_band_properties() {
        let props = properties_for_band("red", &reflectance_band(), Some("DN")).unwrap();
        assert_eq!(props.data_type, DataType::UInt16);
        assert_eq!(props.data_range, [Number::Int(0), Number::Int(65535)]);
    }

    #[test]
    fn dlsr_step_keeps_raw_band_properties() {
        let props = properties_for_band("red", &reflectance_band(), Some("surface")).unwrap();
        assert_eq!(props.data_type, DataType::UInt16);
        assert_eq!(props.data_range, [Number::Int(0), Number::Int(65535)]);
    }

    #[test]
    fn unknown_level_without_definitions() {
        let spectral = record(json!({"type": "spectral", "data_type": "UInt16"}));
        assert!(properties_for_band("red", &spectral, Some("toa")).is_ok());
        let err = properties_for_band("red", &spectral, Some("toa_radiance")).unwrap_err();
        assert!(matches!(
            err,
            Error::ProcessingLevel(ProcessingLevelError::UnknownLevel { .. })
        ));

        let mask = record(json!({"type": "mask", "data_type": "UInt16", "data_range": [0, 1]}));
        assert!(properties_for_band("alpha", &mask, Some("toa_radiance")).is_ok());
    }

    #[test]
    fn invalid_band_data_type_is_rejected() {
        let band = record(json!({"type": "spectral", "data_type": "Complex64"}));
        let err = properties_for_band("red", &band, None).unwrap_err();
        assert!(matches!(err, Error::InvalidDataType(name) if name == "Complex64"));
    }
}
