//! The user-facing scaling argument and its expansion into one `BandScale`
//! per requested band.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::properties::BandProperties;
use crate::core::scaling::band_scale::{BandScale, ScaleTuple};
use crate::error::{Error, Result};
use crate::types::{Number, ScalingMode};

/// Mapping key whose value applies to any band not named in the mapping.
pub const DEFAULT_KEY: &str = "default_";

/// How the caller wants bands scaled.
///
/// Deserializes from a mode string, a list with one entry per band, or an
/// object keyed by band name (optionally with a `"default_"` entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scaling {
    Mode(String),
    PerBand(Vec<Option<BandScaling>>),
    ByBand(BTreeMap<String, Option<BandScaling>>),
}

impl Scaling {
    pub fn mode(mode: impl Into<String>) -> Self {
        Scaling::Mode(mode.into())
    }
}

/// Scaling for a single band: a mode keyword or a 0-, 2-, or 4-element tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BandScaling {
    Mode(String),
    Tuple(Vec<ScaleValue>),
}

/// A tuple element: a number, or a percentage string such as `"98%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    Number(Number),
    Text(String),
}

impl From<i64> for ScaleValue {
    fn from(v: i64) -> Self {
        ScaleValue::Number(Number::Int(v))
    }
}

impl From<f64> for ScaleValue {
    fn from(v: f64) -> Self {
        ScaleValue::Number(Number::Float(v))
    }
}

impl From<&str> for ScaleValue {
    fn from(v: &str) -> Self {
        ScaleValue::Text(v.to_string())
    }
}

impl std::fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleValue::Number(n) => write!(f, "{}", n),
            ScaleValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// Build the `BandScale` for one band from its (possibly absent) scaling.
pub fn make_band_scale<'a>(
    properties: &'a BandProperties,
    value: Option<&BandScaling>,
) -> Result<BandScale<'a>> {
    match value {
        None => Ok(BandScale::NoScale {
            properties,
            mode: None,
        }),
        Some(BandScaling::Mode(name)) => {
            let mode = ScalingMode::from_name(name).ok_or_else(|| Error::InvalidScalingMode {
                mode: name.clone(),
                band: properties.name.clone(),
            })?;
            if properties.band_type.is_categorical() {
                // never stretch these; the mode only counts as a weak hint
                Ok(BandScale::NoScale {
                    properties,
                    mode: Some(mode),
                })
            } else {
                Ok(BandScale::Automatic { properties, mode })
            }
        }
        Some(BandScaling::Tuple(values)) => Ok(BandScale::Tuple {
            properties,
            tuple: ScaleTuple::new(&properties.name, values)?,
        }),
    }
}

/// Expand `scaling` into one `BandScale` per entry of `properties`, which
/// must be in requested band order.
pub fn parse_scaling<'a>(
    properties: &'a [BandProperties],
    scaling: &Scaling,
) -> Result<Vec<BandScale<'a>>> {
    match scaling {
        Scaling::Mode(mode) => {
            let value = BandScaling::Mode(mode.clone());
            properties
                .iter()
                .map(|props| make_band_scale(props, Some(&value)))
                .collect()
        }
        Scaling::ByBand(mapping) => properties
            .iter()
            .map(|props| {
                // a listed band may map to null, which is not the same as absent
                let value = match mapping.get(&props.name) {
                    Some(value) => value.as_ref(),
                    None if props.band_type.is_categorical() => None,
                    None => mapping.get(DEFAULT_KEY).and_then(Option::as_ref),
                };
                make_band_scale(props, value)
            })
            .collect(),
        Scaling::PerBand(values) => {
            if values.len() > properties.len() {
                return Err(Error::InvalidScalingShape(
                    "scaling value has more elements than bands".to_string(),
                ));
            }
            if values.len() < properties.len() {
                return Err(Error::InvalidScalingShape(
                    "scaling value has fewer elements than bands".to_string(),
                ));
            }
            properties
                .iter()
                .zip(values)
                .map(|(props, value)| make_band_scale(props, value.as_ref()))
                .collect()
        }
    }
}

/// Extend list-form scaling with a `None` entry for an alpha band the caller
/// appended to the band list. Other forms already cover any band.
pub fn append_alpha_scaling(scaling: Option<Scaling>) -> Option<Scaling> {
    match scaling {
        Some(Scaling::PerBand(mut values)) => {
            values.push(None);
            Some(Scaling::PerBand(values))
        }
        other => other,
    }
}
