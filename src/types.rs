//! Shared types and enums used across bandscale.
//! Includes `DataType` (the GDAL output types), `ScalingMode`, `BandType`,
//! and `Number`, the integer-or-float scalar carried through scale tuples.
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A scalar as it appeared in band metadata or a user scaling tuple.
///
/// Integers and floats are kept apart because the distinction drives type
/// inference (any float bound implies a float output type), while equality and
/// ordering are numeric so `0 == 0.0`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Truncate toward zero into an integer, leaving integers untouched.
    pub fn truncate(self) -> Number {
        match self {
            Number::Int(v) => Number::Int(v),
            Number::Float(v) => Number::Int(v.trunc() as i64),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v as i64)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// A two-element value range, `[min, max]`.
pub type Range = [Number; 2];

/// Supported output data types, named as GDAL names them.
///
/// Variants are declared smallest to largest, unsigned before signed and
/// integer before float; `DataType::ALL` preserves that order and
/// `data_type_from_range` relies on it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum DataType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl DataType {
    pub const ALL: [DataType; 7] = [
        DataType::Byte,
        DataType::UInt16,
        DataType::Int16,
        DataType::UInt32,
        DataType::Int32,
        DataType::Float32,
        DataType::Float64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "Byte",
            DataType::UInt16 => "UInt16",
            DataType::Int16 => "Int16",
            DataType::UInt32 => "UInt32",
            DataType::Int32 => "Int32",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Types this one can be widened to without loss, narrowest first.
    pub fn upcasts(self) -> &'static [DataType] {
        use DataType::*;
        match self {
            Byte => &[UInt16, Int16, UInt32, Int32, Float32, Float64],
            UInt16 => &[UInt32, Int32, Float32, Float64],
            Int16 => &[Int32, Float32, Float64],
            UInt32 => &[Float64],
            Int32 => &[Float32, Float64],
            Float32 => &[Float64],
            Float64 => &[],
        }
    }

    /// Value range of the type. For floats this is the default output
    /// range `[0.0, 1.0]`, not what the type can hold.
    pub fn range(self) -> Range {
        match self {
            DataType::Byte => [Number::Int(0), Number::Int(255)],
            DataType::UInt16 => [Number::Int(0), Number::Int(65535)],
            DataType::Int16 => [Number::Int(-32768), Number::Int(32767)],
            DataType::UInt32 => [Number::Int(0), Number::Int(4294967295)],
            DataType::Int32 => [Number::Int(-2147483648), Number::Int(2147483647)],
            DataType::Float32 | DataType::Float64 => [Number::Float(0.0), Number::Float(1.0)],
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|dt| dt.name() == s)
            .ok_or_else(|| Error::InvalidDataType(s.to_string()))
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// GDAL spellings on the command line instead of clap's kebab-case defaults
impl clap::ValueEnum for DataType {
    fn value_variants<'a>() -> &'a [Self] {
        &DataType::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.name()))
    }
}

/// How a band is stretched when no explicit tuple says otherwise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    /// Leave values alone.
    Raw,
    /// Stretch the display range to 0-255.
    Display,
    /// Let the rasterizer stretch from observed min/max.
    Auto,
    /// Stretch the data range to the physical range.
    Physical,
}

impl ScalingMode {
    pub fn from_name(name: &str) -> Option<ScalingMode> {
        match name {
            "raw" => Some(ScalingMode::Raw),
            "display" => Some(ScalingMode::Display),
            "auto" => Some(ScalingMode::Auto),
            "physical" => Some(ScalingMode::Physical),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalingMode::Raw => "raw",
            ScalingMode::Display => "display",
            ScalingMode::Auto => "auto",
            ScalingMode::Physical => "physical",
        }
    }
}

impl std::fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandType {
    Spectral,
    Mask,
    Class,
    Microwave,
    /// Also used for derived bands, which carry no type.
    #[default]
    Generic,
}

impl BandType {
    /// Mask and class bands are never stretched by a mode keyword.
    pub fn is_categorical(self) -> bool {
        matches!(self, BandType::Mask | BandType::Class)
    }
}

impl std::fmt::Display for BandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BandType::Spectral => "spectral",
            BandType::Mask => "mask",
            BandType::Class => "class",
            BandType::Microwave => "microwave",
            BandType::Generic => "generic",
        };
        write!(f, "{}", s)
    }
}

/// Whether to mask pixels where the alpha band is 0. Absent means "mask if
/// every product has an `alpha` band".
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaskAlpha {
    Enabled(bool),
    /// Mask using the named band instead of `alpha`.
    Band(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Float(1.5));
        assert!(Number::Int(2) > Number::Float(1.5));
    }

    #[test]
    fn truncate_rounds_toward_zero() {
        assert_eq!(Number::Float(250.87).truncate(), Number::Int(250));
        assert_eq!(Number::Float(-1.9).truncate(), Number::Int(-1));
        assert!(!Number::Float(5.5).truncate().is_float());
    }

    #[test]
    fn number_json_keeps_int_float_distinction() {
        let parsed: Vec<Number> = serde_json::from_str("[0, 1.0, 10000]").unwrap();
        assert!(!parsed[0].is_float());
        assert!(parsed[1].is_float());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "[0,1.0,10000]");
    }

    #[test]
    fn data_type_parses_gdal_names() {
        assert_eq!("UInt16".parse::<DataType>().unwrap(), DataType::UInt16);
        assert!(matches!(
            "uint16".parse::<DataType>(),
            Err(Error::InvalidDataType(name)) if name == "uint16"
        ));
    }

    #[test]
    fn float_ranges_are_default_output_ranges() {
        let [lo, hi] = DataType::Float32.range();
        assert!(lo.is_float() && hi.is_float());
        assert_eq!(hi, Number::Int(1));
    }

    #[test]
    fn band_type_defaults_to_generic() {
        assert_eq!(BandType::default(), BandType::Generic);
        assert!(BandType::Mask.is_categorical());
        assert!(!BandType::Microwave.is_categorical());
    }
}
