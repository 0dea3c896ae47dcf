//! Per-band scale specifications and their materialization into GDAL-style
//! scale tuples once the output mode and data type are known.
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::core::properties::BandProperties;
use crate::core::scaling::parse::ScaleValue;
use crate::error::{Error, Result};
use crate::types::{DataType, Number, Range, ScalingMode};

/// Upper display bound GDAL uses for float outputs; truncates to 255 for integers.
pub const GDAL_DISPLAY_MAX: f64 = 255.99;

const DISPLAY_OUTPUT_RANGE: Range = [Number::Int(0), Number::Int(255)];

/// A fully resolved scale for one band.
///
/// Serializes as a JSON array: `[]` for `Auto`, four numbers for `Linear`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Leave min/max detection to the rasterizer.
    Auto,
    /// `(in_min, in_max, out_min, out_max)`.
    Linear([Number; 4]),
}

impl Serialize for Scale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scale::Auto => serializer.serialize_seq(Some(0))?.end(),
            Scale::Linear(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for v in values {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }
}

/// Where a band's mode came from.
///
/// Explicit modes conflict loudly; implied modes are guesses that give up
/// quietly on conflict and are only consulted when nothing is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeHint {
    Explicit(ScalingMode),
    Implied(ScalingMode),
    Unset,
}

/// One element of a user scale tuple after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TupleValue {
    Number(Number),
    /// Percentage of the applicable bound range, e.g. `98.0` for `"98%"`.
    Percent(f64),
}

impl TupleValue {
    fn number(self) -> Option<Number> {
        match self {
            TupleValue::Number(n) => Some(n),
            TupleValue::Percent(_) => None,
        }
    }
}

/// A validated 0-, 2-, or 4-element user tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTuple {
    values: Vec<TupleValue>,
    implied_mode: Option<ScalingMode>,
}

impl ScaleTuple {
    pub fn new(band: &str, values: &[ScaleValue]) -> Result<Self> {
        if !matches!(values.len(), 0 | 2 | 4) {
            return Err(Error::InvalidScalingShape(format!(
                "tuple {} for band '{}' must have 0, 2, or 4 elements",
                describe(values),
                band
            )));
        }
        let values = values
            .iter()
            .map(|v| match v {
                ScaleValue::Number(n) => Ok(TupleValue::Number(*n)),
                ScaleValue::Text(s) => parse_percent(s).map(TupleValue::Percent).ok_or_else(|| {
                    Error::InvalidScalingShape(format!(
                        "tuple value '{}' for band '{}' is not a percentage string",
                        s, band
                    ))
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        let implied_mode = match values.as_slice() {
            [] => Some(ScalingMode::Auto),
            [_, _] => Some(ScalingMode::Display),
            [_, _, out_min, out_max] => implied_mode_of_output(*out_min, *out_max),
            _ => None,
        };
        Ok(Self {
            values,
            implied_mode,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn implied_mode(&self) -> Option<ScalingMode> {
        self.implied_mode
    }
}

fn implied_mode_of_output(out_min: TupleValue, out_max: TupleValue) -> Option<ScalingMode> {
    let (min, max) = (out_min.number(), out_max.number());
    if min.is_some_and(Number::is_float) || max.is_some_and(Number::is_float) {
        Some(ScalingMode::Physical)
    } else if min.is_some_and(|m| m < Number::Int(0)) || max.is_some_and(|m| m > Number::Int(255))
    {
        Some(ScalingMode::Raw)
    } else {
        None
    }
}

fn parse_percent(s: &str) -> Option<f64> {
    s.strip_suffix('%')?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|pct| pct.is_finite())
}

fn describe(values: &[ScaleValue]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}

/// How one band should be scaled, before mode and output type are settled.
#[derive(Debug, Clone, PartialEq)]
pub enum BandScale<'a> {
    /// No rescaling. A mode keyword given for a mask or class band lands here
    /// as an implied mode.
    NoScale {
        properties: &'a BandProperties,
        mode: Option<ScalingMode>,
    },
    /// A mode keyword on a band that can be stretched.
    Automatic {
        properties: &'a BandProperties,
        mode: ScalingMode,
    },
    /// An explicit user tuple.
    Tuple {
        properties: &'a BandProperties,
        tuple: ScaleTuple,
    },
}

impl<'a> BandScale<'a> {
    pub fn properties(&self) -> &'a BandProperties {
        match self {
            BandScale::NoScale { properties, .. }
            | BandScale::Automatic { properties, .. }
            | BandScale::Tuple { properties, .. } => *properties,
        }
    }

    pub fn mode_hint(&self) -> ModeHint {
        match self {
            BandScale::NoScale { mode: Some(m), .. } => ModeHint::Implied(*m),
            BandScale::NoScale { mode: None, .. } => ModeHint::Unset,
            BandScale::Automatic { mode, .. } => ModeHint::Explicit(*mode),
            BandScale::Tuple { tuple, .. } => match tuple.implied_mode {
                Some(m) => ModeHint::Implied(m),
                None => ModeHint::Unset,
            },
        }
    }

    /// The output value range this band would produce; `None` bounds are
    /// percentages that cannot be known before a mode is chosen.
    pub fn output_range(&self) -> [Option<Number>; 2] {
        let range = match self {
            BandScale::NoScale { properties, .. } => properties.data_range,
            BandScale::Automatic { properties, mode } => match mode {
                ScalingMode::Raw => properties.data_range,
                ScalingMode::Physical => properties.physical_range,
                ScalingMode::Display | ScalingMode::Auto => DISPLAY_OUTPUT_RANGE,
            },
            BandScale::Tuple { tuple, .. } => match tuple.values.as_slice() {
                [_, _, out_min, out_max] => return [out_min.number(), out_max.number()],
                _ => DISPLAY_OUTPUT_RANGE,
            },
        };
        [Some(range[0]), Some(range[1])]
    }

    /// Materialize the scale for the final `mode` and output `data_type`.
    /// `None` means the band is passed through unchanged.
    pub fn get_scale(&self, mode: ScalingMode, data_type: DataType) -> Option<Scale> {
        match self {
            BandScale::NoScale { .. } => None,
            BandScale::Automatic {
                properties,
                mode: own_mode,
            } => automatic_scale(properties, *own_mode, data_type),
            BandScale::Tuple { properties, tuple } => {
                Some(tuple_scale(properties, tuple, mode, data_type))
            }
        }
    }
}

fn automatic_scale(
    properties: &BandProperties,
    mode: ScalingMode,
    data_type: DataType,
) -> Option<Scale> {
    match mode {
        ScalingMode::Raw => None,
        ScalingMode::Auto => Some(Scale::Auto),
        ScalingMode::Display => {
            let [in_min, in_max] = properties.display_range;
            let out_max = if data_type.is_float() {
                Number::Float(GDAL_DISPLAY_MAX)
            } else {
                Number::Int(255)
            };
            Some(Scale::Linear([in_min, in_max, Number::Int(0), out_max]))
        }
        ScalingMode::Physical => {
            if properties.data_range == properties.physical_range {
                return None;
            }
            let [in_min, in_max] = properties.data_range;
            let [out_min, out_max] = properties.physical_range;
            Some(Scale::Linear([in_min, in_max, out_min, out_max]))
        }
    }
}

fn tuple_scale(
    properties: &BandProperties,
    tuple: &ScaleTuple,
    mode: ScalingMode,
    data_type: DataType,
) -> Scale {
    let (input_range, output_range) = match mode {
        ScalingMode::Raw => (properties.data_type.range(), data_type.range()),
        ScalingMode::Physical => (properties.data_range, properties.physical_range),
        ScalingMode::Display | ScalingMode::Auto => (
            properties.display_range,
            [Number::Float(0.0), Number::Float(GDAL_DISPLAY_MAX)],
        ),
    };
    let values = match tuple.values.as_slice() {
        [] => return Scale::Auto,
        [in_min, in_max] => [
            *in_min,
            *in_max,
            TupleValue::Number(output_range[0]),
            TupleValue::Number(output_range[1]),
        ],
        [in_min, in_max, out_min, out_max] => [*in_min, *in_max, *out_min, *out_max],
        _ => return Scale::Auto,
    };

    let input_float = properties.data_type.is_float();
    let output_float = data_type.is_float();
    Scale::Linear([
        calc_pct(values[0], input_range, input_float),
        calc_pct(values[1], input_range, input_float),
        calc_pct(values[2], output_range, output_float),
        calc_pct(values[3], output_range, output_float),
    ])
}

/// Resolve a percentage against `bounds`, then truncate unless the target
/// side is a float type.
pub fn calc_pct(value: TupleValue, bounds: Range, is_float: bool) -> Number {
    let value = match value {
        TupleValue::Number(n) => n,
        TupleValue::Percent(pct) => {
            let [lo, hi] = bounds;
            Number::Float(pct * (hi.as_f64() - lo.as_f64()) / 100.0 + lo.as_f64())
        }
    };
    if is_float { value } else { value.truncate() }
}
