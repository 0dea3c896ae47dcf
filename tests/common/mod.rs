#![allow(dead_code)]

use bandscale::{BandMap, Number, Product, Scale, Scaling};
use serde_json::{Value, json};

pub fn band_map(value: Value) -> BandMap {
    serde_json::from_value(value).unwrap()
}

pub fn product(id: &str, bands: BandMap) -> Product {
    Product {
        id: id.to_string(),
        bands,
    }
}

pub fn scaling(value: Value) -> Scaling {
    serde_json::from_value(value).unwrap()
}

/// A 4-tuple scale from integers.
pub fn ints(values: [i64; 4]) -> Option<Scale> {
    Some(Scale::Linear(values.map(Number::Int)))
}

/// A 4-tuple scale from mixed numbers.
pub fn nums(values: [Number; 4]) -> Option<Scale> {
    Some(Scale::Linear(values))
}

pub fn rgba_bands() -> BandMap {
    band_map(json!({
        "red": {
            "type": "spectral", "data_type": "UInt16",
            "data_range": [0, 10000], "display_range": [0, 4000], "physical_range": [0, 1]
        },
        "green": {
            "type": "spectral", "data_type": "UInt16",
            "data_range": [0, 10000], "display_range": [0, 4000], "physical_range": [0, 1]
        },
        "blue": {
            "type": "spectral", "data_type": "UInt16",
            "data_range": [0, 10000], "display_range": [0, 4000], "physical_range": [0, 1]
        },
        "alpha": {"type": "mask", "data_type": "UInt16", "data_range": [0, 1]}
    }))
}

/// Red has a different data type and green a different physical range
/// than in `rgba_bands`; there is no blue.
pub fn rga_bands() -> BandMap {
    band_map(json!({
        "red": {
            "type": "spectral", "data_type": "Int16",
            "data_range": [0, 10000], "display_range": [0, 4000], "physical_range": [0.0, 1.0]
        },
        "green": {
            "type": "spectral", "data_type": "UInt16",
            "data_range": [0, 10000], "display_range": [0, 4000], "physical_range": [-1.0, 1.0]
        },
        "alpha": {"type": "mask", "data_type": "UInt16", "data_range": [0, 1]}
    }))
}

fn reflectance_levels(radiance_type: &str) -> Value {
    json!({
        "DN": [],
        "default": "toa_reflectance",
        "toa": "toa_reflectance",
        "toa_reflectance": [
            {"function": "gain_bias", "parameter": "reflectance_gain_bias", "index": 2}
        ],
        "toa_radiance": [
            {
                "function": "gain_bias", "parameter": "radiance_gain_bias", "index": 2,
                "data_type": radiance_type, "data_range": [0.0, 100.0]
            }
        ]
    })
}

/// Bands with processing levels. Blue's radiance level keeps `UInt16` and
/// the thermal band has a two-step brightness temperature level.
pub fn rgbta_bands_pl() -> BandMap {
    band_map(json!({
        "red": {
            "type": "spectral", "data_type": "UInt16", "data_range": [0, 65535],
            "processing_levels": reflectance_levels("Float64")
        },
        "green": {
            "type": "spectral", "data_type": "UInt16", "data_range": [0, 65535],
            "processing_levels": reflectance_levels("Float64")
        },
        "blue": {
            "type": "spectral", "data_type": "UInt16", "data_range": [0, 65535],
            "processing_levels": reflectance_levels("UInt16")
        },
        "tirs1": {
            "type": "spectral", "data_type": "UInt16", "data_range": [0, 65535],
            "processing_levels": {
                "DN": [],
                "default": "toa_brightness_temperature",
                "toa": "toa_brightness_temperature",
                "toa_brightness_temperature": [
                    {"function": "gain_bias", "parameter": "radiance_gain_bias", "index": 10},
                    {
                        "function": "brightness_temperature",
                        "parameter": "brightness_temperature_k1_k2",
                        "index": 1,
                        "data_type": "Float64",
                        "data_range": [0.0, 333.0],
                        "physical_range": [0.0, 1.0]
                    }
                ],
                "toa_radiance": [
                    {
                        "function": "gain_bias", "parameter": "radiance_gain_bias", "index": 10,
                        "data_type": "Float64", "data_range": [0.0, 100.0],
                        "physical_range": [0.0, 1.0]
                    }
                ]
            }
        },
        "alpha": {"type": "mask", "data_type": "UInt16", "data_range": [0, 1]}
    }))
}
