//! Core resolution building blocks: data type algebra, band properties and
//! processing levels, and band scale inference. These are internal primitives
//! consumed by the high-level `api` module.
pub mod data_type;
pub mod params;
pub mod properties;
pub mod scaling;
