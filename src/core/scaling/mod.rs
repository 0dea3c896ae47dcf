//! Band scale resolution: per-band scale variants, the scaling argument
//! parser, and mode/data type inference across bands.
pub mod band_scale;
pub mod inference;
pub mod parse;

pub use band_scale::{BandScale, ModeHint, Scale, ScaleTuple, TupleValue, calc_pct};
pub use inference::{check_implied_data_type, check_modes, resolve_mode_and_data_type};
pub use parse::{BandScaling, ScaleValue, Scaling, append_alpha_scaling, parse_scaling};
