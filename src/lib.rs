#![doc = r##"
bandscale — GDAL-style band scaling resolution for satellite imagery.

Given a product's band catalog, a list of bands, and a deliberately loose
scaling specification (a mode keyword, per-band tuples, percentages, a mapping,
or nothing), this crate resolves a complete scale table and a single output
data type that can be passed unmodified to a rasterization request.

Resolution is a pure function: no I/O, no shared state, safe to call from
many threads at once.

Quick start
-----------
```rust
use bandscale::{scaling_parameters, BandMap, DataType, Number, Scale, Scaling};

fn main() -> bandscale::Result<()> {
    let bands: BandMap = serde_json::from_str(r#"{
        "red": {"type": "spectral", "data_type": "UInt16",
                "data_range": [0, 10000], "display_range": [0, 4000]},
        "alpha": {"type": "mask", "data_type": "UInt16", "data_range": [0, 1]}
    }"#)?;

    let result = scaling_parameters(
        &bands,
        &["red", "alpha"],
        None,
        Some(&Scaling::mode("display")),
        None,
    )?;

    assert_eq!(result.data_type, DataType::Byte);
    let scales = result.scales.unwrap();
    assert_eq!(scales[0], Some(Scale::Linear([0, 4000, 0, 255].map(Number::Int))));
    assert_eq!(scales[1], None);
    Ok(())
}
```

Scaling specifications
----------------------
- `None`: no scaling; the output type is the common type of all bands.
- A mode: `"raw"`, `"display"`, `"auto"` or `"physical"` for every band.
  Mask and class bands are never stretched by a mode.
- A list with one entry per band: `null`, a mode, or a tuple of 0, 2, or 4
  numbers or percentage strings such as `"2%"`.
- An object keyed by band name, with an optional `"default_"` entry.

Several products
----------------
```rust
use bandscale::{multiproduct_scaling_parameters, Product, Scaling};

fn main() -> bandscale::Result<()> {
    let products: Vec<Product> = serde_json::from_str(r#"[
        {"id": "p1", "bands": {"red": {"type": "spectral", "display_range": [0, 4000]}}},
        {"id": "p2", "bands": {"red": {"type": "spectral", "display_range": [0, 4000]}}}
    ]"#)?;

    let result = multiproduct_scaling_parameters(
        &products,
        &["red"],
        None,
        Some(&Scaling::mode("display")),
        None,
    )?;
    assert_eq!(result.scales.map(|s| s.len()), Some(1));
    Ok(())
}
```

Error handling
--------------
All public functions return `bandscale::Result<T>`; match on `bandscale::Error`
to handle specific cases, e.g. unknown bands or conflicting modes.

Useful modules
--------------
- [`api`] — entry points and alpha-mask planning.
- [`core`] — data type algebra, band properties, and scale inference.
- [`types`] — shared enums (`DataType`, `ScalingMode`, `BandType`, `Number`).
- [`io`] — loading band catalogs and requests from JSON files.
- [`error`] — crate-level `Error` and `Result`.
"##]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::ScalingRequest;
pub use error::{Error, ProcessingLevelError, Result};
pub use types::{BandType, DataType, MaskAlpha, Number, ScalingMode};

// Band metadata and scaling specifications
pub use crate::core::properties::{
    BandProperties, BandRecord, ProcessingLevel, ProcessingStep, properties_for_band,
    resolve_processing_level,
};
pub use crate::core::scaling::{BandScaling, Scale, ScaleValue, Scaling, append_alpha_scaling};

// Data type helpers
pub use crate::core::data_type::{common_data_type, data_type_from_range};

// High-level API re-exports
pub use api::{
    AlphaPlan, BandMap, Product, RasterPlan, ScalingResult, multiproduct_scaling_parameters,
    plan_alpha_mask, resolve_request, scaling_parameters,
};
