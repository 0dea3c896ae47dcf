mod common;

use bandscale::{
    DataType, Error, Number, Product, ScalingRequest, multiproduct_scaling_parameters,
    resolve_request,
};
use common::*;
use serde_json::json;

fn products() -> Vec<Product> {
    vec![product("rgba", rgba_bands()), product("rga", rga_bands())]
}

fn resolve(bands: &[&str], scaling: Option<serde_json::Value>) -> bandscale::Result<bandscale::ScalingResult> {
    let scaling = scaling.map(common::scaling);
    multiproduct_scaling_parameters(&products(), bands, None, scaling.as_ref(), None)
}

#[test]
fn band_missing_from_one_product() {
    let err = resolve(&["red", "blue"], None).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownBand { ref band, product: Some(ref product), .. }
            if band == "blue" && product == "rga"
    ));
    assert!(err.to_string().contains("not available"));
}

#[test]
fn no_scaling_widens_across_products() {
    let result = resolve(&["red", "alpha"], None).unwrap();
    assert_eq!(result.scales, None);
    assert_eq!(result.data_type, DataType::Int32);
}

#[test]
fn display_agrees_across_products() {
    let result = resolve(&["red", "alpha"], Some(json!("display"))).unwrap();
    assert_eq!(result.scales, Some(vec![ints([0, 4000, 0, 255]), None]));
    assert_eq!(result.data_type, DataType::Byte);
}

#[test]
fn raw_scales_are_not_collapsed() {
    let result = resolve(&["red", "alpha"], Some(json!("raw"))).unwrap();
    assert_eq!(result.scales, Some(vec![None, None]));
    assert_eq!(result.data_type, DataType::Int32);
}

#[test]
fn physical_ranges_must_match() {
    let result = resolve(&["red"], Some(json!("physical"))).unwrap();
    assert_eq!(
        result.scales,
        Some(vec![nums([
            Number::Int(0),
            Number::Int(10000),
            Number::Float(0.0),
            Number::Float(1.0),
        ])])
    );
    assert_eq!(result.data_type, DataType::Float64);

    let err = resolve(&["red", "green"], Some(json!("physical"))).unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatibleBands { ref band, ref first, ref other }
            if band == "green" && first == "rgba" && other == "rga"
    ));
}

#[test]
fn single_product_matches_single_product_entrypoint() {
    let display = common::scaling(json!("display"));
    let single = bandscale::scaling_parameters(
        &rgba_bands(),
        &["red", "alpha"],
        None,
        Some(&display),
        None,
    )
    .unwrap();
    let multi = multiproduct_scaling_parameters(
        &[product("rgba", rgba_bands())],
        &["red", "alpha"],
        None,
        Some(&display),
        None,
    )
    .unwrap();
    assert_eq!(single, multi);
}

#[test]
fn request_over_several_products_masks_alpha() {
    let request = ScalingRequest {
        scaling: Some(common::scaling(json!([[0, 4000]]))),
        ..ScalingRequest::new(&["red"])
    };
    let plan = resolve_request(&products(), &request).unwrap();
    assert_eq!(plan.bands, vec!["red", "alpha"]);
    assert!(plan.mask_alpha && plan.drop_alpha);
    assert_eq!(plan.scales, Some(vec![ints([0, 4000, 0, 255]), None]));
    assert_eq!(plan.data_type, DataType::Byte);
}
