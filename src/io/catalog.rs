use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::api::Product;
use crate::core::params::ScalingRequest;
use crate::error::Result;

/// Band catalog file contents: one product, or a list of products.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductsFile {
    One(Product),
    Many(Vec<Product>),
}

impl ProductsFile {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductsFile::One(product) => vec![product],
            ProductsFile::Many(products) => products,
        }
    }
}

/// Parse products from JSON text.
pub fn read_products(json: &str) -> Result<Vec<Product>> {
    let file: ProductsFile = serde_json::from_str(json)?;
    Ok(file.into_products())
}

/// Load products from a JSON band catalog file.
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    info!("Loading band catalog: {:?}", path);
    let products = read_products(&fs::read_to_string(path)?)?;
    for product in &products {
        debug!("Product {} has {} band(s)", product.id, product.bands.len());
    }
    Ok(products)
}

/// Load a scaling request from a JSON file.
pub fn load_request(path: &Path) -> Result<ScalingRequest> {
    info!("Loading scaling request: {:?}", path);
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn reads_single_product_or_list() {
        let one = read_products(r#"{"id": "p1", "bands": {"red": {"type": "spectral"}}}"#).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, "p1");

        let many = read_products(
            r#"[{"id": "p1", "bands": {}}, {"id": "p2", "bands": {"red": {}}}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert!(many[1].bands.contains_key("red"));
    }

    #[test]
    fn malformed_catalog_is_a_json_error() {
        assert!(matches!(read_products("{\"id\": 3}"), Err(Error::Json(_))));
    }

    #[test]
    fn loads_request_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("request.json");
        fs::write(&path, r#"{"bands": ["red"], "scaling": "display"}"#).unwrap();
        let request = load_request(&path).unwrap();
        assert_eq!(request.bands, vec!["red"]);
        assert_eq!(request.scaling, Some(crate::core::scaling::Scaling::mode("display")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_products(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
