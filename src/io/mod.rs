//! I/O layer for reading product band catalogs and scaling requests from
//! JSON files. The resolution engine itself never touches the filesystem.
pub mod catalog;
pub use catalog::{ProductsFile, load_products, load_request, read_products};
