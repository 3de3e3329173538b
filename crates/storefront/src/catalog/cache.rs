//! Cache types for catalog responses.

use cartwheel_core::{Category, Product, ProductPage};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Product(Box<Product>),
    Products(ProductPage),
}
