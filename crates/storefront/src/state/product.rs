//! Product listing and single-product view.

use cartwheel_core::{LoadStatus, Product};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    ProductsPending,
    ProductsFulfilled(Vec<Product>),
    ProductsRejected,
    ProductPending,
    ProductFulfilled(Box<Product>),
    ProductRejected,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub products: Vec<Product>,
    pub products_status: LoadStatus,
    pub product: Option<Product>,
    pub product_status: LoadStatus,
}

impl ProductState {
    pub fn reduce(&mut self, action: ProductAction) {
        match action {
            ProductAction::ProductsPending => self.products_status = LoadStatus::Loading,
            ProductAction::ProductsFulfilled(products) => {
                self.products = products;
                self.products_status = LoadStatus::Succeeded;
            }
            ProductAction::ProductsRejected => self.products_status = LoadStatus::Failed,
            ProductAction::ProductPending => self.product_status = LoadStatus::Loading,
            ProductAction::ProductFulfilled(product) => {
                self.product = Some(*product);
                self.product_status = LoadStatus::Succeeded;
            }
            ProductAction::ProductRejected => {
                self.product = None;
                self.product_status = LoadStatus::Failed;
            }
        }
    }
}
