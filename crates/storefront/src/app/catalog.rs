//! Catalog reads feeding the category, product and search containers.

use cartwheel_core::{Category, Product, ProductId, ProductPage};
use tracing::instrument;

use super::Storefront;
use crate::error::Result;
use crate::state::{CategoryAction, ProductAction, SearchAction};

impl Storefront {
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.store()
            .await
            .category
            .reduce(CategoryAction::CategoriesPending);

        let outcome = self.catalog().categories().await;
        let mut store = self.store().await;
        match outcome {
            Ok(categories) => {
                store
                    .category
                    .reduce(CategoryAction::CategoriesFulfilled(categories.clone()));
                Ok(categories)
            }
            Err(e) => {
                store.category.reduce(CategoryAction::CategoriesRejected);
                Err(e.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products_of_category(&self, slug: &str) -> Result<Vec<Product>> {
        self.store()
            .await
            .category
            .reduce(CategoryAction::CategoryProductsPending);

        let outcome = self.catalog().products_of_category(slug).await;
        let mut store = self.store().await;
        match outcome {
            Ok(products) => {
                store
                    .category
                    .reduce(CategoryAction::CategoryProductsFulfilled(products.clone()));
                Ok(products)
            }
            Err(e) => {
                store.category.reduce(CategoryAction::CategoryProductsRejected);
                Err(e.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` (wrapped) for unknown ids.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product> {
        self.store().await.product.reduce(ProductAction::ProductPending);

        let outcome = self.catalog().product(id).await;
        let mut store = self.store().await;
        match outcome {
            Ok(product) => {
                store
                    .product
                    .reduce(ProductAction::ProductFulfilled(Box::new(product.clone())));
                Ok(product)
            }
            Err(e) => {
                store.product.reduce(ProductAction::ProductRejected);
                Err(e.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductPage> {
        self.store().await.product.reduce(ProductAction::ProductsPending);

        let outcome = self.catalog().products(limit, skip).await;
        let mut store = self.store().await;
        match outcome {
            Ok(page) => {
                store
                    .product
                    .reduce(ProductAction::ProductsFulfilled(page.products.clone()));
                Ok(page)
            }
            Err(e) => {
                store.product.reduce(ProductAction::ProductsRejected);
                Err(e.into())
            }
        }
    }

    /// Search the catalog. A blank term clears the results without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Product>> {
        let term = term.trim();
        if term.is_empty() {
            self.store().await.search.reduce(SearchAction::Clear);
            return Ok(Vec::new());
        }
        self.store()
            .await
            .search
            .reduce(SearchAction::Pending(term.to_string()));

        let outcome = self.catalog().search(term).await;
        let mut store = self.store().await;
        match outcome {
            Ok(products) => {
                store.search.reduce(SearchAction::Fulfilled(products.clone()));
                Ok(products)
            }
            Err(e) => {
                store.search.reduce(SearchAction::Rejected);
                Err(e.into())
            }
        }
    }
}
