//! Category list and per-category product list.

use cartwheel_core::{Category, LoadStatus, Product};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAction {
    CategoriesPending,
    CategoriesFulfilled(Vec<Category>),
    CategoriesRejected,
    CategoryProductsPending,
    CategoryProductsFulfilled(Vec<Product>),
    CategoryProductsRejected,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub categories_status: LoadStatus,
    pub category_products: Vec<Product>,
    pub category_products_status: LoadStatus,
}

impl CategoryState {
    pub fn reduce(&mut self, action: CategoryAction) {
        match action {
            CategoryAction::CategoriesPending => self.categories_status = LoadStatus::Loading,
            CategoryAction::CategoriesFulfilled(categories) => {
                self.categories = categories;
                self.categories_status = LoadStatus::Succeeded;
            }
            CategoryAction::CategoriesRejected => self.categories_status = LoadStatus::Failed,
            CategoryAction::CategoryProductsPending => {
                self.category_products_status = LoadStatus::Loading;
            }
            CategoryAction::CategoryProductsFulfilled(products) => {
                self.category_products = products;
                self.category_products_status = LoadStatus::Succeeded;
            }
            CategoryAction::CategoryProductsRejected => {
                self.category_products_status = LoadStatus::Failed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state = CategoryState::default();
        state.reduce(CategoryAction::CategoriesPending);
        assert!(state.categories_status.is_loading());

        state.reduce(CategoryAction::CategoriesFulfilled(vec![Category::from_slug("laptops")]));
        assert_eq!(state.categories_status, LoadStatus::Succeeded);
        assert_eq!(state.categories.len(), 1);

        state.reduce(CategoryAction::CategoryProductsRejected);
        assert_eq!(state.category_products_status, LoadStatus::Failed);
        assert_eq!(state.categories_status, LoadStatus::Succeeded);
    }

    #[test]
    fn test_rejection_keeps_previous_list() {
        let mut state = CategoryState::default();
        state.reduce(CategoryAction::CategoriesFulfilled(vec![Category::from_slug("a")]));
        state.reduce(CategoryAction::CategoriesPending);
        state.reduce(CategoryAction::CategoriesRejected);
        assert_eq!(state.categories.len(), 1);
    }
}
