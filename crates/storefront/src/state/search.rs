//! Search results.

use cartwheel_core::{LoadStatus, Product};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    Pending(String),
    Fulfilled(Vec<Product>),
    Rejected,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub term: String,
    pub products: Vec<Product>,
    pub status: LoadStatus,
}

impl SearchState {
    pub fn reduce(&mut self, action: SearchAction) {
        match action {
            SearchAction::Pending(term) => {
                self.term = term;
                self.status = LoadStatus::Loading;
            }
            SearchAction::Fulfilled(products) => {
                self.products = products;
                self.status = LoadStatus::Succeeded;
            }
            SearchAction::Rejected => {
                self.products.clear();
                self.status = LoadStatus::Failed;
            }
            SearchAction::Clear => *self = Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_records_term_and_clear_resets() {
        let mut state = SearchState::default();
        state.reduce(SearchAction::Pending("phone".to_owned()));
        assert_eq!(state.term, "phone");
        assert!(state.status.is_loading());

        state.reduce(SearchAction::Rejected);
        assert_eq!(state.status, LoadStatus::Failed);

        state.reduce(SearchAction::Clear);
        assert_eq!(state, SearchState::default());
    }
}
