//! The storefront facade.
//!
//! [`Storefront`] owns the API and catalog clients, local storage and the
//! [`Store`]. Each async operation moves the matching container through
//! `pending -> fulfilled | rejected` and returns the outcome to the caller.
//!
//! ```rust,ignore
//! let storefront = Storefront::open(StorefrontConfig::from_env()?)?;
//! let product = storefront.fetch_product(ProductId::new(1)).await?;
//! storefront.add_to_cart(&product, 2).await?;
//! let redirect = storefront.checkout(&address_id).await?;
//! ```

mod auth;
mod cart;
mod catalog;
mod checkout;
mod orders;
mod profile;

pub use checkout::CheckoutSummary;

use std::sync::Arc;

use cartwheel_core::{CartItem, User};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::state::{AuthAction, ModalAction, Store};
use crate::storage::{FileStorage, LocalStorage, keys, load_json, store_json};
use crate::tokens::TokenManager;

/// Client-side storefront: remote calls plus the state they drive.
///
/// Cheap to clone; clones share the same store and clients.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    storage: Arc<dyn LocalStorage>,
    api: ApiClient,
    catalog: CatalogClient,
    store: Mutex<Store>,
}

impl Storefront {
    /// Open the storefront with file-backed local storage in
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or an HTTP
    /// client cannot be built.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::open(config.data_dir.clone())?;
        info!(data_dir = %config.data_dir.display(), "Opened local storage");
        Self::with_storage(config, Arc::new(storage))
    }

    /// Open the storefront over any storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let tokens = TokenManager::new(Arc::clone(&storage));
        let api = ApiClient::new(&config, tokens)?;
        let catalog = CatalogClient::new(&config)?;

        let cart: Vec<CartItem> = load_json(storage.as_ref(), keys::CART).unwrap_or_default();
        let user: Option<User> = load_json(storage.as_ref(), keys::USER);
        debug!(
            cart_lines = cart.len(),
            has_user = user.is_some(),
            "Rehydrated local state"
        );

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                storage,
                api,
                catalog,
                store: Mutex::new(Store::hydrate(cart, user)),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// A copy of the whole store.
    pub async fn state(&self) -> Store {
        self.inner.store.lock().await.clone()
    }

    pub async fn dispatch_modal(&self, action: ModalAction) {
        self.inner.store.lock().await.modal.reduce(action);
    }

    async fn store(&self) -> MutexGuard<'_, Store> {
        self.inner.store.lock().await
    }

    fn storage(&self) -> &dyn LocalStorage {
        self.inner.storage.as_ref()
    }

    /// The signed-in user, or `NotAuthenticated` with `message`.
    async fn require_user(&self, message: &'static str) -> Result<User> {
        let store = self.store().await;
        match &store.auth.user {
            Some(user) if store.auth.is_authenticated => Ok(user.clone()),
            _ => Err(StorefrontError::NotAuthenticated(message)),
        }
    }

    /// Apply an auth action and mirror the resulting user into storage.
    async fn dispatch_auth(&self, action: AuthAction) -> Result<()> {
        let mut store = self.store().await;
        store.auth.reduce(action);
        match &store.auth.user {
            Some(user) => store_json(self.storage(), keys::USER, user)?,
            None => self.storage().remove_item(keys::USER)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::state::{OrdersAction, QtyChange};
    use crate::storage::MemoryStorage;
    use cartwheel_core::{
        AddressId, Order, OrderId, OrderStatus, Product, ProductId, SocialProvider,
    };
    use rust_decimal::Decimal;
    use url::Url;

    // Nothing listens here; these tests never reach the network.
    fn config() -> StorefrontConfig {
        StorefrontConfig::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            Url::parse("http://127.0.0.1:9/catalog").unwrap(),
            std::env::temp_dir(),
        )
    }

    fn product(id: u64, price: i64, stock: Option<u32>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            description: String::new(),
            price: Decimal::from(price),
            discount_percentage: Decimal::from(10),
            rating: None,
            stock,
            brand: None,
            category: None,
            thumbnail: None,
            images: Vec::new(),
        }
    }

    fn signed_in_storage() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                keys::USER,
                r#"{"id": "u1", "fullName": "Asha", "email": "asha@example.com"}"#,
            )
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_cart_persists_and_rehydrates() {
        let storage = Arc::new(MemoryStorage::new());
        let storefront = Storefront::with_storage(config(), storage.clone()).unwrap();

        storefront.add_to_cart(&product(1, 20, Some(3)), 2).await.unwrap();
        storefront.add_to_cart(&product(2, 5, None), 1).await.unwrap();
        let cart = storefront
            .toggle_cart_qty(ProductId::new(1), QtyChange::Inc)
            .await
            .unwrap();
        assert_eq!(cart.items_count, 2);
        // 3 x 18.00 + 1 x 4.50
        assert_eq!(cart.total_amount, Decimal::new(5850, 2));
        assert!(storefront.state().await.cart.is_cart_message_on);

        let reopened = Storefront::with_storage(config(), storage).unwrap();
        let cart = reopened.cart().await;
        assert_eq!(cart.total_amount, Decimal::new(5850, 2));
        assert_eq!(cart.find(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_cart_with_message_on() {
        let storefront =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();
        let cart = storefront.add_to_cart(&product(1, 20, None), 1).await.unwrap();
        assert!(cart.is_cart_message_on);
        assert_eq!(cart, storefront.state().await.cart);
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_out_of_stock_and_zero() {
        let storefront =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();
        let err = storefront
            .add_to_cart(&product(1, 20, Some(0)), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidInput(_)));
        assert!(
            storefront
                .add_to_cart(&product(1, 20, None), 0)
                .await
                .is_err()
        );
        assert!(storefront.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_requires_user_and_items() {
        let signed_out =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();
        let err = signed_out
            .checkout(&AddressId::new("a1"))
            .await
            .unwrap_err();
        assert!(err.requires_login());

        let signed_in = Storefront::with_storage(config(), signed_in_storage()).unwrap();
        let err = signed_in.checkout(&AddressId::new("a1")).await.unwrap_err();
        assert!(matches!(err, StorefrontError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_summary_includes_delivery() {
        let storefront =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();
        storefront.add_to_cart(&product(1, 100, None), 1).await.unwrap();
        let summary = storefront.checkout_summary().await;
        assert_eq!(summary.subtotal, Decimal::from(90));
        assert_eq!(summary.delivery_charge, Decimal::from(40));
        assert_eq!(summary.total, Decimal::from(130));
    }

    #[tokio::test]
    async fn test_check_auth_without_token_signs_out() {
        let storage = signed_in_storage();
        let storefront = Storefront::with_storage(config(), storage.clone()).unwrap();
        assert!(storefront.state().await.auth.is_authenticated);

        let err = storefront.check_auth().await.unwrap_err();
        assert!(err.requires_login());

        let state = storefront.state().await;
        assert!(!state.auth.is_authenticated);
        assert_eq!(state.auth.error.as_deref(), Some("No access token"));
        assert!(storage.get_item(keys::USER).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_social_callback_error_and_missing_tokens() {
        let storefront =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();

        let err = storefront
            .complete_social_login("http://localhost:3000/auth/callback?error=access_denied")
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::SocialLogin(ref m) if m == "access_denied"));

        let err = storefront
            .complete_social_login("http://localhost:3000/auth/callback?accessToken=a")
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidInput(_)));
        assert!(!storefront.api().tokens().is_authenticated());

        assert_eq!(
            storefront.social_login_url(SocialProvider::Google),
            "http://127.0.0.1:9/auth/google"
        );
    }

    #[tokio::test]
    async fn test_cancel_refuses_shipped_order_locally() {
        let storefront = Storefront::with_storage(config(), signed_in_storage()).unwrap();
        let shipped = Order {
            id: None,
            order_id: OrderId::new("ORD-1"),
            status: OrderStatus::Shipped,
            items: Vec::new(),
            total_amount: Decimal::from(100),
            delivery_charge: Decimal::from(40),
            shipping_address: None,
            created_at: None,
        };
        storefront
            .store()
            .await
            .orders
            .reduce(OrdersAction::UserOrdersFulfilled(vec![shipped]));

        let err = storefront
            .cancel_order(&OrderId::new("ORD-1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::OrderNotCancellable(OrderStatus::Shipped)
        ));
        assert!(storefront.state().await.orders.cancel_error.is_some());
    }

    #[tokio::test]
    async fn test_register_checks_password_confirmation() {
        let storefront =
            Storefront::with_storage(config(), Arc::new(MemoryStorage::new())).unwrap();
        let err = storefront
            .register_email("Asha", "asha@example.com", "secret1", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
