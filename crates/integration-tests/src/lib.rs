//! In-process mock of the storefront and catalog APIs.
//!
//! [`MockApi::spawn`] binds an axum router to `127.0.0.1:0` and returns a
//! handle that can build a [`Storefront`] pointed at it, flip failure modes
//! and inspect what the client sent.
//!
//! ```rust,ignore
//! let api = MockApi::spawn().await;
//! let (storefront, _dir) = api.storefront();
//! storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await?;
//! api.expire_access_tokens();
//! storefront.fetch_addresses().await?; // refreshes and retries
//! assert_eq!(api.refresh_calls(), 1);
//! ```

#![allow(clippy::missing_panics_doc)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use cartwheel_storefront::{Storefront, StorefrontConfig};
use serde::Deserialize;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;

pub const MOCK_EMAIL: &str = "asha@example.com";
pub const MOCK_PASSWORD: &str = "correct-horse";
pub const MOCK_USER_ID: &str = "u-100";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const CHECKOUT_URL: &str = "https://pay.example.test/session/cs_test_1";

/// Time the refresh endpoint takes, so overlapping refreshes can be observed.
const REFRESH_DELAY: Duration = Duration::from_millis(50);

#[derive(Default)]
struct Inner {
    valid_access: HashSet<String>,
    issued: u32,
    refresh_calls: usize,
    fail_refresh: bool,
    revoke_addresses: bool,
    requests: Vec<String>,
    user: Value,
    addresses: Vec<Value>,
    orders: Vec<Value>,
    checkout_requests: Vec<Value>,
}

impl Inner {
    fn issue_access_token(&mut self) -> String {
        self.issued += 1;
        let token = format!("access-{}", self.issued);
        self.valid_access.insert(token.clone());
        token
    }
}

#[derive(Clone, Default)]
struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, line: impl Into<String>) {
        self.lock().requests.push(line.into());
    }

    /// Check the bearer token; `Err` is the 401 to return.
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        match token {
            Some(token) if self.lock().valid_access.contains(token) => Ok(()),
            _ => Err(error(StatusCode::UNAUTHORIZED, "Access token expired")),
        }
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": "error", "message": message }))).into_response()
}

fn success(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "message": "OK", "data": data }))
}

/// Handle to a running mock API.
pub struct MockApi {
    pub base_url: Url,
    state: MockState,
}

impl MockApi {
    /// Start the mock on an ephemeral port, seeded with one user, one
    /// address and three orders.
    pub async fn spawn() -> Self {
        let state = MockState::default();
        seed(&mut state.lock());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        let app = router(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("mock api url"),
            state,
        }
    }

    pub fn config(&self, data_dir: &std::path::Path) -> StorefrontConfig {
        let catalog_url = self.base_url.join("catalog/").expect("catalog url");
        StorefrontConfig::new(self.base_url.clone(), catalog_url, data_dir.to_path_buf())
    }

    /// A storefront with file storage in a fresh temporary directory. Keep
    /// the directory alive for as long as the storefront is used.
    pub fn storefront(&self) -> (Storefront, TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let storefront = Storefront::open(self.config(dir.path())).expect("open storefront");
        (storefront, dir)
    }

    /// Invalidate every access token issued so far.
    pub fn expire_access_tokens(&self) {
        self.state.lock().valid_access.clear();
    }

    /// Make `POST /auth/refresh-token` answer 401.
    pub fn fail_refresh(&self) {
        self.state.lock().fail_refresh = true;
    }

    /// Mint an access token the way a social provider redirect would.
    pub fn issue_social_tokens(&self) -> (String, String) {
        let access = self.state.lock().issue_access_token();
        (access, REFRESH_TOKEN.to_string())
    }

    /// Make `GET /api/address` answer 401 whatever token is sent.
    pub fn revoke_address_access(&self) {
        self.state.lock().revoke_addresses = true;
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.lock().refresh_calls
    }

    /// `"METHOD path"` for every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    /// Bodies posted to the checkout endpoint.
    pub fn checkout_requests(&self) -> Vec<Value> {
        self.state.lock().checkout_requests.clone()
    }

    pub fn set_order_status(&self, order_id: &str, status: &str) {
        let mut inner = self.state.lock();
        if let Some(order) = inner
            .orders
            .iter_mut()
            .find(|order| order["orderId"] == order_id)
        {
            order["status"] = json!(status);
        }
    }
}

fn seed(inner: &mut Inner) {
    inner.user = json!({
        "id": MOCK_USER_ID,
        "fullName": "Asha Rao",
        "email": MOCK_EMAIL,
        "notificationPreferences": {
            "orderUpdates": true,
            "promotions": false,
            "newsletter": false
        }
    });
    inner.addresses = vec![json!({
        "_id": "addr-1",
        "fullName": "Asha Rao",
        "phoneNumber": "+91 98765 43210",
        "addressLine1": "12 MG Road",
        "addressLine2": "",
        "city": "Bengaluru",
        "state": "Karnataka",
        "postalCode": "560001",
        "country": "India",
        "isDefault": true
    })];
    inner.orders = vec![
        order("ORD-1001", "pending"),
        order("ORD-1002", "shipped"),
        order("ORD-1003", "delivered"),
    ];
}

fn order(id: &str, status: &str) -> Value {
    json!({
        "_id": format!("db-{id}"),
        "orderId": id,
        "status": status,
        "items": [
            { "name": "Essence Mascara Lash Princess", "price": 9.49, "quantity": 2 },
            { "name": "Eyeshadow Palette", "price": 19.99, "quantity": 1 }
        ],
        "totalAmount": 78.97,
        "deliveryCharge": 40,
        "createdAt": "2025-01-15T09:30:00Z"
    })
}

fn products() -> Vec<Value> {
    vec![
        json!({
            "id": 1, "title": "Essence Mascara Lash Princess", "description": "Volumizing mascara",
            "price": 9.99, "discountPercentage": 7.17, "rating": 4.94, "stock": 5,
            "brand": "Essence", "category": "beauty", "thumbnail": "https://cdn.example.test/1.png",
            "images": []
        }),
        json!({
            "id": 2, "title": "Eyeshadow Palette with Mirror", "description": "Six shades",
            "price": 19.99, "discountPercentage": 5.5, "rating": 3.28, "stock": 44,
            "brand": "Glamour Beauty", "category": "beauty", "images": []
        }),
        json!({
            "id": 3, "title": "Annibale Colombo Bed", "description": "Luxurious bed",
            "price": 1899.99, "discountPercentage": 0, "stock": 0,
            "category": "furniture", "images": []
        }),
    ]
}

fn page(products: Vec<Value>) -> Json<Value> {
    let total = products.len();
    Json(json!({ "products": products, "total": total, "skip": 0, "limit": total }))
}

fn router(state: MockState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/register", post(register))
        .route("/auth/verify-email/{token}", get(verify_email))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(check))
        .route("/auth/refresh-token", post(refresh_token))
        .route("/api/address", get(list_addresses).post(add_address))
        .route("/api/address/{id}/default", patch(set_default_address))
        .route("/api/orders/user/{user_id}", get(user_orders))
        .route("/api/orders/{order_id}", get(order_details))
        .route("/api/orders/{order_id}/cancel", post(cancel_order))
        .route("/api/payment/create-checkout-session", post(create_checkout_session))
        .route("/api/profile/update", patch(update_profile))
        .route("/api/profile/change-password", post(change_password))
        .route("/api/profile/notifications", patch(update_notifications))
        .route("/api/profile/delete", delete(delete_account))
        .route("/catalog/products", get(catalog_products))
        .route("/catalog/products/categories", get(catalog_categories))
        .route("/catalog/products/search", get(catalog_search))
        .route("/catalog/products/category/{slug}", get(catalog_category))
        .route("/catalog/products/{id}", get(catalog_product))
        .with_state(state)
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(State(state): State<MockState>, Json(req): Json<LoginRequest>) -> Response {
    state.record("POST /auth/login");
    if req.email != MOCK_EMAIL || req.password != MOCK_PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let mut inner = state.lock();
    let access = inner.issue_access_token();
    success(json!({ "accessToken": access, "refreshToken": REFRESH_TOKEN, "user": inner.user }))
        .into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest {
    full_name: String,
    email: String,
}

async fn signup(State(state): State<MockState>, Json(req): Json<SignupRequest>) -> Response {
    state.record("POST /auth/signup");
    if req.email == MOCK_EMAIL {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    let mut inner = state.lock();
    inner.user = json!({ "id": "u-200", "fullName": req.full_name, "email": req.email });
    let access = inner.issue_access_token();
    success(json!({ "accessToken": access, "refreshToken": REFRESH_TOKEN, "user": inner.user }))
        .into_response()
}

async fn register(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.record("POST /auth/register");
    if body["name"].as_str().is_none() || body["password"].as_str().is_none() {
        return error(StatusCode::BAD_REQUEST, "Missing fields");
    }
    Json(json!({ "status": "success", "message": "Verification email sent" })).into_response()
}

async fn verify_email(State(state): State<MockState>, Path(token): Path<String>) -> Response {
    state.record(format!("GET /auth/verify-email/{token}"));
    if token == "good-token" {
        Json(json!({ "status": "success", "message": "Email verified" })).into_response()
    } else {
        error(StatusCode::BAD_REQUEST, "Invalid or expired verification link")
    }
}

async fn logout(State(state): State<MockState>) -> Json<Value> {
    state.record("POST /auth/logout");
    Json(json!({ "status": "success" }))
}

async fn check(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("GET /auth/check");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let user = state.lock().user.clone();
    Json(json!({ "isAuthenticated": true, "user": user })).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    refresh_token: String,
}

async fn refresh_token(
    State(state): State<MockState>,
    Json(req): Json<RefreshRequest>,
) -> Response {
    state.record("POST /auth/refresh-token");
    tokio::time::sleep(REFRESH_DELAY).await;

    let mut inner = state.lock();
    inner.refresh_calls += 1;
    if inner.fail_refresh || req.refresh_token != REFRESH_TOKEN {
        return error(StatusCode::UNAUTHORIZED, "Invalid refresh token");
    }
    let access = inner.issue_access_token();
    Json(json!({ "accessToken": access })).into_response()
}

// =============================================================================
// Addresses
// =============================================================================

async fn list_addresses(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("GET /api/address");
    if state.lock().revoke_addresses {
        return error(StatusCode::UNAUTHORIZED, "Address access revoked");
    }
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let addresses = state.lock().addresses.clone();
    success(json!(addresses)).into_response()
}

async fn add_address(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    state.record("POST /api/address");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut inner = state.lock();
    body["_id"] = json!(format!("addr-{}", inner.addresses.len() + 1));
    if body["isDefault"] == json!(true) {
        for address in &mut inner.addresses {
            address["isDefault"] = json!(false);
        }
    }
    inner.addresses.push(body.clone());
    success(body).into_response()
}

async fn set_default_address(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.record(format!("PATCH /api/address/{id}/default"));
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut inner = state.lock();
    if !inner.addresses.iter().any(|address| address["_id"] == id) {
        return error(StatusCode::NOT_FOUND, "Address not found");
    }
    for address in &mut inner.addresses {
        address["isDefault"] = json!(address["_id"] == id);
    }
    Json(json!({ "status": "success", "message": "Default address updated" })).into_response()
}

// =============================================================================
// Orders and payment
// =============================================================================

async fn user_orders(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    state.record(format!("GET /api/orders/user/{user_id}"));
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    if user_id != MOCK_USER_ID {
        return Json(json!([])).into_response();
    }
    Json(json!(state.lock().orders)).into_response()
}

async fn order_details(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Response {
    state.record(format!("GET /api/orders/{order_id}"));
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let inner = state.lock();
    inner
        .orders
        .iter()
        .find(|order| order["orderId"] == order_id)
        .map_or_else(
            || error(StatusCode::NOT_FOUND, "Order not found"),
            |order| Json(order.clone()).into_response(),
        )
}

async fn cancel_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Response {
    state.record(format!("POST /api/orders/{order_id}/cancel"));
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut inner = state.lock();
    let Some(order) = inner
        .orders
        .iter_mut()
        .find(|order| order["orderId"] == order_id)
    else {
        return error(StatusCode::NOT_FOUND, "Order not found");
    };
    if order["status"] != "pending" && order["status"] != "processing" {
        return error(StatusCode::BAD_REQUEST, "Order can no longer be cancelled");
    }
    order["status"] = json!("cancelled");
    Json(json!({ "order": order })).into_response()
}

async fn create_checkout_session(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /api/payment/create-checkout-session");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    state.lock().checkout_requests.push(body);
    Json(json!({ "url": CHECKOUT_URL })).into_response()
}

// =============================================================================
// Profile
// =============================================================================

async fn update_profile(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("PATCH /api/profile/update");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut inner = state.lock();
    for field in ["fullName", "email"] {
        if let Some(value) = body.get(field) {
            inner.user[field] = value.clone();
        }
    }
    success(json!({ "user": inner.user })).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange {
    current_password: String,
}

async fn change_password(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<PasswordChange>,
) -> Response {
    state.record("POST /api/profile/change-password");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    if body.current_password != MOCK_PASSWORD {
        return error(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    Json(json!({ "status": "success", "message": "Password updated" })).into_response()
}

async fn update_notifications(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("PATCH /api/profile/notifications");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut inner = state.lock();
    inner.user["notificationPreferences"] = body.clone();
    success(json!({ "notificationPreferences": body })).into_response()
}

async fn delete_account(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("DELETE /api/profile/delete");
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    state.lock().valid_access.clear();
    Json(json!({ "status": "success", "message": "Account deleted" })).into_response()
}

// =============================================================================
// Catalog
// =============================================================================

async fn catalog_categories(State(state): State<MockState>) -> Json<Value> {
    state.record("GET /catalog/products/categories");
    Json(json!([
        { "slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty" },
        "furniture"
    ]))
}

async fn catalog_category(State(state): State<MockState>, Path(slug): Path<String>) -> Json<Value> {
    state.record(format!("GET /catalog/products/category/{slug}"));
    page(
        products()
            .into_iter()
            .filter(|product| product["category"] == slug)
            .collect(),
    )
}

async fn catalog_product(State(state): State<MockState>, Path(id): Path<u64>) -> Response {
    state.record(format!("GET /catalog/products/{id}"));
    products()
        .into_iter()
        .find(|product| product["id"] == id)
        .map_or_else(
            || error(StatusCode::NOT_FOUND, "Product not found"),
            |product| Json(product).into_response(),
        )
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn catalog_search(
    State(state): State<MockState>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    state.record(format!("GET /catalog/products/search?q={}", query.q));
    let needle = query.q.to_lowercase();
    page(
        products()
            .into_iter()
            .filter(|product| {
                product["title"]
                    .as_str()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
            })
            .collect(),
    )
}

async fn catalog_products(State(state): State<MockState>) -> Json<Value> {
    state.record("GET /catalog/products");
    page(products())
}
