//! Session handling against the mock API: login, refresh-and-retry and
//! session expiry.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use cartwheel_integration_tests::{MOCK_EMAIL, MOCK_PASSWORD, MockApi, REFRESH_TOKEN};
use cartwheel_storefront::api::ApiError;
use cartwheel_storefront::storage::keys;
use cartwheel_storefront::{LocalStorage, MemoryStorage, Storefront, StorefrontError};

#[tokio::test]
async fn test_login_stores_tokens_and_user() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();

    let user = storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
    assert_eq!(user.full_name, "Asha Rao");

    let tokens = storefront.api().tokens().get_tokens();
    assert_eq!(tokens.access(), Some("access-1"));
    assert_eq!(tokens.refresh(), Some(REFRESH_TOKEN));

    let state = storefront.state().await;
    assert!(state.auth.is_authenticated);
    assert!(!state.auth.is_loading);
}

#[tokio::test]
async fn test_wrong_password_is_not_refreshed() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();

    let err = storefront.login(MOCK_EMAIL, "nope").await.unwrap_err();
    match &err {
        StorefrontError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.refresh_calls(), 0);

    let state = storefront.state().await;
    assert_eq!(state.auth.error.as_deref(), Some("Invalid email or password"));
    assert!(!storefront.api().tokens().is_authenticated());
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_and_request_retried() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();
    storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();

    api.expire_access_tokens();
    let user = storefront.check_auth().await.unwrap();
    assert_eq!(user.email.as_str(), MOCK_EMAIL);
    assert_eq!(api.refresh_calls(), 1);

    let tokens = storefront.api().tokens().get_tokens();
    assert_eq!(tokens.access(), Some("access-2"));
    assert_eq!(tokens.refresh(), Some(REFRESH_TOKEN));

    let checks = api
        .requests()
        .iter()
        .filter(|line| *line == "GET /auth/check")
        .count();
    assert_eq!(checks, 2);
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();
    storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();

    api.expire_access_tokens();
    api.fail_refresh();

    let err = storefront.fetch_addresses().await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Api(ApiError::SessionExpired)
    ));
    assert!(err.requires_login());
    assert!(!storefront.api().tokens().is_authenticated());
    assert_eq!(api.refresh_calls(), 1);
}

#[tokio::test]
async fn test_retried_request_is_not_refreshed_again() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();
    storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
    api.revoke_address_access();

    let err = storefront.fetch_addresses().await.unwrap_err();
    match &err {
        StorefrontError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Address access revoked");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.refresh_calls(), 1);

    let address_calls = api
        .requests()
        .iter()
        .filter(|line| *line == "GET /api/address")
        .count();
    assert_eq!(address_calls, 2);
    assert_eq!(storefront.api().tokens().get_tokens().access(), Some("access-2"));
}

#[tokio::test]
async fn test_rejected_token_without_refresh_token_expires_session() {
    let api = MockApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item(
            keys::AUTH_TOKENS,
            r#"{"accessToken": "stale-access", "refreshToken": null}"#,
        )
        .unwrap();
    let storefront = Storefront::with_storage(api.config(dir.path()), storage).unwrap();
    assert!(storefront.api().tokens().is_authenticated());

    let err = storefront.api().address().list().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(api.refresh_calls(), 0);
    assert!(!storefront.api().tokens().is_authenticated());
    assert!(storefront.api().tokens().get_tokens().refresh().is_none());
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();
    storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
    api.expire_access_tokens();

    let (a, b, c, d) = tokio::join!(
        storefront.fetch_addresses(),
        storefront.fetch_addresses(),
        storefront.fetch_user_orders(),
        storefront.check_auth(),
    );
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
    assert_eq!(c.unwrap().len(), 3);
    assert!(d.is_ok());
    assert_eq!(api.refresh_calls(), 1);
}

#[tokio::test]
async fn test_check_auth_survives_restart() {
    let api = MockApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    {
        let storefront =
            Storefront::open(api.config(dir.path())).unwrap();
        storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
    }

    let reopened = Storefront::open(api.config(dir.path())).unwrap();
    assert!(reopened.state().await.auth.is_authenticated);
    let user = reopened.check_auth().await.unwrap();
    assert_eq!(user.id.as_str(), "u-100");
}

#[tokio::test]
async fn test_logout_forgets_session() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();
    storefront.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();

    storefront.logout().await.unwrap();
    assert!(!storefront.api().tokens().is_authenticated());
    assert!(!storefront.state().await.auth.is_authenticated);
    assert!(storefront.fetch_addresses().await.unwrap_err().requires_login());
}

#[tokio::test]
async fn test_social_login_callback() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();

    let (access, refresh) = api.issue_social_tokens();
    let callback =
        format!("http://localhost:3000/auth/callback?accessToken={access}&refreshToken={refresh}");
    let user = storefront.complete_social_login(&callback).await.unwrap();
    assert_eq!(user.email.as_str(), MOCK_EMAIL);
    assert!(storefront.state().await.auth.is_authenticated);
}

#[tokio::test]
async fn test_register_and_verify_email() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();

    storefront
        .register_email("Ravi", "ravi@example.com", "s3cret!", "s3cret!")
        .await
        .unwrap();
    assert!(api.requests().contains(&"POST /auth/register".to_string()));

    storefront.verify_email("good-token").await.unwrap();
    let err = storefront.verify_email("stale").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid or expired verification link");
}

#[tokio::test]
async fn test_signup_conflict_message() {
    let api = MockApi::spawn().await;
    let (storefront, _dir) = api.storefront();

    let err = storefront
        .signup("Asha", MOCK_EMAIL, "whatever1")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");

    let user = storefront
        .signup("Mei Lin", "mei@example.com", "whatever1")
        .await
        .unwrap();
    assert_eq!(user.full_name, "Mei Lin");
    assert!(storefront.api().tokens().is_authenticated());
}
