use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use storefront_server::ApiError;
use storefront_storage::StorageError;

// ── StorageError → ApiError ──────────────────────────────────────

#[test]
fn validation_maps_to_400_with_message() {
    let err = ApiError::from(StorageError::Validation("Invalid product or missing storeId".into()));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "Invalid product or missing storeId");
}

#[test]
fn not_found_maps_to_404() {
    let err = ApiError::from(StorageError::NotFound("Product not found".into()));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.message(), "Product not found");
}

#[test]
fn store_failures_map_to_500() {
    let err = ApiError::from(StorageError::Conflict { expected: 1, actual: 2 });
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.message().contains("expected 1"));

    let err = ApiError::from(StorageError::LockPoisoned);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ── Constructors ─────────────────────────────────────────────────

#[test]
fn constructors_set_status() {
    assert_eq!(ApiError::bad_request("Missing id").status(), StatusCode::BAD_REQUEST);
    let internal = ApiError::internal("catalog task failed");
    assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(internal.message(), "catalog task failed");
}
