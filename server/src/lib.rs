//! HTTP API for the storefront catalog.
//!
//! Routes:
//! - `GET    /products`: filtered, sorted, paginated listing
//! - `POST   /products`: create from `{ "product": {...} }`
//! - `PUT    /products`: patch from `{ "product": {...} }` (needs `id` and `storeId`)
//! - `DELETE /products?id=&storeId=`: remove (id may also come as `{ "id": ... }`)
//! - `GET    /products/{id}`: one product plus related products
//! - `GET    /health`: liveness and catalog size

mod error;

pub use error::ApiError;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use storefront_query::{Page, QueryParams, RawQueryParams};
use storefront_storage::{Catalog, ProductDetail};
use storefront_types::{Product, coerce};
use tracing::debug;

/// Response body of a successful delete.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeleteResponse {
    pub success: bool,
    pub removed: Product,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct DeleteQuery {
    id: Option<String>,
    store_id: Option<String>,
}

/// Build the HTTP API router over the given catalog.
pub fn build_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/products",
            get(list_handler)
                .post(create_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .route("/products/{id}", get(detail_handler))
        .with_state(catalog)
}

async fn health_handler(State(catalog): State<Catalog>) -> Result<Json<Value>, ApiError> {
    let count = blocking(move || Ok(catalog.count())).await?;
    Ok(Json(json!({ "ok": true, "products": count })))
}

async fn list_handler(
    State(catalog): State<Catalog>,
    Query(raw): Query<RawQueryParams>,
) -> Result<Json<Page<Product>>, ApiError> {
    let params = QueryParams::from(raw);
    debug!(?params, "Listing products");
    let page = blocking(move || Ok(catalog.list(&params))).await?;
    Ok(Json(page))
}

async fn detail_handler(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    let detail = blocking(move || Ok(catalog.detail(&id)?)).await?;
    Ok(Json(detail))
}

async fn create_handler(
    State(catalog): State<Catalog>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let product = product_field(&body)?;
    let created = blocking(move || Ok(catalog.create(product)?)).await?;
    Ok(Json(created))
}

async fn update_handler(
    State(catalog): State<Catalog>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let product = product_field(&body)?;
    let updated = blocking(move || Ok(catalog.update(product)?)).await?;
    Ok(Json(updated))
}

async fn delete_handler(
    State(catalog): State<Catalog>,
    Query(query): Query<DeleteQuery>,
    body: Bytes,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .or_else(|| id_from_body(&body))
        .ok_or_else(|| ApiError::bad_request("Missing id"))?;
    let store_id = query.store_id;

    let removed = blocking(move || Ok(catalog.delete(&id, store_id.as_deref())?)).await?;
    Ok(Json(DeleteResponse {
        success: true,
        removed,
    }))
}

/// Extracts the `product` member of a JSON request body.
///
/// A missing member comes back as `null`, which the catalog rejects as
/// invalid; a body that is not JSON at all is rejected here.
fn product_field(body: &[u8]) -> Result<Value, ApiError> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?;
    Ok(value
        .get_mut("product")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

fn id_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let id = coerce::text_or_empty(value.get("id")?);
    (!id.is_empty()).then_some(id)
}

/// Runs catalog I/O on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("catalog task failed: {e}")))?
}
