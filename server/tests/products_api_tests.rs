use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use storefront_server::{DeleteResponse, build_router};
use storefront_storage::{Catalog, JsonFileStore, MemoryStore, demo_products};
use storefront_types::Product;
use tempfile::TempDir;

fn product(id: &str, price: f64, store: &str) -> Product {
    Product {
        id: id.into(),
        name: format!("Item {id}"),
        price,
        store_id: Some(store.into()),
        ..Default::default()
    }
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server(catalog: Catalog) -> String {
    let app = build_router(catalog);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

async fn spawn_with(products: Vec<Product>) -> String {
    spawn_test_server(Catalog::new(Arc::new(MemoryStore::with_products(products)))).await
}

async fn get_json(url: String) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn ids(body: &Value) -> Vec<&str> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

// ── GET /products ────────────────────────────────────────────────

#[tokio::test]
async fn list_scoped_and_sorted() {
    let base = spawn_with(vec![
        product("a", 30.0, "s1"),
        product("b", 10.0, "s1"),
        product("c", 20.0, "s2"),
    ])
    .await;

    let (status, body) =
        get_json(format!("{base}/products?storeId=s1&sort=price_asc&page=1&limit=12")).await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec!["b", "a"]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 12);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn list_third_page() {
    let catalog: Vec<Product> = (0..25).map(|i| product(&format!("p{i}"), 1.0, "s1")).collect();
    let base = spawn_with(catalog).await;

    let (_, body) = get_json(format!("{base}/products?limit=10&page=3")).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 25);
    assert_eq!(body["totalPages"], 3);
}

#[tokio::test]
async fn list_page_out_of_range() {
    let base = spawn_with(vec![product("a", 1.0, "s1"), product("b", 2.0, "s1")]).await;

    let (status, body) = get_json(format!("{base}/products?page=99")).await;
    assert_eq!(status, 200);
    assert_eq!(body["products"], json!([]));
    assert_eq!(body["total"], 2);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["page"], 99);
}

#[tokio::test]
async fn list_normalizes_bad_paging() {
    let base = spawn_with(vec![product("a", 1.0, "s1")]).await;

    let (status, body) = get_json(format!("{base}/products?page=-2&limit=abc&sort=bogus")).await;
    assert_eq!(status, 200);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 12);
    assert_eq!(ids(&body), vec!["a"]);
}

#[tokio::test]
async fn list_search_and_category() {
    let base = spawn_with(demo_products()).await;

    let (_, body) = get_json(format!("{base}/products?category=electronics&search=CABLE")).await;
    assert_eq!(ids(&body), vec!["prod_2"]);
}

#[tokio::test]
async fn list_content_type_is_json() {
    let base = spawn_with(Vec::new()).await;
    let resp = reqwest::get(format!("{base}/products")).await.unwrap();

    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}

#[tokio::test]
async fn unreadable_catalog_lists_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, "{ definitely not json").unwrap();
    let store = Arc::new(JsonFileStore::open(&path).unwrap());
    let base = spawn_test_server(Catalog::new(store)).await;

    let (status, body) = get_json(format!("{base}/products")).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 1);
}

// ── GET /products/{id} ───────────────────────────────────────────

#[tokio::test]
async fn detail_returns_product_and_related() {
    let base = spawn_with(demo_products()).await;

    let (status, body) = get_json(format!("{base}/products/prod_2")).await;
    assert_eq!(status, 200);
    assert_eq!(body["product"]["name"], "USB-C Cable");
    assert_eq!(body["related"][0]["id"], "prod_1");
}

#[tokio::test]
async fn detail_missing_is_404() {
    let base = spawn_with(demo_products()).await;
    let (status, body) = get_json(format!("{base}/products/nope")).await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());
}

// ── POST / PUT / DELETE ──────────────────────────────────────────

#[tokio::test]
async fn create_list_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path().join("products.json")).unwrap());
    let base = spawn_test_server(Catalog::new(store)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/products"))
        .json(&json!({ "product": { "name": "Beanie", "price": 18, "storeId": "s7" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Product = resp.json().await.unwrap();
    assert!(created.id.starts_with("prod_"));

    let (_, body) = get_json(format!("{base}/products?storeId=s7")).await;
    assert_eq!(ids(&body), vec![created.id.as_str()]);

    let resp = client
        .delete(format!("{base}/products?id={}&storeId=s7", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: DeleteResponse = resp.json().await.unwrap();
    assert!(deleted.success);
    assert_eq!(deleted.removed, created);

    let (_, body) = get_json(format!("{base}/products?storeId=s7")).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn create_without_store_is_400() {
    let base = spawn_with(Vec::new()).await;
    let client = reqwest::Client::new();

    for body in [json!({ "product": { "name": "x" } }), json!({}), json!({ "product": 3 })] {
        let resp = client.post(format!("{base}/products")).json(&body).send().await.unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Invalid product or missing storeId");
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let base = spawn_with(Vec::new()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/products"))
        .header("content-type", "application/json")
        .body("{ nope")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn update_merges_and_checks_store() {
    let base = spawn_with(demo_products()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/products"))
        .json(&json!({ "product": { "id": "prod_3", "storeId": "store_1", "stock": 2 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Product = resp.json().await.unwrap();
    assert_eq!(updated.stock, 2);
    assert_eq!(updated.name, "Hand-Woven Hat");

    let resp = client
        .put(format!("{base}/products"))
        .json(&json!({ "product": { "id": "prod_3", "storeId": "store_2", "stock": 0 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .put(format!("{base}/products"))
        .json(&json!({ "product": { "id": "prod_3" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn delete_accepts_id_in_body() {
    let base = spawn_with(demo_products()).await;
    let resp = reqwest::Client::new()
        .delete(format!("{base}/products"))
        .json(&json!({ "id": "prod_1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: DeleteResponse = resp.json().await.unwrap();
    assert_eq!(deleted.removed.id, "prod_1");
}

#[tokio::test]
async fn delete_errors() {
    let base = spawn_with(demo_products()).await;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{base}/products")).send().await.unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .delete(format!("{base}/products?id=prod_1&storeId=store_2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/products?id=ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

// ── Misc ─────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_catalog_size() {
    let base = spawn_with(demo_products()).await;
    let (status, body) = get_json(format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "ok": true, "products": 3 }));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = spawn_with(Vec::new()).await;
    let resp = reqwest::get(format!("{base}/api/v1/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), 404);
}
