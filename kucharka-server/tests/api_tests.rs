//! Integration tests for kucharka-server API endpoints
//!
//! Each test gets its own temporary data folder, so tests run in parallel.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use kucharka_common::config::DataFolderInitializer;
use kucharka_server::{build_router, AppState};

/// Test helper: data folder with the given recipes and ingredients
async fn setup_app(recipes: Value, ingredients: Value) -> (axum::Router, TempDir) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let initializer = DataFolderInitializer::new(dir.path().to_path_buf());
    std::fs::write(initializer.recipes_path(), recipes.to_string()).unwrap();
    std::fs::write(initializer.ingredients_path(), ingredients.to_string()).unwrap();

    let state = AppState::for_data_folder(&initializer);
    (build_router(state), dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn stored(dir: &TempDir, file: &str) -> Value {
    serde_json::from_str(&std::fs::read_to_string(dir.path().join(file)).unwrap()).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "kucharka-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app.oneshot(get("/build_info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Recipe listing
// =============================================================================

#[tokio::test]
async fn test_list_recipes_first_page() {
    let (app, _dir) = setup_app(
        json!([{"id": "1", "name": "Soup"}, {"id": "2", "name": "Salad"}]),
        json!([]),
    )
    .await;

    let response = app
        .oneshot(get("/recipe/list?page-size=12&page-number=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["itemList"], json!([{"id": "1", "name": "Soup"}, {"id": "2", "name": "Salad"}]));
    assert_eq!(
        body["pageInfo"],
        json!({"pageNumber": 1, "pageSize": 12, "total": 2, "totalPages": 1})
    );
}

#[tokio::test]
async fn test_list_recipes_text_filter() {
    let (app, _dir) = setup_app(
        json!([{"id": "1", "name": "Soup"}, {"id": "2", "name": "Salad"}]),
        json!([]),
    )
    .await;

    let response = app
        .oneshot(get("/recipe/list?text=sal&page-size=12&page-number=1"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["itemList"], json!([{"id": "2", "name": "Salad"}]));
    assert_eq!(body["pageInfo"]["total"], 1);
}

#[tokio::test]
async fn test_list_recipes_invalid_page_size() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app
        .oneshot(get("/recipe/list?page-size=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_list_recipes_malformed_page_number() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app
        .oneshot(get("/recipe/list?page-number=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_input");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_recipes_missing_storage_is_server_error() {
    let (app, dir) = setup_app(json!([]), json!([])).await;
    std::fs::remove_file(dir.path().join("recipes.json")).unwrap();

    let response = app.oneshot(get("/recipe/list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "storage_read_failed");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Unable to read from storage."));
    assert!(!dir.path().join("recipes.json").exists());
}

// =============================================================================
// Recipe detail
// =============================================================================

#[tokio::test]
async fn test_get_recipe() {
    let (app, _dir) = setup_app(json!([{"id": "1", "name": "Soup"}]), json!([])).await;

    let response = app.clone().oneshot(get("/recipe/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["name"], "Soup");

    let response = app.oneshot(get("/recipe/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Recipe create
// =============================================================================

#[tokio::test]
async fn test_create_recipe() {
    let (app, dir) = setup_app(json!([]), json!([{"id": "egg", "name": "Vejce"}])).await;

    let response = app
        .oneshot(post_json(
            "/recipe/create",
            json!({
                "userId": "user-1",
                "data": {
                    "name": "Omeleta",
                    "ingredients": [{"id": "egg", "amount": 3}],
                    "steps": ["Rozšlehat", "Osmažit"]
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Omeleta");
    assert_eq!(body["authorId"], "user-1");
    let id = body["id"].as_str().unwrap().to_string();

    let stored = stored(&dir, "recipes.json");
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_create_recipe_unknown_ingredient() {
    let (app, dir) = setup_app(json!([]), json!([])).await;

    let response = app
        .oneshot(post_json(
            "/recipe/create",
            json!({"userId": "u", "data": {"name": "Omeleta", "ingredients": [{"id": "egg"}]}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("egg"));
    assert_eq!(stored(&dir, "recipes.json"), json!([]));
}

#[tokio::test]
async fn test_create_recipe_blank_name() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app
        .oneshot(post_json(
            "/recipe/create",
            json!({"userId": "u", "data": {"name": "   "}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Recipe delete
// =============================================================================

#[tokio::test]
async fn test_delete_recipe() {
    let (app, dir) = setup_app(
        json!([{"id": "1", "name": "Soup"}, {"id": "2", "name": "Salad"}]),
        json!([]),
    )
    .await;

    let response = app
        .oneshot(post_json("/recipe/delete", json!({"userId": "u", "id": "1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({}));

    assert_eq!(stored(&dir, "recipes.json"), json!([{"id": "2", "name": "Salad"}]));
}

#[tokio::test]
async fn test_delete_unknown_recipe_is_ok() {
    let (app, dir) = setup_app(json!([{"id": "1", "name": "Soup"}]), json!([])).await;

    let response = app
        .oneshot(post_json("/recipe/delete", json!({"userId": "u", "id": "9"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(stored(&dir, "recipes.json"), json!([{"id": "1", "name": "Soup"}]));
}

#[tokio::test]
async fn test_delete_without_id_is_invalid_input() {
    let (app, dir) = setup_app(json!([{"id": "1", "name": "Soup"}]), json!([])).await;

    let response = app
        .oneshot(post_json("/recipe/delete", json!({"userId": "u"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(stored(&dir, "recipes.json"), json!([{"id": "1", "name": "Soup"}]));
}

#[tokio::test]
async fn test_create_with_textual_amount_is_invalid_input() {
    let (app, dir) = setup_app(json!([]), json!([{"id": "egg", "name": "Vejce"}])).await;

    let response = app
        .oneshot(post_json(
            "/recipe/create",
            json!({"userId": "u", "data": {"name": "Omeleta", "ingredients": [{"id": "egg", "amount": "tři"}]}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response.into_body()).await["error"], "invalid_input");
    assert_eq!(stored(&dir, "recipes.json"), json!([]));
}

#[tokio::test]
async fn test_create_with_non_json_body_is_invalid_input() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let request = Request::builder()
        .method("POST")
        .uri("/recipe/create")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response.into_body()).await["error"], "invalid_input");
}

// =============================================================================
// Ingredients
// =============================================================================

#[tokio::test]
async fn test_ingredient_create_and_list() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let response = app
        .clone()
        .oneshot(post_json("/ingredient/create", json!({"userId": "u", "name": "Sůl"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = extract_json(response.into_body()).await;
    assert_eq!(created["name"], "Sůl");

    let response = app.oneshot(get("/ingredient/list")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["itemList"].as_array().unwrap().len(), 1);
    assert_eq!(body["itemList"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_ingredient_duplicate_conflicts() {
    let (app, _dir) = setup_app(json!([]), json!([{"id": "s", "name": "Sůl"}])).await;

    let response = app
        .oneshot(post_json("/ingredient/create", json!({"userId": "u", "name": "sůl"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(extract_json(response.into_body()).await["error"], "conflict");
}

#[tokio::test]
async fn test_ingredient_create_without_content_type_is_invalid_input() {
    let (app, _dir) = setup_app(json!([]), json!([])).await;

    let request = Request::builder()
        .method("POST")
        .uri("/ingredient/create")
        .body(Body::from(json!({"userId": "u", "name": "Pepř"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response.into_body()).await["error"], "invalid_input");
}
