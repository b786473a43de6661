//! Integration tests for the journal backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository, SqliteStore};
use crate::errors::AppError;
use crate::generation::ContentGenerator;
use crate::{create_router, AppState};

/// Generator returning a canned result.
struct CannedGenerator(Result<String, AppError>);

#[async_trait]
impl ContentGenerator for CannedGenerator {
    async fn generate(&self, _topic: &str) -> Result<String, AppError> {
        self.0.clone()
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::build(
            Some("test-api-key".to_string()),
            Ok("> Generated quiet.".to_string()),
        )
        .await
    }

    async fn with_generator(result: Result<String, AppError>) -> Self {
        Self::build(Some("test-api-key".to_string()), result).await
    }

    async fn build(psk: Option<String>, generated: Result<String, AppError>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(Arc::new(SqliteStore::new(pool))));

        let config = Config {
            api_psk: psk.clone(),
            db_path,
            ephemeral: false,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            generation_api_key: None,
            generation_model: "test-model".to_string(),
            generation_url: "http://127.0.0.1:1".to_string(),
        };

        let state = AppState {
            repo,
            generator: Arc::new(CannedGenerator(generated)),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post_ids(&self) -> Vec<String> {
        let (_, body) = self.get_json("/api/posts").await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }
}

fn post_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "excerpt": "A short summary",
        "content": "First paragraph.\n\n> A quiet quote.",
        "category": category,
        "tags": ["calm", " calm ", "rain"]
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_defaults_are_seeded() {
    let fixture = TestFixture::new().await;

    assert_eq!(fixture.post_ids().await, vec!["1", "2"]);

    let (status, body) = fixture.get_json("/api/photos").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][0]["caption"], "Morning light");
}

#[tokio::test]
async fn test_admin_routes_require_psk() {
    let fixture = TestFixture::new().await;
    let anonymous = Client::new();

    let resp = anonymous
        .post(fixture.url("/api/posts"))
        .json(&post_body("Nope", ""))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let resp = anonymous
        .delete(fixture.url("/api/posts/1"))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = anonymous
        .put(fixture.url("/api/posts/1"))
        .header("Authorization", "Bearer test-api-key")
        .json(&post_body("Bearer edit", "Lifestyle"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Public views stay open
    let resp = anonymous.get(fixture.url("/api/posts")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_admin_routes_open_without_psk() {
    let fixture = TestFixture::build(None, Ok(String::new())).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/posts"))
        .json(&post_body("Open", "Notes"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_post_crud() {
    let fixture = TestFixture::new().await;

    // Create
    let create_resp = fixture
        .client
        .post(fixture.url("/api/posts"))
        .json(&post_body("Test", ""))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let post_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["category"], "General");
    assert_eq!(create_body["data"]["tags"], json!(["calm", "rain"]));
    assert!(create_body["data"]["coverImage"]
        .as_str()
        .unwrap()
        .starts_with("https://picsum.photos/"));

    assert_eq!(fixture.post_ids().await, vec![post_id.as_str(), "1", "2"]);

    // Get
    let (status, body) = fixture.get_json(&format!("/api/posts/{}", post_id)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Test");

    // Update in place
    let update_resp = fixture
        .client
        .put(fixture.url("/api/posts/2"))
        .json(&post_body("Rewritten", "Design"))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    assert_eq!(fixture.post_ids().await, vec![post_id.as_str(), "1", "2"]);
    let (_, body) = fixture.get_json("/api/posts/2").await;
    assert_eq!(body["data"]["title"], "Rewritten");

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/posts/{}", post_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let (status, body) = fixture.get_json(&format!("/api/posts/{}", post_id)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_unknown_id_inserts() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/posts/3"))
        .json(&post_body("Test", ""))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(fixture.post_ids().await, vec!["3", "1", "2"]);
    let (_, body) = fixture.get_json("/api/posts/3").await;
    assert_eq!(body["data"]["category"], "General");

    fixture
        .client
        .delete(fixture.url("/api/posts/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(fixture.post_ids().await, vec!["3", "2"]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let fixture = TestFixture::new().await;

    for _ in 0..2 {
        let resp = fixture
            .client
            .delete(fixture.url("/api/posts/does-not-exist"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(fixture.post_ids().await, vec!["1", "2"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/posts"))
        .json(&json!({ "title": "", "excerpt": "e", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp = fixture
        .client
        .post(fixture.url("/api/photos"))
        .json(&json!({ "url": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/posts"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let resp = fixture
        .client
        .post(fixture.url("/api/photos"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Nothing was written
    assert_eq!(fixture.post_ids().await, vec!["1", "2"]);
}

#[tokio::test]
async fn test_search_and_categories() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/posts?q=MIND").await;
    let found = body["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], "1");

    let (_, body) = fixture.get_json("/api/posts?q=nothing-matches").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = fixture.get_json("/api/categories").await;
    assert_eq!(body["data"], json!(["Lifestyle", "Design"]));
}

#[tokio::test]
async fn test_photo_upload_order() {
    let fixture = TestFixture::new().await;

    for url in ["data:image/png;base64,AAA", "data:image/png;base64,BBB"] {
        let resp = fixture
            .client
            .post(fixture.url("/api/photos"))
            .json(&json!({ "url": url }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["caption"], "Captured Moment");
    }

    let (_, body) = fixture.get_json("/api/photos").await;
    let photos = body["data"].as_array().unwrap();
    assert_eq!(photos.len(), 8);
    assert_eq!(photos[0]["url"], "data:image/png;base64,BBB");
    assert_eq!(photos[1]["url"], "data:image/png;base64,AAA");
    assert_eq!(photos[2]["id"], "1");
}

#[tokio::test]
async fn test_post_blocks_and_preview() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/posts/2/blocks").await;
    assert_eq!(status, 200);
    let blocks = body["data"].as_array().unwrap();
    assert!(blocks
        .iter()
        .any(|b| b["kind"] == "quote" && b["text"] == "Less is more."));

    let (status, _) = fixture.get_json("/api/posts/missing/blocks").await;
    assert_eq!(status, 404);

    let resp = fixture
        .client
        .post(fixture.url("/api/preview"))
        .json(&json!({ "content": "" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"][0]["kind"], "paragraph");
    assert_eq!(body["data"][0]["text"], "Start writing to see content here...");
}

#[tokio::test]
async fn test_generate_appends_to_draft() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/generate"))
        .json(&json!({
            "topic": "rain",
            "draft": { "title": "", "excerpt": "", "content": "Intro." }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["content"], "Intro.\n\n> Generated quiet.");
    assert_eq!(body["data"]["title"], "Reflections on rain");
    assert_eq!(body["data"]["excerpt"], "A short exploration of rain...");

    // Nothing is persisted until the draft is saved
    assert_eq!(fixture.post_ids().await, vec!["1", "2"]);
}

#[tokio::test]
async fn test_generate_failure_is_retryable() {
    let fixture =
        TestFixture::with_generator(Err(AppError::Generation("Missing API key".to_string())))
            .await;

    let resp = fixture
        .client
        .post(fixture.url("/api/generate"))
        .json(&json!({ "topic": "rain" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "GENERATION_ERROR");
    assert_eq!(body["error"]["retryable"], true);

    let resp = fixture
        .client
        .post(fixture.url("/api/generate"))
        .json(&json!({ "topic": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
