use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use benchmark_api::{build_router, AppConfig, AppState, MockDataConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    data: TempDir,
    _static: TempDir,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(|_| {})
    }

    fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let data = TempDir::new().unwrap();
        let static_dir = TempDir::new().unwrap();
        fs::write(
            static_dir.path().join("index.html"),
            "<html><h1>Computer Vision Algorithm Benchmarks</h1></html>",
        )
        .unwrap();
        fs::create_dir(static_dir.path().join("assets")).unwrap();
        fs::write(static_dir.path().join("assets/app.js"), "console.log('app');").unwrap();

        let mut config = AppConfig {
            data_dir: data.path().to_path_buf(),
            static_dir: static_dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        customize(&mut config);

        Self {
            router: build_router(Arc::new(AppState::new(config))),
            data,
            _static: static_dir,
        }
    }

    fn data_dir(&self) -> &Path {
        self.data.path()
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = self.get(uri).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_raw(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/benchmarks/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(&self, body: &Value) -> (StatusCode, Value) {
        self.post_raw(body.to_string()).await
    }

    fn read_file(&self, name: &str) -> Value {
        let content = fs::read_to_string(self.data_dir().join(name)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

fn ocr_record(name: &str) -> Value {
    json!({
        "algorithm_name": name,
        "dataset_name": "Receipts",
        "dataset_details": {"type": "OCR", "image_count": 120},
        "speed_metrics": {"processing_time_seconds_total": 12.5},
        "accuracy_metrics": {"character_error_rate": 0.04}
    })
}

#[tokio::test]
async fn get_benchmarks_empty_directory_returns_empty_list() {
    let app = TestApp::new();

    let req = Request::builder()
        .uri("/api/benchmarks")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let (_, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_benchmarks_returns_user_data() {
    let app = TestApp::new();
    let content = json!([{"algo": "test_algo", "metric": 100}]);
    fs::write(app.data_dir().join("test_api.json"), content.to_string()).unwrap();

    let (status, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, content);
}

#[tokio::test]
async fn get_benchmarks_missing_directory_returns_empty_list() {
    let app = TestApp::with_config(|config| {
        config.data_dir = config.data_dir.join("does_not_exist");
    });

    let (status, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_benchmarks_serves_fallback_when_user_data_is_empty() {
    let app = TestApp::new();
    fs::write(app.data_dir().join("user.json"), "[]").unwrap();
    fs::write(
        app.data_dir().join("default_mock_data.json"),
        json!([{"id": "d"}]).to_string(),
    )
    .unwrap();

    let (_, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(body, json!([{"id": "d"}]));
}

#[tokio::test]
async fn get_benchmarks_generates_mock_data_when_enabled() {
    let app = TestApp::with_config(|config| {
        config.mock_data = MockDataConfig {
            enabled: true,
            count: 7,
            seed: Some(3),
        };
    });

    let (status, first) = app.get_json("/api/benchmarks").await;
    assert_eq!(status, StatusCode::OK);
    let records = first.as_array().unwrap();
    assert_eq!(records.len(), 7);
    for record in records {
        assert!(record["id"].is_string());
        assert!(record["algorithm_name"].is_string());
        assert!(record["speed_metrics"].is_object());
    }
}

#[tokio::test]
async fn mock_data_does_not_replace_real_records() {
    let app = TestApp::with_config(|config| {
        config.mock_data.enabled = true;
    });
    fs::write(app.data_dir().join("real.json"), json!([{"id": 1}]).to_string()).unwrap();

    let (_, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(body, json!([{"id": 1}]));
}

#[tokio::test]
async fn add_benchmark_creates_type_file() {
    let app = TestApp::new();
    let record = ocr_record("Tesseract");

    let (status, body) = app.post(&record).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());

    assert_eq!(app.read_file("ocr_benchmark_data.json"), json!([record]));
}

#[tokio::test]
async fn add_benchmark_accumulates_in_post_order() {
    let app = TestApp::new();
    let first = json!({"n": 1, "dataset_details": {"type": "Checkerboard"}});
    let second = json!({"n": 2, "dataset_details": {"type": "Checkerboard"}});

    assert_eq!(app.post(&first).await.0, StatusCode::CREATED);
    assert_eq!(app.post(&second).await.0, StatusCode::CREATED);

    assert_eq!(
        app.read_file("checkerboard_benchmark_data.json"),
        json!([first, second])
    );
}

#[tokio::test]
async fn added_benchmarks_are_listed() {
    let app = TestApp::new();
    let record = ocr_record("EasyOCR");
    app.post(&record).await;

    let (_, body) = app.get_json("/api/benchmarks").await;
    assert_eq!(body, json!([record]));
}

#[tokio::test]
async fn add_benchmark_rejects_unknown_type() {
    let app = TestApp::new();
    let (status, body) = app
        .post(&json!({"dataset_details": {"type": "Unknown"}}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown"));
    assert_eq!(fs::read_dir(app.data_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn add_benchmark_rejects_missing_dataset_details() {
    let app = TestApp::new();
    let (status, body) = app.post(&json!({"algorithm_name": "x"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn add_benchmark_rejects_invalid_json() {
    let app = TestApp::new();
    let (status, body) = app.post_raw("{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn add_benchmark_rejects_non_object_body() {
    let app = TestApp::new();
    let (status, _) = app.post(&json!([ocr_record("x")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_benchmark_recovers_corrupt_file() {
    let app = TestApp::new();
    fs::write(app.data_dir().join("ocr_benchmark_data.json"), "{{{ corrupt").unwrap();
    let record = ocr_record("PaddleOCR");

    let (status, _) = app.post(&record).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.read_file("ocr_benchmark_data.json"), json!([record]));
}

#[tokio::test]
async fn add_benchmark_io_failure_is_generic_500() {
    let app = TestApp::new();
    fs::create_dir(app.data_dir().join("ocr_benchmark_data.json")).unwrap();

    let (status, body) = app.post(&ocr_record("x")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains(app.data_dir().to_str().unwrap()));
}

#[tokio::test]
async fn concurrent_adds_are_not_lost() {
    let app = TestApp::new();
    let posts = (0..10).map(|n| {
        let router = app.router.clone();
        let body = json!({"n": n, "dataset_details": {"type": "OCR"}}).to_string();
        async move {
            let req = Request::builder()
                .method(Method::POST)
                .uri("/api/benchmarks/add")
                .body(Body::from(body))
                .unwrap();
            router.oneshot(req).await.unwrap().status()
        }
    });

    let handles: Vec<_> = posts.map(tokio::spawn).collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let stored = app.read_file("ocr_benchmark_data.json");
    assert_eq!(stored.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn api_routes_allow_any_origin() {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/api/benchmarks")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn preflight_for_add_is_answered() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/benchmarks/add")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn index_route_serves_spa() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body)
        .unwrap()
        .contains("<h1>Computer Vision Algorithm Benchmarks</h1>"));
}

#[tokio::test]
async fn unknown_path_falls_back_to_spa() {
    let app = TestApp::new();
    let (status, body) = app.get("/charts/ocr").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Computer Vision"));
}

#[tokio::test]
async fn existing_asset_is_served() {
    let app = TestApp::new();
    let (status, body) = app.get("/assets/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('app');");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/api/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.get_json("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
