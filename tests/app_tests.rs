//! Service assembly without a reachable database

use bytes::Bytes;
use hyper::{HeaderMap, Method, StatusCode, Uri, Version};
use pgprovision::prelude::*;
use pgprovision_server::Request;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn app() -> App {
	// Nothing listens on this port; requests that reach the pool fail fast.
	let mut database = DatabaseSettings::postgresql("appdb", "admin", "secret", "127.0.0.1");
	database.port = 1;
	App::new(
		database,
		PoolConfig::default().with_acquire_timeout(std::time::Duration::from_millis(200)),
	)
}

fn post(body: &str) -> Request {
	Request::new(
		Method::POST,
		Uri::from_static("/api/create_user"),
		Version::HTTP_11,
		HeaderMap::new(),
		Bytes::from(body.to_string()),
	)
}

#[rstest]
#[tokio::test]
async fn test_validation_errors_do_not_build_pool(app: App) {
	let response = app
		.handler()
		.handle(post(r#"{"username": "alice"}"#))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert!(!app.provider().is_initialized());
}

#[rstest]
#[tokio::test]
async fn test_unreachable_database_is_database_error(app: App) {
	let response = app
		.handler()
		.handle(post(r#"{"username": "alice", "password": "Passw0rd!"}"#))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	let body = response.json_body().unwrap();
	assert_eq!(body["success"], json!(false));
	assert!(body["message"].as_str().unwrap().starts_with("Database error: "));
	assert!(!app.provider().is_initialized());
}
