//! Request and response types

use async_trait::async_trait;
use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, StatusCode, Uri, Version};
use serde_json::Value;
use std::net::SocketAddr;

/// Fully buffered HTTP request
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			remote_addr: None,
		}
	}

	/// Request path without the query string
	pub fn path(&self) -> &str {
		self.uri.path()
	}
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn internal_server_error() -> Self {
		Self::json(
			StatusCode::INTERNAL_SERVER_ERROR,
			&serde_json::json!({ "error": "Internal server error" }),
		)
	}

	/// JSON response with `Content-Type: application/json`
	///
	/// # Examples
	///
	/// ```
	/// use hyper::StatusCode;
	/// use pgprovision_server::Response;
	///
	/// let response = Response::json(StatusCode::NOT_FOUND, &serde_json::json!({"error": "Not found"}));
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// assert_eq!(response.headers["content-type"], "application/json");
	/// assert_eq!(&response.body[..], br#"{"error":"Not found"}"#);
	/// ```
	pub fn json(status: StatusCode, data: &Value) -> Self {
		Self::new(status).with_json(data)
	}

	pub fn with_json(mut self, data: &Value) -> Self {
		// Serializing a Value cannot fail.
		self.body = Bytes::from(data.to_string());
		self.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self
	}

	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Parse the body as JSON
	pub fn json_body(&self) -> Result<Value, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}
}

/// Error a handler may return instead of a response
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Request handler
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response, HandlerError>;
}
