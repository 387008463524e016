//! Create-user endpoint
//!
//! `POST /api/create_user` with a JSON body:
//!
//! ```json
//! {"username": "report_reader", "password": "Passw0rd!", "privileges": "readonly"}
//! ```
//!
//! `privileges` is optional and defaults to `readonly`. Every input problem is
//! answered with a 400 before a database connection is requested.

use crate::http::{Handler, HandlerError, Request, Response};
use async_trait::async_trait;
use futures::FutureExt;
use hyper::{Method, StatusCode};
use pgprovision_core::tier::PrivilegeTier;
use pgprovision_core::validators::{check_password, check_username};
use pgprovision_db::{ConnectionProvider, RoleProvisioner};
use serde_json::{Map, Value, json};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Path the endpoint is mounted on
pub const CREATE_USER_PATH: &str = "/api/create_user";

const REQUIRED_FIELDS: [&str; 3] = ["username", "password", "privileges"];

fn invalid_privileges_message() -> String {
	let quoted: Vec<String> = PrivilegeTier::names()
		.iter()
		.map(|name| format!("'{}'", name))
		.collect();
	format!("Invalid privileges. Must be one of: [{}]", quoted.join(", "))
}

fn bad_request(body: Value) -> Response {
	Response::json(StatusCode::BAD_REQUEST, &body)
}

fn body_required() -> Response {
	bad_request(json!({
		"error": "Request body is required",
		"required_fields": REQUIRED_FIELDS,
	}))
}

fn panic_details(payload: &(dyn std::any::Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic".to_string()
	}
}

/// Non-empty string field
fn required_str<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
	body.get(key)
		.and_then(Value::as_str)
		.filter(|value| !value.is_empty())
}

/// Serves [`CREATE_USER_PATH`]
pub struct CreateUserHandler<P> {
	provisioner: Arc<RoleProvisioner<P>>,
}

impl<P: ConnectionProvider + 'static> CreateUserHandler<P> {
	pub fn new(provisioner: Arc<RoleProvisioner<P>>) -> Self {
		Self { provisioner }
	}

	async fn create_user(&self, body: &[u8]) -> Response {
		if body.iter().all(u8::is_ascii_whitespace) {
			return body_required();
		}

		let parsed: Value = match serde_json::from_slice(body) {
			Ok(value) => value,
			Err(e) => {
				tracing::warn!(error = %e, "Rejected request with invalid JSON");
				return bad_request(json!({
					"error": "Invalid JSON in request body",
					"details": e.to_string(),
					"required_fields": REQUIRED_FIELDS,
				}));
			}
		};

		let fields = match parsed.as_object() {
			Some(fields) if !fields.is_empty() => fields,
			_ => return body_required(),
		};

		let (Some(username), Some(password)) =
			(required_str(fields, "username"), required_str(fields, "password"))
		else {
			return bad_request(json!({
				"error": "Missing required parameters",
				"required": ["username", "password"],
				"optional": ["privileges"],
			}));
		};

		let tier = match fields.get("privileges") {
			None => PrivilegeTier::ReadOnly,
			Some(provided) => match serde_json::from_value::<PrivilegeTier>(provided.clone()) {
				Ok(tier) => tier,
				Err(_) => {
					return bad_request(json!({
						"error": invalid_privileges_message(),
						"provided": provided,
						"valid": PrivilegeTier::names(),
					}));
				}
			},
		};

		if let Err(e) = check_username(username) {
			return bad_request(json!({
				"error": "Invalid username",
				"details": e.to_string(),
			}));
		}

		if let Err(e) = check_password(password) {
			return bad_request(json!({
				"error": "Password does not meet strength requirements",
				"details": e.to_string(),
			}));
		}

		let result = self.provisioner.provision(username, password, Some(tier)).await;
		let status = StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		let payload = if result.is_success() {
			json!({
				"success": true,
				"message": result.message,
				"username": username,
				"privileges": tier,
			})
		} else {
			json!({
				"success": false,
				"message": result.message,
			})
		};

		Response::json(status, &payload)
	}
}

#[async_trait]
impl<P: ConnectionProvider + 'static> Handler for CreateUserHandler<P> {
	async fn handle(&self, request: Request) -> Result<Response, HandlerError> {
		if request.path() != CREATE_USER_PATH {
			return Ok(Response::json(StatusCode::NOT_FOUND, &json!({ "error": "Not found" })));
		}

		if request.method != Method::POST {
			return Ok(Response::json(
				StatusCode::METHOD_NOT_ALLOWED,
				&json!({ "error": "Method not allowed" }),
			)
			.with_header("Allow", "POST"));
		}

		let response = match AssertUnwindSafe(self.create_user(&request.body))
			.catch_unwind()
			.await
		{
			Ok(response) => response,
			Err(payload) => {
				let details = panic_details(payload.as_ref());
				tracing::error!(details = %details, "Create-user request panicked");
				Response::json(
					StatusCode::INTERNAL_SERVER_ERROR,
					&json!({
						"error": "Internal server error",
						"details": details,
					}),
				)
			}
		};

		tracing::info!(
			method = %request.method,
			path = request.path(),
			status = response.status.as_u16(),
			"Handled request"
		);
		Ok(response)
	}
}
