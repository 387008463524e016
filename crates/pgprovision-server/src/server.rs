//! HTTP/1.1 server

use crate::http::{Handler, Request, Response};
use crate::shutdown::ShutdownCoordinator;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::StatusCode;
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Largest request body the server buffers
pub const MAX_BODY_BYTES: usize = 64 * 1024;

type ServiceError = Box<dyn std::error::Error + Send + Sync>;

fn payload_too_large() -> Response {
	Response::json(
		StatusCode::PAYLOAD_TOO_LARGE,
		&serde_json::json!({
			"error": "Request body too large",
			"limit": MAX_BODY_BYTES,
		}),
	)
}

fn into_hyper(response: Response) -> Result<hyper::Response<Full<Bytes>>, ServiceError> {
	let mut builder = hyper::Response::builder().status(response.status);
	if let Some(headers) = builder.headers_mut() {
		headers.extend(response.headers);
	}
	Ok(builder.body(Full::new(response.body))?)
}

/// HTTP server dispatching every request to one [`Handler`]
pub struct HttpServer {
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Bind `addr` and serve until `coordinator` requests shutdown
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> std::io::Result<()> {
		let listener = TcpListener::bind(addr).await?;
		self.serve(listener, coordinator).await
	}

	/// Serve an already bound listener until `coordinator` requests shutdown
	///
	/// After shutdown no new connections are accepted. Open connections are
	/// asked to finish their current request and are abandoned once the
	/// grace period runs out.
	pub async fn serve(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> std::io::Result<()> {
		tracing::info!(addr = %listener.local_addr()?, "Server listening");

		let graceful = GracefulShutdown::new();
		let shutdown = coordinator.wait();
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, remote_addr) = match result {
						Ok(accepted) => accepted,
						Err(e) => {
							tracing::warn!(error = %e, "Failed to accept connection");
							continue;
						}
					};
					let service = RequestService {
						handler: Arc::clone(&self.handler),
						remote_addr,
					};
					let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
					let conn = graceful.watch(conn);

					tokio::spawn(async move {
						if let Err(err) = conn.await {
							tracing::debug!(error = %err, %remote_addr, "Connection error");
						}
					});
				}
				_ = &mut shutdown => {
					tracing::info!("Shutdown requested, no longer accepting connections");
					break;
				}
			}
		}

		drop(listener);

		tokio::select! {
			_ = graceful.shutdown() => {
				tracing::info!("All connections closed");
			}
			_ = tokio::time::sleep(coordinator.grace_period()) => {
				tracing::warn!("Grace period elapsed with connections still open");
			}
		}

		Ok(())
	}
}

struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = ServiceError;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = Arc::clone(&self.handler);
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();

			// A declared length over the limit is refused before reading anything.
			if body.size_hint().lower() > MAX_BODY_BYTES as u64 {
				tracing::warn!(%remote_addr, "Rejected oversized request body");
				return into_hyper(payload_too_large());
			}

			let body = match Limited::new(body, MAX_BODY_BYTES).collect().await {
				Ok(collected) => collected.to_bytes(),
				Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
					tracing::warn!(%remote_addr, "Rejected oversized request body");
					return into_hyper(payload_too_large());
				}
				Err(e) => return Err(e),
			};

			let mut request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
			request.remote_addr = Some(remote_addr);

			let response = match handler.handle(request).await {
				Ok(response) => response,
				Err(e) => {
					tracing::error!(error = %e, "Handler failed");
					Response::internal_server_error()
				}
			};

			into_hyper(response)
		})
	}
}
