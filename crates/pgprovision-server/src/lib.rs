//! # pgprovision-server
//!
//! HTTP hosting for the provisioning endpoint.
//!
//! - [`http`]: request/response types and the [`Handler`] trait
//! - [`server`]: the hyper-based [`HttpServer`] with graceful shutdown
//! - [`handler`]: [`CreateUserHandler`], serving `POST /api/create_user`

pub mod handler;
pub mod http;
pub mod server;
pub mod shutdown;

pub use handler::{CREATE_USER_PATH, CreateUserHandler};
pub use http::{Handler, Request, Response};
pub use server::HttpServer;
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
