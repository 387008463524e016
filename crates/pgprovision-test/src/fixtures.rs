//! Container fixtures
//!
//! Live tests get a disposable PostgreSQL 16 server. The returned settings
//! point at the container's mapped port, not the fixed production port.

use pgprovision_conf::DatabaseSettings;
use rstest::fixture;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Superuser password inside the test container
pub const CONTAINER_PASSWORD: &str = "postgres";

/// Fixture providing a PostgreSQL container and settings to reach it
///
/// # Examples
///
/// ```ignore
/// use pgprovision_test::fixtures::postgres_container;
/// use rstest::*;
///
/// #[rstest]
/// #[tokio::test]
/// async fn test_with_postgres(
///     #[future] postgres_container: (ContainerAsync<GenericImage>, DatabaseSettings),
/// ) {
///     let (_container, settings) = postgres_container.await;
///     assert_eq!(settings.name, "postgres");
/// }
/// ```
#[fixture]
pub async fn postgres_container() -> (ContainerAsync<GenericImage>, DatabaseSettings) {
	let image = GenericImage::new("postgres", "16-alpine")
		.with_exposed_port(5432.tcp())
		.with_wait_for(WaitFor::message_on_stderr(
			"database system is ready to accept connections",
		))
		.with_startup_timeout(Duration::from_secs(120))
		.with_env_var("POSTGRES_PASSWORD", CONTAINER_PASSWORD);

	let container = image
		.start()
		.await
		.expect("Failed to start PostgreSQL container");

	let port = container
		.get_host_port_ipv4(5432)
		.await
		.expect("Failed to get PostgreSQL port");

	let mut settings =
		DatabaseSettings::postgresql("postgres", "postgres", CONTAINER_PASSWORD, "127.0.0.1");
	settings.port = port;

	wait_until_ready(&settings).await;

	(container, settings)
}

// The entrypoint restarts the server once after initdb, so the first
// "ready" message can precede a short outage.
async fn wait_until_ready(settings: &DatabaseSettings) {
	use secrecy::ExposeSecret;
	use sqlx::Connection;

	let url = settings.to_url();
	for attempt in 1..=10 {
		match sqlx::PgConnection::connect(url.expose_secret()).await {
			Ok(conn) => {
				let _ = conn.close().await;
				return;
			}
			Err(e) => {
				eprintln!("PostgreSQL readiness attempt {} failed: {}", attempt, e);
				tokio::time::sleep(Duration::from_millis(200 * attempt)).await;
			}
		}
	}
	panic!("PostgreSQL container never became ready");
}
