//! Provisioning against a live PostgreSQL server
//!
//! Requires Docker. Run with `--features integration-tests`.

#![cfg(feature = "integration-tests")]

use futures::future::join_all;
use pgprovision_conf::DatabaseSettings;
use pgprovision_core::PrivilegeTier;
use pgprovision_db::{
	ConnectionProvider, LazyPgProvider, PoolConfig, ProvisionOutcome, RoleProvisioner,
};
use pgprovision_test::fixtures::postgres_container;
use rstest::rstest;
use secrecy::ExposeSecret;
use sqlx::{Connection, PgConnection, raw_sql};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{ContainerAsync, GenericImage};

const CLIENT_BACKENDS_SQL: &str = "SELECT count(*) FROM pg_stat_activity \
	WHERE datname = current_database() AND backend_type = 'client backend'";

#[rstest]
#[tokio::test]
async fn test_provision_against_postgres(
	#[future] postgres_container: (ContainerAsync<GenericImage>, DatabaseSettings),
) {
	let (_container, settings) = postgres_container.await;
	let provider = Arc::new(LazyPgProvider::new(settings, PoolConfig::default()));
	let provisioner = RoleProvisioner::new(Arc::clone(&provider), "postgres");

	let created = provisioner
		.provision("it_reader", "Passw0rd!", Some(PrivilegeTier::ReadOnly))
		.await;
	assert_eq!(created.outcome, ProvisionOutcome::Created, "{}", created.message);
	assert!(provider.is_initialized());

	let again = provisioner
		.provision("it_reader", "Passw0rd!", Some(PrivilegeTier::ReadOnly))
		.await;
	assert_eq!(again.outcome, ProvisionOutcome::AlreadyExists);

	let tricky = provisioner
		.provision("it_owner", "Qu'ote\\1!", Some(PrivilegeTier::Full))
		.await;
	assert_eq!(tricky.outcome, ProvisionOutcome::Created, "{}", tricky.message);

	provider.close().await;
}

#[rstest]
#[tokio::test]
async fn test_concurrent_first_use_builds_one_pool(
	#[future] postgres_container: (ContainerAsync<GenericImage>, DatabaseSettings),
) {
	let (_container, settings) = postgres_container.await;
	let config = PoolConfig::default();
	let max = config.max_connections as i64;
	let provider = Arc::new(LazyPgProvider::new(settings, config));
	assert!(!provider.is_initialized());

	let leases = (0..16).map(|_| {
		let provider = Arc::clone(&provider);
		async move {
			let mut conn = provider.acquire().await.unwrap().into_inner();
			let backends: i64 = sqlx::query_scalar(CLIENT_BACKENDS_SQL)
				.fetch_one(&mut *conn)
				.await
				.unwrap();
			tokio::time::sleep(Duration::from_millis(100)).await;
			backends
		}
	});
	let seen = join_all(leases).await;

	assert!(provider.is_initialized());
	assert_eq!(seen.len(), 16);
	let peak = seen.into_iter().max().unwrap();
	assert!(peak >= 1);
	assert!(peak <= max, "{} client backends open, pool allows {}", peak, max);

	provider.close().await;
}

#[rstest]
#[tokio::test]
async fn test_cancelled_provisioning_is_never_committed(
	#[future] postgres_container: (ContainerAsync<GenericImage>, DatabaseSettings),
) {
	let (_container, settings) = postgres_container.await;
	let url = settings.to_url();
	let mut admin = PgConnection::connect(url.expose_secret()).await.unwrap();
	let provider = Arc::new(LazyPgProvider::new(
		settings,
		PoolConfig::new().with_max_connections(1),
	));
	let provisioner = RoleProvisioner::new(Arc::clone(&provider), "postgres");

	// GRANT ... ON DATABASE waits on this lock, after CREATE ROLE has run.
	raw_sql("BEGIN").execute(&mut admin).await.unwrap();
	raw_sql("LOCK TABLE pg_catalog.pg_database IN EXCLUSIVE MODE")
		.execute(&mut admin)
		.await
		.unwrap();

	let attempt = tokio::time::timeout(
		Duration::from_millis(500),
		provisioner.provision("ghost_role", "Passw0rd!", Some(PrivilegeTier::ReadOnly)),
	)
	.await;
	assert!(attempt.is_err());

	raw_sql("ROLLBACK").execute(&mut admin).await.unwrap();

	let next = provisioner
		.provision("bob_role", "Passw0rd!", Some(PrivilegeTier::Full))
		.await;
	assert_eq!(next.outcome, ProvisionOutcome::Created, "{}", next.message);

	let roles: Vec<String> = sqlx::query_scalar(
		"SELECT rolname::text FROM pg_catalog.pg_roles WHERE rolname IN ('ghost_role', 'bob_role')",
	)
	.fetch_all(&mut admin)
	.await
	.unwrap();
	assert_eq!(roles, vec!["bob_role".to_string()]);

	provider.close().await;
	admin.close().await.unwrap();
}
