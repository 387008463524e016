//! Provisioner behavior against scripted connections

use pgprovision_core::PrivilegeTier;
use pgprovision_db::{PoolError, ProvisionOutcome, RoleProvisioner};
use pgprovision_test::{FailureKind, FakeProvider, Script, Step};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

fn provisioner(script: Script) -> (Arc<FakeProvider>, RoleProvisioner<FakeProvider>) {
	let provider = Arc::new(FakeProvider::new(script));
	let provisioner = RoleProvisioner::new(Arc::clone(&provider), "appdb");
	(provider, provisioner)
}

#[rstest]
#[tokio::test]
async fn test_creates_role_with_readonly_grants() {
	let (provider, provisioner) = provisioner(Script::new());

	let result = provisioner
		.provision("report_reader", "Passw0rd!", Some(PrivilegeTier::ReadOnly))
		.await;

	assert_eq!(result.outcome, ProvisionOutcome::Created);
	assert_eq!(result.status_code, 201);
	assert_eq!(
		result.message,
		"User 'report_reader' created successfully with readonly privileges"
	);

	let journal = provider.journal();
	assert_eq!(
		journal.statements,
		vec![
			r#"CREATE ROLE "report_reader" WITH LOGIN PASSWORD 'Passw0rd!'"#,
			r#"GRANT CONNECT ON DATABASE "appdb" TO "report_reader""#,
			r#"GRANT USAGE ON SCHEMA "public" TO "report_reader""#,
			r#"GRANT SELECT ON ALL TABLES IN SCHEMA "public" TO "report_reader""#,
		]
	);
	assert_eq!(journal.lookups, vec!["report_reader"]);
	assert_eq!(journal.begins, 1);
	assert_eq!(journal.commits, 1);
	assert_eq!(journal.rollbacks, 0);
	assert_eq!(journal.acquires, 1);
	assert_eq!(journal.releases, 1);
	assert_eq!(journal.discards, 0);
}

#[rstest]
#[tokio::test]
async fn test_missing_tier_grants_full() {
	let (provider, provisioner) = provisioner(Script::new());

	let result = provisioner.provision("owner_1", "Passw0rd!", None).await;

	assert_eq!(
		result.message,
		"User 'owner_1' created successfully with full privileges"
	);
	assert_eq!(
		provider.journal().grant_statements(),
		vec![r#"GRANT ALL PRIVILEGES ON DATABASE "appdb" TO "owner_1""#]
	);
}

#[rstest]
#[tokio::test]
async fn test_password_is_escaped() {
	let (provider, provisioner) = provisioner(Script::new());

	provisioner
		.provision("quoted", "O'Brien\\1A!", Some(PrivilegeTier::Full))
		.await;

	assert_eq!(
		provider.journal().create_statements(),
		vec![r#"CREATE ROLE "quoted" WITH LOGIN PASSWORD E'O''Brien\\1A!'"#]
	);
}

#[rstest]
#[tokio::test]
async fn test_second_provision_of_same_name_conflicts() {
	let (provider, provisioner) = provisioner(Script::new());

	let first = provisioner
		.provision("alice", "Passw0rd!", Some(PrivilegeTier::ReadWrite))
		.await;
	let before = provider.journal().statements.len();
	let second = provisioner
		.provision("alice", "Passw0rd!", Some(PrivilegeTier::ReadWrite))
		.await;

	assert_eq!(first.outcome, ProvisionOutcome::Created);
	assert_eq!(second.outcome, ProvisionOutcome::AlreadyExists);
	assert_eq!(second.status_code, 409);
	assert_eq!(second.message, "User 'alice' already exists");

	let journal = provider.journal();
	assert_eq!(journal.statements.len(), before);
	assert_eq!(journal.rollbacks, 1);
	assert_eq!(journal.releases, 2);
}

#[rstest]
#[tokio::test]
async fn test_existing_role_issues_no_statements() {
	let (provider, provisioner) = provisioner(Script::new().with_existing_role("taken"));

	let result = provisioner.provision("taken", "Passw0rd!", None).await;

	assert_eq!(result.outcome, ProvisionOutcome::AlreadyExists);
	let journal = provider.journal();
	assert!(journal.statements.is_empty());
	assert_eq!(journal.commits, 0);
	assert_eq!(journal.rollbacks, 1);
	assert_eq!(journal.releases, 1);
}

#[rstest]
#[case(Step::Execute(2), FailureKind::Database, ProvisionOutcome::DatabaseError)]
#[case(Step::Execute(0), FailureKind::Database, ProvisionOutcome::DatabaseError)]
#[case(Step::RoleExists, FailureKind::Database, ProvisionOutcome::DatabaseError)]
#[case(Step::Commit, FailureKind::Database, ProvisionOutcome::DatabaseError)]
#[case(Step::Execute(1), FailureKind::Other, ProvisionOutcome::UnexpectedError)]
#[case(Step::Execute(1), FailureKind::Panic, ProvisionOutcome::UnexpectedError)]
#[tokio::test]
async fn test_failure_rolls_back_once_and_releases_once(
	#[case] step: Step,
	#[case] kind: FailureKind,
	#[case] expected: ProvisionOutcome,
) {
	let (provider, provisioner) = provisioner(Script::new().fail_at(step, kind));

	let result = provisioner
		.provision("victim", "Passw0rd!", Some(PrivilegeTier::ReadOnly))
		.await;

	assert_eq!(result.outcome, expected);
	assert_eq!(result.status_code, 500);

	let journal = provider.journal();
	assert_eq!(journal.rollbacks, 1);
	assert_eq!(journal.releases + journal.discards, 1);
	assert!(!journal.roles.contains("victim"));
}

#[rstest]
#[tokio::test]
async fn test_database_failure_message_and_discard() {
	let (provider, provisioner) =
		provisioner(Script::new().fail_at(Step::Execute(1), FailureKind::Database));

	let result = provisioner
		.provision("victim", "Passw0rd!", Some(PrivilegeTier::ReadOnly))
		.await;

	assert!(result.message.starts_with("Database error: "));
	let journal = provider.journal();
	assert_eq!(journal.discards, 1);
	assert_eq!(journal.releases, 0);
}

#[rstest]
#[tokio::test]
async fn test_panic_reported_as_unexpected_error() {
	let (provider, provisioner) =
		provisioner(Script::new().fail_at(Step::Execute(0), FailureKind::Panic));

	let result = provisioner.provision("victim", "Passw0rd!", None).await;

	assert_eq!(result.outcome, ProvisionOutcome::UnexpectedError);
	assert!(result.message.starts_with("Unexpected error: "));
	assert!(result.message.contains("scripted panic"));
	assert_eq!(provider.journal().releases, 1);
}

#[rstest]
#[tokio::test]
async fn test_failed_rollback_is_swallowed_and_connection_discarded() {
	let (provider, provisioner) =
		provisioner(Script::new().fail_at(Step::Rollback, FailureKind::Database).with_existing_role("taken"));

	let result = provisioner.provision("taken", "Passw0rd!", None).await;

	assert_eq!(result.outcome, ProvisionOutcome::AlreadyExists);
	let journal = provider.journal();
	assert_eq!(journal.discards, 1);
	assert_eq!(journal.releases, 0);
}

#[rstest]
#[case(PoolError::Exhausted(Duration::from_secs(5)), ProvisionOutcome::DatabaseError)]
#[case(PoolError::ConnectionFailed("refused".into()), ProvisionOutcome::DatabaseError)]
#[case(PoolError::Config("min > max".into()), ProvisionOutcome::UnexpectedError)]
#[tokio::test]
async fn test_acquire_failure(#[case] err: PoolError, #[case] expected: ProvisionOutcome) {
	let (provider, provisioner) = provisioner(Script::new().fail_acquire(err));

	let result = provisioner.provision("nobody", "Passw0rd!", None).await;

	assert_eq!(result.outcome, expected);
	assert_eq!(result.status_code, 500);
	let journal = provider.journal();
	assert_eq!(journal.acquires, 0);
	assert_eq!(journal.releases + journal.discards, 0);
}

#[rstest]
#[case("1abc")]
#[case("bad\"name")]
#[case("")]
#[tokio::test]
async fn test_invalid_username_never_reaches_database(#[case] username: &str) {
	let (provider, provisioner) = provisioner(Script::new());

	let result = provisioner.provision(username, "Passw0rd!", None).await;

	assert_eq!(result.outcome, ProvisionOutcome::ValidationFailed);
	assert_eq!(result.status_code, 400);
	assert_eq!(provider.journal().acquires, 0);
}

#[rstest]
#[case(Step::RoleExists)]
#[case(Step::Execute(1))]
#[case(Step::Commit)]
#[tokio::test]
async fn test_cancelled_provisioning_abandons_connection(#[case] step: Step) {
	let (provider, provisioner) = provisioner(Script::new().fail_at(step, FailureKind::Stall));

	let attempt = tokio::time::timeout(
		Duration::from_millis(50),
		provisioner.provision("ghost_role", "Passw0rd!", Some(PrivilegeTier::ReadOnly)),
	)
	.await;

	assert!(attempt.is_err());
	let journal = provider.journal();
	assert_eq!(journal.acquires, 1);
	assert_eq!(journal.begins, 1);
	assert_eq!(journal.commits, 0);
	assert_eq!(journal.abandons, 1);
	assert_eq!(journal.releases + journal.discards, 0);
	assert!(!journal.roles.contains("ghost_role"));
}

#[rstest]
#[tokio::test]
async fn test_completed_provisioning_never_abandons() {
	let (provider, provisioner) = provisioner(Script::new());

	let attempt = tokio::time::timeout(
		Duration::from_secs(5),
		provisioner.provision("finished", "Passw0rd!", Some(PrivilegeTier::Full)),
	)
	.await;

	assert!(attempt.is_ok());
	let journal = provider.journal();
	assert_eq!(journal.abandons, 0);
	assert_eq!(journal.releases, 1);
	assert!(journal.roles.contains("finished"));
}
