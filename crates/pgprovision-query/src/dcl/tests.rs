//! Tests for DCL statement builders

use super::*;
use rstest::rstest;

mod privilege_tests {
	use super::*;

	#[rstest]
	#[case(Privilege::Select, "SELECT")]
	#[case(Privilege::Insert, "INSERT")]
	#[case(Privilege::Update, "UPDATE")]
	#[case(Privilege::Delete, "DELETE")]
	#[case(Privilege::Create, "CREATE")]
	#[case(Privilege::All, "ALL PRIVILEGES")]
	#[case(Privilege::Usage, "USAGE")]
	#[case(Privilege::Connect, "CONNECT")]
	fn test_privilege_as_sql(#[case] privilege: Privilege, #[case] expected: &str) {
		assert_eq!(privilege.as_sql(), expected);
	}

	#[rstest]
	#[case(Privilege::Connect, ObjectType::Database, true)]
	#[case(Privilege::All, ObjectType::Database, true)]
	#[case(Privilege::Usage, ObjectType::Schema, true)]
	#[case(Privilege::Create, ObjectType::Schema, true)]
	#[case(Privilege::Delete, ObjectType::AllTablesInSchema, true)]
	#[case(Privilege::Connect, ObjectType::Schema, false)]
	#[case(Privilege::Usage, ObjectType::AllTablesInSchema, false)]
	#[case(Privilege::Select, ObjectType::Database, false)]
	fn test_privilege_object_compatibility(
		#[case] privilege: Privilege,
		#[case] object_type: ObjectType,
		#[case] expected: bool,
	) {
		assert_eq!(privilege.is_valid_for_object(object_type), expected);
	}
}

mod grant_statement_tests {
	use super::*;

	#[rstest]
	fn test_grant_builder_collects_parts() {
		let stmt = GrantStatement::new()
			.privilege(Privilege::Select)
			.privilege(Privilege::Insert)
			.on_all_tables_in_schema("public")
			.to("app_user");

		assert_eq!(stmt.privileges, vec![Privilege::Select, Privilege::Insert]);
		assert_eq!(stmt.object_type, Some(ObjectType::AllTablesInSchema));
		assert_eq!(stmt.objects[0].as_str(), "public");
		assert_eq!(stmt.grantees[0].as_str(), "app_user");
	}

	#[rstest]
	fn test_grant_validate_ok() {
		let stmt = GrantStatement::new()
			.privilege(Privilege::Connect)
			.on_database("app")
			.to("app_user");
		assert!(stmt.validate().is_ok());
	}

	#[rstest]
	fn test_grant_validate_no_privileges() {
		let stmt = GrantStatement::new().on_database("app").to("app_user");
		assert_eq!(
			stmt.validate().unwrap_err(),
			"At least one privilege must be specified"
		);
	}

	#[rstest]
	fn test_grant_validate_no_objects() {
		let stmt = GrantStatement::new()
			.privilege(Privilege::Select)
			.to("app_user");
		assert_eq!(
			stmt.validate().unwrap_err(),
			"At least one object must be specified"
		);
	}

	#[rstest]
	fn test_grant_validate_no_grantees() {
		let stmt = GrantStatement::new()
			.privilege(Privilege::Select)
			.on_all_tables_in_schema("public");
		assert_eq!(
			stmt.validate().unwrap_err(),
			"At least one grantee must be specified"
		);
	}

	#[rstest]
	fn test_grant_validate_rejects_incompatible_privilege() {
		let stmt = GrantStatement::new()
			.privilege(Privilege::Select)
			.on_database("app")
			.to("app_user");
		let err = stmt.validate().unwrap_err();
		assert!(err.contains("not valid for object type"));
	}
}

mod create_role_tests {
	use super::*;

	#[rstest]
	fn test_create_role_validate_ok() {
		let stmt = CreateRoleStatement::new()
			.role("app_user")
			.attribute(RoleAttribute::Login)
			.attribute(RoleAttribute::Password("x".to_string()));
		assert!(stmt.validate().is_ok());
	}

	#[rstest]
	fn test_create_role_empty_name() {
		let stmt = CreateRoleStatement::new().attribute(RoleAttribute::Login);
		assert_eq!(stmt.validate().unwrap_err(), "Role name cannot be empty");
	}

	#[rstest]
	fn test_create_role_duplicate_password() {
		let stmt = CreateRoleStatement::new().role("u").attributes(vec![
			RoleAttribute::Password("a".to_string()),
			RoleAttribute::Password("b".to_string()),
		]);
		assert!(stmt.validate().is_err());
	}

	#[rstest]
	fn test_create_role_redacted_keeps_other_attributes() {
		let stmt = CreateRoleStatement::new()
			.role("u")
			.attribute(RoleAttribute::Password("Secret1!".to_string()))
			.attribute(RoleAttribute::Login);
		let redacted = stmt.redacted();
		assert_eq!(redacted.role_name, "u");
		assert_eq!(
			redacted.attributes,
			vec![RoleAttribute::Password("***".to_string()), RoleAttribute::Login]
		);
		assert_eq!(stmt.attributes[0], RoleAttribute::Password("Secret1!".to_string()));
	}

	#[rstest]
	fn test_role_attribute_debug_hides_password() {
		let rendered = format!("{:?}", RoleAttribute::Password("Secret1!".to_string()));
		assert!(!rendered.contains("Secret1!"));
	}
}
