//! Integration tests for environment-aware database selection.
//!
//! Every test mutates the process environment, so the whole suite runs
//! under `#[serial]` with a `TestEnv` guard restoring the original state.

use cloudsql_conf::settings::database::{
	CLOUD_SQL_SOCKET_DIR, DatabaseConfig, PLATFORM_INDICATOR_VAR, POSTGRESQL_ENGINE,
};
use cloudsql_conf::settings::env::{Env, EnvError};
use cloudsql_conf::settings::testing::TestEnv;
use rstest::rstest;
use serial_test::serial;

const SELECTION_VARS: &[&str] = &[
	PLATFORM_INDICATOR_VAR,
	"DB_NAME",
	"DB_USER",
	"DB_PASSWORD",
	"DB_HOST",
	"DB_PORT",
	"CLOUD_SQL_CONNECTION_NAME",
];

/// A TestEnv with every selection-relevant variable removed
fn clean_env() -> TestEnv {
	let mut test_env = TestEnv::default();
	for var in SELECTION_VARS {
		test_env.remove_var(*var);
	}
	test_env
}

/// A TestEnv configured like a deployed App Engine instance
fn deployed_env() -> TestEnv {
	let mut test_env = clean_env();
	test_env.set_var(PLATFORM_INDICATOR_VAR, "e~my-project");
	test_env.set_var("DB_NAME", "app");
	test_env.set_var("DB_USER", "svc");
	test_env.set_var("DB_PASSWORD", "secret");
	test_env.set_var("CLOUD_SQL_CONNECTION_NAME", "proj:us-central1:inst1");
	test_env
}

#[test]
#[serial]
fn local_branch_returns_defaults_for_unconfigured_environment() {
	let _guard = clean_env();

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert_eq!(db.engine, POSTGRESQL_ENGINE);
	assert_eq!(db.name, "mydb");
	assert_eq!(db.user, "postgres");
	assert_eq!(db.password, "");
	assert_eq!(db.host, "127.0.0.1");
	assert_eq!(db.port, "5432");
	assert_eq!(db.conn_max_age, 60);
	assert!(db.options.is_empty());
}

#[test]
#[serial]
fn deployed_branch_builds_unix_socket_configuration() {
	let _guard = deployed_env();

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert_eq!(db.name, "app");
	assert_eq!(db.user, "svc");
	assert_eq!(db.password, "secret");
	assert_eq!(db.host, "/cloudsql/proj:us-central1:inst1");
	assert_eq!(db.port, "");
	assert_eq!(db.conn_max_age, 60);
	assert_eq!(
		db.options.get("connect_timeout"),
		Some(&serde_json::json!(10))
	);
}

#[rstest]
#[case("DB_NAME")]
#[case("DB_USER")]
#[case("DB_PASSWORD")]
#[case("CLOUD_SQL_CONNECTION_NAME")]
#[serial]
fn deployed_branch_fails_closed_naming_the_missing_variable(#[case] missing: &str) {
	let mut test_env = deployed_env();
	test_env.remove_var(missing);

	let err = DatabaseConfig::from_env(&Env::new()).unwrap_err();

	match err {
		EnvError::MissingVariable(name) => assert_eq!(name, missing),
		other => panic!("expected MissingVariable, got {other:?}"),
	}
}

#[test]
#[serial]
fn local_branch_never_requires_variables() {
	let mut test_env = clean_env();
	// Only one variable set; the rest must fall back to defaults
	test_env.set_var("DB_PORT", "6543");

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert_eq!(db.port, "6543");
	assert_eq!(db.name, "mydb");
	assert_eq!(db.user, "postgres");
	assert_eq!(db.password, "");
	assert_eq!(db.host, "127.0.0.1");
}

#[test]
#[serial]
fn selection_is_idempotent_over_unchanged_environment() {
	let _guard = deployed_env();
	let env = Env::new();

	let first = DatabaseConfig::from_env(&env).unwrap();
	let second = DatabaseConfig::from_env(&env).unwrap();

	assert_eq!(first, second);
}

#[test]
#[serial]
fn socket_host_and_empty_port_stay_consistent() {
	let _guard = deployed_env();

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert!(db.host.starts_with(CLOUD_SQL_SOCKET_DIR));
	assert!(db.is_unix_socket());
	assert_eq!(db.port, "");
}

#[test]
#[serial]
fn detection_is_by_presence_not_value() {
	let mut test_env = deployed_env();
	// An empty indicator still signals the platform
	test_env.set_var(PLATFORM_INDICATOR_VAR, "");

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert!(db.is_unix_socket());
}

#[test]
#[serial]
fn local_branch_ignores_deployed_only_variables() {
	let mut test_env = clean_env();
	// CLOUD_SQL_CONNECTION_NAME alone must not flip the branch
	test_env.set_var("CLOUD_SQL_CONNECTION_NAME", "proj:us-central1:inst1");

	let db = DatabaseConfig::from_env(&Env::new()).unwrap();

	assert_eq!(db.host, "127.0.0.1");
	assert!(!db.is_unix_socket());
}
