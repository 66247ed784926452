//! Testing utilities for settings
//!
//! Provides an isolated environment for tests that read or mutate process
//! environment variables.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment helper
///
/// Records the original value of every variable it touches and restores it
/// on drop. Environment mutation is process-global, so tests using this
/// helper must run under `#[serial]`.
pub struct TestEnv {
	temp_dir: TempDir,
	original_env: HashMap<String, Option<String>>,
	modified_keys: Vec<String>,
}

impl TestEnv {
	/// Create a new test environment
	///
	/// # Examples
	///
	/// ```
	/// use cloudsql_conf::settings::testing::TestEnv;
	///
	/// let mut test_env = TestEnv::new().unwrap();
	/// test_env.set_var("TEST_KEY", "test_value");
	/// assert_eq!(std::env::var("TEST_KEY").unwrap(), "test_value");
	/// // Environment is cleaned up when test_env is dropped
	/// ```
	pub fn new() -> std::io::Result<Self> {
		Ok(Self {
			temp_dir: TempDir::new()?,
			original_env: HashMap::new(),
			modified_keys: Vec::new(),
		})
	}
	/// Get the temporary directory path
	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}
	/// Set an environment variable for this test
	pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::set_var(&key, value.into());
		}
	}
	/// Remove an environment variable for this test
	pub fn remove_var(&mut self, key: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::remove_var(&key);
		}
	}
	/// Create a config file in the temporary directory
	///
	/// # Examples
	///
	/// ```
	/// use cloudsql_conf::settings::testing::TestEnv;
	///
	/// let test_env = TestEnv::new().unwrap();
	/// let config = test_env.create_config_file("app.toml", "debug = true").unwrap();
	/// assert!(config.exists());
	/// ```
	pub fn create_config_file(&self, filename: &str, content: &str) -> std::io::Result<PathBuf> {
		let config_path = self.temp_dir.path().join(filename);
		std::fs::write(&config_path, content)?;
		Ok(config_path)
	}

	fn remember(&mut self, key: &str) {
		if !self.original_env.contains_key(key) {
			self.original_env
				.insert(key.to_string(), env::var(key).ok());
		}
		if !self.modified_keys.contains(&key.to_string()) {
			self.modified_keys.push(key.to_string());
		}
	}
}

impl Drop for TestEnv {
	fn drop(&mut self) {
		// Restore original environment variables
		for key in &self.modified_keys {
			if let Some(original) = self.original_env.get(key) {
				// SAFETY: Restoring environment variables is unsafe in multi-threaded programs.
				// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
				unsafe {
					match original {
						Some(val) => env::set_var(key, val),
						None => env::remove_var(key),
					}
				}
			}
		}
	}
}

impl Default for TestEnv {
	fn default() -> Self {
		Self::new().expect("Failed to create test environment")
	}
}
