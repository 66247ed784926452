//! Environment variable handling module
//!
//! Provides django-environ style access to the process environment with
//! typed lookups. Required lookups fail with the missing variable named;
//! optional lookups take a literal default.

use std::env;

/// Environment variable reader
///
/// A thin handle over the process environment. Constructing it performs no
/// work; every lookup reads the environment directly, so repeated lookups
/// against an unchanged environment always agree.
#[derive(Debug, Clone, Default)]
pub struct Env {
	_private: (),
}

impl Env {
	/// Create a new Env instance
	pub fn new() -> Self {
		Self { _private: () }
	}

	/// Check whether a variable is present, regardless of its value
	///
	/// This is the detection probe: it never errors, and an empty value
	/// still counts as present. Invalid names simply report absent.
	pub fn is_set(&self, key: &str) -> bool {
		if validate_env_var_name(key).is_err() {
			return false;
		}
		env::var_os(key).is_some()
	}
	/// Read a required string value from environment
	///
	/// # Examples
	///
	/// ```
	/// use cloudsql_conf::settings::env::{Env, EnvError};
	///
	/// let env = Env::new();
	/// let err = env.str("CLOUDSQL_CONF_NO_SUCH_VAR").unwrap_err();
	/// assert!(matches!(err, EnvError::MissingVariable(name) if name == "CLOUDSQL_CONF_NO_SUCH_VAR"));
	/// ```
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.str_with_default(key, None)
	}
	/// Read a string value with a default
	pub fn str_with_default(&self, key: &str, default: Option<&str>) -> Result<String, EnvError> {
		validate_env_var_name(key)?;

		match env::var(key) {
			Ok(val) => Ok(val),
			Err(_) => match default {
				Some(d) => Ok(d.to_string()),
				None => Err(EnvError::MissingVariable(key.to_string())),
			},
		}
	}
	/// Read a boolean value with a default
	///
	/// Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, case
	/// insensitively.
	pub fn bool_with_default(&self, key: &str, default: Option<bool>) -> Result<bool, EnvError> {
		validate_env_var_name(key)?;

		match env::var(key) {
			Ok(val) => parse_bool(&val).map_err(|e| EnvError::ParseError {
				key: key.to_string(),
				value_len: val.len(),
				error: e,
			}),
			Err(_) => match default {
				Some(d) => Ok(d),
				None => Err(EnvError::MissingVariable(key.to_string())),
			},
		}
	}
	/// Read a list value with a default (comma-separated)
	pub fn list_with_default(
		&self,
		key: &str,
		default: Option<Vec<String>>,
	) -> Result<Vec<String>, EnvError> {
		validate_env_var_name(key)?;

		match env::var(key) {
			Ok(val) => Ok(parse_list(&val)),
			Err(_) => match default {
				Some(d) => Ok(d),
				None => Err(EnvError::MissingVariable(key.to_string())),
			},
		}
	}
}

/// Parse a boolean environment value
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err("expected a boolean (true/false, 1/0, yes/no, on/off)".to_string()),
	}
}

/// Parse a comma-separated list, trimming whitespace and dropping empty items
pub fn parse_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` character (which is used as the key-value separator).
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value (stored instead of the raw value to prevent secret leakage)
		value_len: usize,
		error: String,
	},

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
