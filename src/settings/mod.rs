//! Django-inspired settings for App Engine deployments backed by Cloud SQL
//!
//! The top-level [`Settings`] struct plays the role a `settings.py` plays in
//! a Django project: one value, assembled once at startup, holding database
//! connection parameters, static file configuration, logging formatters, and
//! the host lists.
//!
//! Assembly follows a fail-open / fail-closed asymmetry. Detecting the
//! execution context never errors: the platform indicator is either present
//! or it is not. But once the deployed context is chosen, every required
//! value (database identity, credentials, the secret key) must be present
//! in the environment or startup aborts with the missing variable named.
//! Locally, everything has a development default and assembly cannot fail.

pub mod database;
pub mod env;
pub mod logging;
pub mod staticfiles;
pub mod testing;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use env::{Env, EnvError};
pub use logging::LoggingSettings;
pub use staticfiles::{StaticSettings, StaticStorage};

/// Placeholder secret key used for local development only
pub const DEV_SECRET_KEY: &str = "insecure-change-this-in-production";

/// Main settings structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Debug mode (SECURITY WARNING: don't run with debug=true in production!)
	#[serde(default)]
	pub debug: bool,

	/// Secret key for cryptographic signing (SECURITY WARNING: keep secret in production!)
	#[serde(default = "default_secret_key")]
	pub secret_key: String,

	/// List of allowed host/domain names
	#[serde(default)]
	pub allowed_hosts: Vec<String>,

	/// Origins trusted for cross-site request forgery checks
	#[serde(default)]
	pub csrf_trusted_origins: Vec<String>,

	/// Database configurations, keyed by alias; `"default"` is the one the
	/// application uses
	#[serde(default)]
	pub databases: HashMap<String, DatabaseConfig>,

	/// Static files configuration
	#[serde(default)]
	pub static_files: StaticSettings,

	/// Logging configuration
	#[serde(default)]
	pub logging: LoggingSettings,
}

fn default_secret_key() -> String {
	DEV_SECRET_KEY.to_string()
}

/// Hosts the service answers to when `ALLOWED_HOSTS` is not set: the
/// platform's serving domains plus the local development addresses
fn default_allowed_hosts() -> Vec<String> {
	vec![
		".appspot.com".to_string(),
		".run.app".to_string(),
		"localhost".to_string(),
		"127.0.0.1".to_string(),
	]
}

fn default_csrf_trusted_origins() -> Vec<String> {
	vec![
		"https://*.appspot.com".to_string(),
		"https://*.run.app".to_string(),
	]
}

impl Settings {
	/// Assemble settings from the process environment
	///
	/// Debug is off unless `DEBUG` is explicitly enabled, and the host and
	/// CSRF origin lists default to the platform's serving domains plus the
	/// local development addresses, on both branches. The branches differ
	/// only where secrets are at stake: on the platform `SECRET_KEY` must be
	/// present, locally it falls back to a development placeholder.
	///
	/// # Errors
	///
	/// [`SettingsError::Env`] when a variable required on the deployed path
	/// is absent, or when a set variable fails to parse (e.g. `DEBUG`).
	pub fn from_env() -> Result<Self, SettingsError> {
		let env = Env::new();
		let deployed = env.is_set(database::PLATFORM_INDICATOR_VAR);

		let debug = env.bool_with_default("DEBUG", Some(false))?;

		let secret_key = if deployed {
			env.str("SECRET_KEY")?
		} else {
			env.str_with_default("SECRET_KEY", Some(DEV_SECRET_KEY))?
		};

		let allowed_hosts =
			env.list_with_default("ALLOWED_HOSTS", Some(default_allowed_hosts()))?;

		let csrf_trusted_origins = env.list_with_default(
			"CSRF_TRUSTED_ORIGINS",
			Some(default_csrf_trusted_origins()),
		)?;

		let mut databases = HashMap::new();
		databases.insert("default".to_string(), DatabaseConfig::from_env(&env)?);

		Ok(Self {
			debug,
			secret_key,
			allowed_hosts,
			csrf_trusted_origins,
			databases,
			static_files: StaticSettings::for_environment(debug),
			logging: LoggingSettings::for_environment(debug),
		})
	}
	/// Load settings from a configuration file
	///
	/// Supports TOML and JSON, chosen by file extension. Absent fields take
	/// their development defaults.
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: Settings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		Ok(settings)
	}
	/// Validate settings
	///
	/// Refuses non-debug configurations that still carry development
	/// values, and enforces that socket-addressed databases never carry a
	/// port.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.debug {
			if self.secret_key == DEV_SECRET_KEY {
				return Err(SettingsError::ValidationError(
					"SECRET_KEY must be changed in production".to_string(),
				));
			}

			if self.allowed_hosts.is_empty() {
				return Err(SettingsError::ValidationError(
					"ALLOWED_HOSTS must not be empty in production".to_string(),
				));
			}
		}

		for (alias, db) in &self.databases {
			if db.is_unix_socket() && !db.port.is_empty() {
				return Err(SettingsError::ValidationError(format!(
					"database '{}' uses a Unix socket host but also sets port '{}'",
					alias, db.port
				)));
			}
		}

		Ok(())
	}
	/// The `"default"` database configuration, if one is present
	pub fn default_database(&self) -> Option<&DatabaseConfig> {
		self.databases.get("default")
	}
}

impl Default for Settings {
	fn default() -> Self {
		let mut databases = HashMap::new();
		databases.insert("default".to_string(), DatabaseConfig::default());

		Self {
			debug: true,
			secret_key: DEV_SECRET_KEY.to_string(),
			allowed_hosts: default_allowed_hosts(),
			csrf_trusted_origins: default_csrf_trusted_origins(),
			databases,
			static_files: StaticSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error(transparent)]
	Env(#[from] EnvError),

	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("Validation error: {0}")]
	ValidationError(String),
}
