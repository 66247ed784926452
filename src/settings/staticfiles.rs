//! Static file serving configuration
//!
//! Deployed builds serve hashed, pre-compressed assets from a collected
//! manifest; debug builds serve files straight from disk so edits are
//! visible without a collection step.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage backend for collected static files
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticStorage {
	/// Serve files as-is from the static root
	Plain,
	/// Serve content-hashed, compressed files recorded in a manifest
	CompressedManifest,
}

/// Static files settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticSettings {
	/// URL prefix static files are served under
	pub url: String,

	/// Directory collected static files live in
	pub root: PathBuf,

	/// Storage backend
	pub storage: StaticStorage,
}

impl StaticSettings {
	/// Select the static file configuration for an execution context
	///
	/// # Examples
	///
	/// ```
	/// use cloudsql_conf::settings::staticfiles::{StaticSettings, StaticStorage};
	///
	/// let deployed = StaticSettings::for_environment(false);
	/// assert_eq!(deployed.storage, StaticStorage::CompressedManifest);
	///
	/// let local = StaticSettings::for_environment(true);
	/// assert_eq!(local.storage, StaticStorage::Plain);
	/// ```
	pub fn for_environment(debug: bool) -> Self {
		Self {
			url: "/static/".to_string(),
			root: PathBuf::from("static"),
			storage: if debug {
				StaticStorage::Plain
			} else {
				StaticStorage::CompressedManifest
			},
		}
	}
	/// Override the static root directory
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = root.into();
		self
	}
	/// Override the URL prefix
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}
}

impl Default for StaticSettings {
	fn default() -> Self {
		Self::for_environment(true)
	}
}
