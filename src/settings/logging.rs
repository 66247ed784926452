//! Logging formatter configuration
//!
//! Mirrors the shape of a Django `LOGGING` dict: named formatters plus the
//! one the console handler actually uses. Insertion order of formatters is
//! preserved so rendered configuration stays stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format string used on deployed instances
pub const VERBOSE_FORMAT: &str = "{levelname} {asctime} {module} {message}";

/// Format string used during local development
pub const SIMPLE_FORMAT: &str = "{levelname} {message}";

/// Logging settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
	/// Root log level
	pub level: String,

	/// Name of the formatter the console handler uses
	pub formatter: String,

	/// Named formatters, name to format string
	pub formatters: IndexMap<String, String>,
}

impl LoggingSettings {
	/// Select the logging configuration for an execution context
	///
	/// Local development logs everything at `debug` with the terse
	/// formatter; deployed instances log at `info` with timestamps and
	/// module names.
	pub fn for_environment(debug: bool) -> Self {
		let mut formatters = IndexMap::new();
		formatters.insert("verbose".to_string(), VERBOSE_FORMAT.to_string());
		formatters.insert("simple".to_string(), SIMPLE_FORMAT.to_string());

		let (level, formatter) = if debug {
			("debug", "simple")
		} else {
			("info", "verbose")
		};

		Self {
			level: level.to_string(),
			formatter: formatter.to_string(),
			formatters,
		}
	}

	/// Format string of the active formatter, if it is defined
	pub fn active_format(&self) -> Option<&str> {
		self.formatters.get(&self.formatter).map(String::as_str)
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self::for_environment(true)
	}
}
