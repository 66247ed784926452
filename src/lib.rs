//! # cloudsql-conf
//!
//! Environment-aware settings for services deployed on Google App Engine
//! with a Cloud SQL for PostgreSQL backend.
//!
//! The crate answers one question at process startup: *where is the
//! database, and how do we reach it?* On App Engine the answer is a Unix
//! socket under `/cloudsql` managed by the platform's database proxy; on a
//! developer machine it is a TCP connection to a local proxy. Detection is
//! driven entirely by the process environment, so application code never
//! needs to know which context it is running in.
//!
//! ## Quick Start
//!
//! ```
//! use cloudsql_conf::settings::database::DatabaseConfig;
//! use cloudsql_conf::settings::env::Env;
//!
//! # fn main() -> Result<(), cloudsql_conf::settings::env::EnvError> {
//! let env = Env::new();
//! let db = DatabaseConfig::from_env(&env)?;
//! // With no environment configured this is the local development default.
//! assert_eq!(db.host, "127.0.0.1");
//! assert_eq!(db.port, "5432");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: settings assembly, database selection, static files,
//!   logging formatters, and test helpers

pub mod settings;

// Re-export commonly used types at the crate root for convenience
pub use settings::database::DatabaseConfig;
pub use settings::env::{Env, EnvError};
pub use settings::logging::LoggingSettings;
pub use settings::staticfiles::{StaticSettings, StaticStorage};
pub use settings::{Settings, SettingsError};
