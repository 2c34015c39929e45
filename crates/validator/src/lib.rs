//! Rule file validator.
//!
//! Discovers prh rule files under a root directory and checks that each one
//! loads and applies to a fixed target document, stopping at the first
//! failure.

pub mod config;
pub mod discovery;
pub mod error;
pub mod validate;

pub use config::{ResolvedConfig, ValidatorConfig};
pub use discovery::{discover, RuleFile};
pub use error::{ConfigError, ValidateError};
pub use validate::{run, validate_all, validate_file, Summary, DONE_MARKER};
