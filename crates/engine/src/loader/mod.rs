//! Rule file loading: YAML parsing, `imports` resolution, and the [`Engine`]
//! that computes change sets.
//!
//! Imported rules are merged before a file's own rules; a local rule with the
//! same `expected` replaces the imported one.

mod core;
mod error;
mod imports;


pub use self::core::Engine;
pub use self::error::{ApplyError, LoadError, Result};
pub use self::imports::MAX_IMPORT_DEPTH;
