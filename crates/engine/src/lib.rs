//! prh-style proofreading rule engine.
//!
//! This crate provides:
//! - YAML rule file definitions with serde deserialization
//! - A loader that resolves `imports` chains and runs each rule's embedded specs
//! - Pattern compilation (plain strings, `/regex/flags` literals, word boundaries)
//! - Change-set computation and application against a document

pub mod changeset;
pub mod loader;
pub mod pattern;
pub mod rule;
pub mod schema;

pub use changeset::{ChangeSet, Diff};
pub use loader::{ApplyError, Engine, LoadError};
pub use rule::{Rule, RuleError};
