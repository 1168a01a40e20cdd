//! Utility modules shared across the pipeline

pub mod databases;

pub use databases::{resolve_database, PrefixRule, DATABASE_PREFIX_RULES};
