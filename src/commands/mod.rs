//! Command implementations for kpkg CLI

pub mod add;
pub mod cache;
pub mod completions;
pub mod context;
pub mod list;
pub mod query;
pub mod reload;
pub mod remove;
pub mod version;
