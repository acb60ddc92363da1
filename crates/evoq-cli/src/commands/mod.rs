//! CLI command implementations.

pub mod common;
pub mod molecules;
pub mod search;
pub mod serve;
pub mod show;
pub mod simulate;
pub mod version;
