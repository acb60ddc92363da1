//! API endpoint handlers.

pub mod health;
pub mod molecules;
pub mod results;
pub mod simulate;
