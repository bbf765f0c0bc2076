// Package metadata baked in at compile time

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// One-line description, logged at startup.
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
