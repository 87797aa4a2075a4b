//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod install;
mod resolve;
mod targets;
mod version;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use install::run_install;
pub use resolve::run_resolve;
pub use targets::run_targets;
pub use version::run_version;
