pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod install;
pub mod locator;
pub mod platform;
pub mod transport;

pub use error::InstallError;
pub use install::{fetch_binaries, install, install_binaries, mark_executable, persist};
pub use locator::{ArtifactLocator, LocatorEntry, ResolvedTarget, PINNED_VERSION};
pub use platform::PlatformKey;
pub use transport::{CurlOptions, CurlTransport, Transport};
