//! Compile-time build metadata exposed on startup and version surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("MUXPAL_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("MUXPAL_BUILD_TIMESTAMP");

/// Render concise startup metadata logged when the server comes up.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

/// Render CLI version block used by `muxpal --version`.
pub fn cli_version_text() -> String {
    format!("muxpal {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}
