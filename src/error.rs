//! Unified error types for the server.

use std::fmt;

// ---------------------------------------------------------------------------
// TmuxError
// ---------------------------------------------------------------------------

/// Errors from invoking the tmux binary.
///
/// These stay internal: the tool handlers convert every variant into an
/// in-band error string or status result, so a tmux fault never crosses a
/// tool boundary as an `Err`.
#[derive(Debug)]
pub enum TmuxError {
    /// The tmux binary could not be spawned at all.
    Spawn(std::io::Error),
    /// tmux ran but exited with a non-zero status.
    CommandFailed {
        code: Option<i32>,
        stderr: String,
    },
    /// tmux produced output that is not valid UTF-8.
    Decode(std::string::FromUtf8Error),
}

impl TmuxError {
    /// Trimmed stderr from a failed invocation, if there was any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => {
                let trimmed = stderr.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for TmuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to launch tmux: {e}"),
            Self::CommandFailed { code, stderr } => {
                match code {
                    Some(code) => write!(f, "tmux exited with status {code}")?,
                    None => write!(f, "tmux was terminated by a signal")?,
                }
                let detail = stderr.trim();
                if !detail.is_empty() {
                    write!(f, ": {detail}")?;
                }
                Ok(())
            }
            Self::Decode(e) => write!(f, "tmux output was not valid utf-8: {e}"),
        }
    }
}

impl std::error::Error for TmuxError {}

impl From<std::io::Error> for TmuxError {
    fn from(e: std::io::Error) -> Self {
        Self::Spawn(e)
    }
}

impl From<std::string::FromUtf8Error> for TmuxError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// ToolError
// ---------------------------------------------------------------------------

/// Errors arising at the tool-registry boundary.
#[derive(Debug)]
pub enum ToolError {
    /// The caller supplied arguments the tool couldn't parse.
    InvalidArguments(String),
    /// The tool ran but encountered a failure.
    ExecutionFailed(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            Self::ExecutionFailed(msg) => write!(f, "execution failed: {msg}"),
        }
    }
}

impl std::error::Error for ToolError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}
