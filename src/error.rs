//! Error types for the game core.
//!
//! Almost nothing in the core is fatal: configuration problems are clamped,
//! degenerate viewports defer spawning and presentation failures are logged.
//! What remains surfaces through `GameError`.

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for the game core.
#[derive(Debug)]
pub enum GameError {
    /// Settings file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A value could not be serialized (settings save, JSON event output).
    Serialize(serde_json::Error),

    /// A presentation callback failed. Logged by the dispatcher, never
    /// propagated out of the tick loop.
    Presentation {
        /// Callback that failed, e.g. "hit".
        callback: &'static str,
        message: String,
    },

    /// A command arrived in a stage that cannot handle it.
    InvalidCommand {
        command: &'static str,
        stage: &'static str,
    },
}

impl GameError {
    /// Shorthand for presenters reporting a failed callback
    pub fn presentation(callback: &'static str, message: impl Into<String>) -> Self {
        GameError::Presentation {
            callback,
            message: message.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            GameError::Parse { path, source } => {
                write!(f, "invalid settings file '{}': {}", path.display(), source)
            }
            GameError::Serialize(source) => write!(f, "serialization failed: {}", source),
            GameError::Presentation { callback, message } => {
                write!(f, "presentation callback '{}' failed: {}", callback, message)
            }
            GameError::InvalidCommand { command, stage } => {
                write!(f, "command '{}' is not valid in stage '{}'", command, stage)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            GameError::Parse { source, .. } => Some(source),
            GameError::Serialize(source) => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Serialize(err)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_mentions_context() {
        let err = GameError::InvalidCommand {
            command: "restart",
            stage: "home",
        };
        assert_eq!(
            err.to_string(),
            "command 'restart' is not valid in stage 'home'"
        );

        let err = GameError::presentation("hit", "audio device gone");
        assert!(err.to_string().contains("'hit'"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_has_source() {
        let err = GameError::Io {
            path: PathBuf::from("settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("settings.json"));
    }
}
