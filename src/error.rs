// error.rs - Error taxonomy for the editor core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the terminal device itself. Fatal at startup.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("unable to enter raw mode: {0}")]
    RawMode(#[source] io::Error),

    #[error("unable to restore terminal mode: {0}")]
    Restore(#[source] io::Error),

    #[error("unable to determine window size")]
    WindowSize,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors surfaced by the editor controller.
///
/// `Io` is never fatal: the controller turns it into a status message.
/// `Terminal` aborts the session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config format in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts_into_editor_error() {
        let err: EditorError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, EditorError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn test_terminal_error_is_transparent() {
        let err: EditorError = TerminalError::WindowSize.into();
        assert_eq!(err.to_string(), "unable to determine window size");
    }
}
