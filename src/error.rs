use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a download before the external tool produces a result.
/// A tool that runs and exits nonzero is not an error; it is reported.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("could not create output folder '{}': {source}", .path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' was not found; is it installed and on PATH? ({source})")]
    ToolNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl DispatchError {
    /// Classifies an I/O error raised while starting `program`.
    pub fn from_spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DispatchError::ToolNotFound {
                program: program.to_string(),
                source,
            }
        } else {
            DispatchError::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_not_found_is_classified() {
        let err = DispatchError::from_spawn("spotdl", Error::from(ErrorKind::NotFound));
        assert!(matches!(err, DispatchError::ToolNotFound { .. }));
        assert!(err.to_string().contains("'spotdl' was not found"));
    }

    #[test]
    fn test_other_spawn_errors() {
        let err =
            DispatchError::from_spawn("yt-dlp", Error::from(ErrorKind::PermissionDenied));
        assert!(matches!(err, DispatchError::Spawn { .. }));
        assert!(err.to_string().starts_with("failed to run 'yt-dlp'"));
    }
}
