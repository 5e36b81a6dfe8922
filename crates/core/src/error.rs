use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {}", _0)]
    PromptNotFound(String),

    #[error("Prompt `{}` is in the run order but its file is missing on disk.", _0)]
    MissingPromptFile(String),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("Could not determine a platform configuration directory.")]
    NoConfigDir,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn io_error(
        file_description: &str,
        path: &std::path::Path,
        original: std::io::Error,
    ) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.display().to_string(),
            original,
        }
    }

    pub fn json_error(
        action: &str,
        file_description: &str,
        path: &std::path::Path,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.display().to_string(),
            original,
        }
    }
}
