use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ForgeError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("Usage Error: {0}")]
    Usage(String),

    #[error("Could not prepare {0}: {1}")]
    DirectoryCreation(String, String),

    #[error("DownloadError: Failed to download '{0}' from '{1}': {2}")]
    Download(String, String, String),

    #[error("UnpackError: Unpack failed for '{0}': {1}")]
    Unpack(String, String),

    #[error("Could not read build manifest {0}: {1}")]
    ManifestRead(String, String),

    #[error("Could not write build manifest {0}: {1}")]
    ManifestWrite(String, String),

    #[error("Could not stage entry script: {0}")]
    SourceCopy(String),

    #[error("configure exited with code {0}")]
    Configure(i32),

    #[error("make exited with code {0}")]
    Make(i32),

    #[error("make install exited with code {0}")]
    MakeInstall(i32),

    #[error("Could not install {0}: {1}")]
    BinaryInstall(String, String),

    #[error("Failed to execute command: {0}")]
    CommandExec(String),

    #[error("Validation Error: {0}")]
    Validation(String),
}

impl ForgeError {
    /// Process exit code for this failure kind. Every pipeline stage maps to
    /// its own code so shell callers can tell failures apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::DirectoryCreation(..) => 10,
            Self::Download(..) => 11,
            Self::Unpack(..) => 12,
            Self::ManifestRead(..) => 13,
            Self::ManifestWrite(..) => 14,
            Self::SourceCopy(_) => 15,
            Self::Configure(_) => 16,
            Self::Make(_) => 17,
            Self::MakeInstall(_) => 18,
            Self::BinaryInstall(..) => 19,
            Self::CommandExec(_) => 20,
            Self::Validation(_) => 21,
            Self::Io(_) | Self::Http(_) => 1,
        }
    }
}

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        ForgeError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for ForgeError {
    fn from(err: reqwest::Error) -> Self {
        ForgeError::Http(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
