use crate::credentials::{CredentialOutcome, ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR};
use std::path::{Path, PathBuf};

pub const CREDENTIALS_SETUP_DOCS: &str =
    "https://docs.aws.amazon.com/cli/latest/userguide/cli-configure-files.html";

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialProblem {
    MissingFile,
    NotAFile,
    Unreadable,
    MalformedFile,
}

impl CredentialProblem {
    fn describe(&self) -> &'static str {
        match self {
            CredentialProblem::MissingFile => "does not exist",
            CredentialProblem::NotAFile => "is not a file",
            CredentialProblem::Unreadable => "cannot be read",
            CredentialProblem::MalformedFile => "does not contain a [default] profile with both keys",
        }
    }
}

/// No usable AWS credentials were found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "The AWS credentials file {} {}.\n{}\nSee {}",
    .path.display(),
    .problem.describe(),
    remediation_hint(.path),
    CREDENTIALS_SETUP_DOCS
)]
pub struct CredentialError {
    pub path: PathBuf,
    pub problem: CredentialProblem,
}

fn remediation_hint(path: &Path) -> String {
    format!(
        "Either export {} and {}, or create {} containing:\n\
        [default]\n\
        aws_access_key_id = <access-key-id>\n\
        aws_secret_access_key = <secret-access-key>",
        ACCESS_KEY_ID_VAR,
        SECRET_ACCESS_KEY_VAR,
        path.display()
    )
}

impl CredentialError {
    pub fn hint(&self) -> String {
        remediation_hint(&self.path)
    }

    /// `None` for outcomes that are not about the credentials file.
    pub fn from_outcome(outcome: CredentialOutcome) -> Option<Self> {
        let (path, problem) = match outcome {
            CredentialOutcome::MissingFile(path) => (path, CredentialProblem::MissingFile),
            CredentialOutcome::NotAFile(path) => (path, CredentialProblem::NotAFile),
            CredentialOutcome::Unreadable(path) => (path, CredentialProblem::Unreadable),
            CredentialOutcome::MalformedFile(path) => (path, CredentialProblem::MalformedFile),
            CredentialOutcome::Valid(_) | CredentialOutcome::UnsupportedPlatform(_) => {
                return None
            }
        };
        Some(Self { path, problem })
    }
}

/// Structured rejection from the delivery service. `message` is shown to the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub code: Option<String>,
    pub message: String,
}

#[derive(thiserror::Error)]
pub enum SendError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("{0} is not a supported operating system. Use Linux or Windows.")]
    UnsupportedPlatform(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The delivery service failed without a structured rejection, or could
    /// not be set up.
    #[error(transparent)]
    Delivery(anyhow::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_USAGE: u8 = 1;
pub const EXIT_CREDENTIALS: u8 = 2;
pub const EXIT_UNSUPPORTED_PLATFORM: u8 = 3;
pub const EXIT_REMOTE: u8 = 4;
pub const EXIT_UNEXPECTED: u8 = 5;

impl SendError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SendError::Credential(_) => EXIT_CREDENTIALS,
            SendError::UnsupportedPlatform(_) => EXIT_UNSUPPORTED_PLATFORM,
            SendError::Remote(_) => EXIT_REMOTE,
            SendError::Delivery(_) => EXIT_USAGE,
            SendError::Unexpected(_) => EXIT_UNEXPECTED,
        }
    }
}
