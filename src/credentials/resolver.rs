use crate::credentials::HostEnvironment;
use std::path::PathBuf;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

const PROFILE_MARKER: &str = "[default]";
const ACCESS_KEY_ID_TOKEN: &str = "aws_access_key_id=";
const SECRET_ACCESS_KEY_TOKEN: &str = "aws_secret_access_key=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "Linux" => Ok(Self::Linux),
            "Windows" => Ok(Self::Windows),
            _ => Err(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    Valid(CredentialSource),
    UnsupportedPlatform(String),
    MissingFile(PathBuf),
    NotAFile(PathBuf),
    Unreadable(PathBuf),
    MalformedFile(PathBuf),
}

impl CredentialOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, CredentialOutcome::Valid(_))
    }
}

/// Works out whether the AWS SDK will find usable credentials.
///
/// Nothing is cached: every call to [`CredentialResolver::resolve`] looks at
/// the environment and the filesystem again.
pub struct CredentialResolver<E> {
    environment: E,
}

impl<E: HostEnvironment> CredentialResolver<E> {
    pub fn new(environment: E) -> Self {
        Self { environment }
    }

    #[tracing::instrument(name = "Resolving AWS credentials", skip(self))]
    pub fn resolve(&self) -> CredentialOutcome {
        if self.environment_has_credentials() {
            tracing::debug!("Using credentials from environment variables");
            return CredentialOutcome::Valid(CredentialSource::Environment);
        }

        let platform = match Platform::try_from(self.environment.platform()) {
            Ok(platform) => platform,
            Err(name) => return CredentialOutcome::UnsupportedPlatform(name),
        };

        let path = self.credentials_path(platform);
        tracing::debug!(path = %path.display(), "Looking for a credentials file");
        if !self.environment.exists(&path) {
            return CredentialOutcome::MissingFile(path);
        }
        if !self.environment.is_file(&path) {
            return CredentialOutcome::NotAFile(path);
        }
        if !self.environment.can_read(&path) {
            return CredentialOutcome::Unreadable(path);
        }

        let contents = match self.environment.read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read credentials file");
                return CredentialOutcome::Unreadable(path);
            }
        };

        if has_default_profile(&contents) {
            CredentialOutcome::Valid(CredentialSource::File(path))
        } else {
            CredentialOutcome::MalformedFile(path)
        }
    }

    pub fn credentials_path(&self, platform: Platform) -> PathBuf {
        match platform {
            Platform::Linux => {
                let home = self
                    .environment
                    .home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"));
                home.join(".aws").join("credentials")
            }
            Platform::Windows => {
                let drive = self
                    .environment
                    .var("SYSTEMDRIVE")
                    .filter(|drive| !drive.is_empty())
                    .unwrap_or_else(|| "C:".to_string());
                let login = self
                    .environment
                    .login_name()
                    .unwrap_or_else(|| "%USERNAME%".to_string());
                PathBuf::from(format!(r"{}\Users\{}\.aws\credentials", drive, login))
            }
        }
    }

    fn environment_has_credentials(&self) -> bool {
        [ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR]
            .iter()
            .all(|key| self.environment.var(key).map_or(false, |v| !v.is_empty()))
    }
}

/// Substring check on the whitespace-free contents, so `key = value` and
/// `key=value` are the same and line order does not matter.
pub fn has_default_profile(contents: &str) -> bool {
    let compact: String = contents.chars().filter(|c| !c.is_whitespace()).collect();
    [PROFILE_MARKER, ACCESS_KEY_ID_TOKEN, SECRET_ACCESS_KEY_TOKEN]
        .iter()
        .all(|token| compact.contains(token))
}
