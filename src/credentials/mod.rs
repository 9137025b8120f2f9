mod environment;
mod resolver;

pub use environment::{HostEnvironment, OsEnvironment};
pub use resolver::{
    has_default_profile, CredentialOutcome, CredentialResolver, CredentialSource, Platform,
    ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR,
};
