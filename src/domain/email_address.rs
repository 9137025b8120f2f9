use crate::domain::is_blank;

/// An address as given by the caller. SES does the real address validation,
/// so the only local rule is that it must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        if is_blank(&s) {
            Err(format!("'{}' is not a valid email address.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
