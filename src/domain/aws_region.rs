use crate::domain::is_blank;

/// Regional SES endpoint name, e.g. `us-west-2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsRegion(String);

impl AwsRegion {
    pub fn parse(s: String) -> Result<AwsRegion, String> {
        if is_blank(&s) {
            Err("An AWS region must be provided.".to_string())
        } else {
            Ok(Self(s.trim().to_string()))
        }
    }
}

impl AsRef<str> for AwsRegion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
