mod ses_email_client;

use crate::error::RemoteError;
use async_trait::async_trait;
pub use ses_email_client::SesEmailClient;

pub const CHARSET: &str = "UTF-8";

/// Opaque identifier the delivery service assigns to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest<'a> {
    pub destination: &'a str,
    pub sender_header: &'a str,
    pub subject: &'a str,
    pub text_body: &'a str,
    pub html_body: &'a str,
    pub charset: &'static str,
    pub region: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait DeliveryService: Send + Sync {
    async fn send_message(
        &self,
        request: &DeliveryRequest<'_>,
    ) -> Result<MessageId, DeliveryError>;
}
