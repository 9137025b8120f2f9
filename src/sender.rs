use crate::credentials::{CredentialOutcome, CredentialResolver, HostEnvironment};
use crate::domain::OutboundMessage;
use crate::email::{DeliveryError, DeliveryRequest, DeliveryService, MessageId, CHARSET};
use crate::error::{CredentialError, SendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    Created,
    Validated,
    Rejected,
    Sent,
    Failed,
}

/// Sends one [`OutboundMessage`]. Once it has been rejected, sent, or has
/// failed, build a new sender to try again.
pub struct MessageSender<E, D> {
    message: OutboundMessage,
    resolver: CredentialResolver<E>,
    delivery: D,
    state: SenderState,
}

impl<E, D> MessageSender<E, D>
where
    E: HostEnvironment,
    D: DeliveryService,
{
    pub fn new(message: OutboundMessage, environment: E, delivery: D) -> Self {
        Self {
            message,
            resolver: CredentialResolver::new(environment),
            delivery,
            state: SenderState::Created,
        }
    }

    pub fn state(&self) -> SenderState {
        self.state
    }

    pub fn message(&self) -> &OutboundMessage {
        &self.message
    }

    /// Checks that credentials are available. Resolved afresh on every call;
    /// a finished sender keeps its state whatever the outcome.
    pub fn validate(&mut self) -> Result<bool, SendError> {
        let outcome = self.resolver.resolve();
        let result = match outcome {
            CredentialOutcome::Valid(source) => {
                tracing::info!(?source, "AWS credentials found");
                Ok(true)
            }
            CredentialOutcome::UnsupportedPlatform(platform) => {
                Err(SendError::UnsupportedPlatform(platform))
            }
            file_outcome => match CredentialError::from_outcome(file_outcome) {
                Some(e) => Err(SendError::Credential(e)),
                None => Err(SendError::Unexpected(anyhow::anyhow!(
                    "Credential resolution returned an unclassified outcome."
                ))),
            },
        };
        if !self.is_finished() {
            self.state = match result {
                Ok(_) => SenderState::Validated,
                Err(_) => SenderState::Rejected,
            };
        }
        result
    }

    fn is_finished(&self) -> bool {
        matches!(
            self.state,
            SenderState::Rejected | SenderState::Sent | SenderState::Failed
        )
    }

    #[tracing::instrument(
        name = "Sending a message",
        skip(self),
        fields(
            recipient = %self.message.recipient(),
            region = %self.message.region().as_ref()
        )
    )]
    pub async fn send(&mut self) -> Result<MessageId, SendError> {
        if self.is_finished() {
            return Err(SendError::Unexpected(anyhow::anyhow!(
                "This sender has already finished ({:?}); create a new one to send again.",
                self.state
            )));
        }
        self.validate()?;

        let sender_header = self.message.sender_header();
        let request = DeliveryRequest {
            destination: self.message.recipient().as_ref(),
            sender_header: &sender_header,
            subject: self.message.subject(),
            text_body: self.message.plain_text_body(),
            html_body: self.message.html_body(),
            charset: CHARSET,
            region: self.message.region().as_ref(),
        };

        let result = self.delivery.send_message(&request).await;
        self.state = match result {
            Ok(_) => SenderState::Sent,
            Err(_) => SenderState::Failed,
        };
        match result {
            Ok(message_id) => {
                tracing::info!(%message_id, "Message accepted for delivery");
                Ok(message_id)
            }
            Err(DeliveryError::Remote(e)) => Err(SendError::Remote(e)),
            Err(DeliveryError::Unexpected(e)) => Err(SendError::Delivery(e)),
        }
    }
}
