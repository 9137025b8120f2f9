use crate::configuration::EmailClientSettings;
use crate::email::{DeliveryError, DeliveryRequest, DeliveryService, MessageId};
use crate::error::RemoteError;
use anyhow::Context;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use std::time::Duration;

/// Amazon SES v2 delivery. The SDK client is built per message because the
/// region is a property of the message, not of the client.
pub struct SesEmailClient {
    timeout: Duration,
}

impl SesEmailClient {
    pub fn new(settings: &EmailClientSettings) -> Self {
        Self {
            timeout: settings.timeout(),
        }
    }

    async fn client(&self, region: &str) -> ses::Client {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(self.timeout)
            .build();
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .timeout_config(timeout_config)
            .load()
            .await;
        ses::Client::new(&shared_config)
    }
}

#[async_trait]
impl DeliveryService for SesEmailClient {
    #[tracing::instrument(
        name = "Sending email via SES",
        skip(self, request),
        fields(
            recipient = %request.destination,
            region = %request.region
        )
    )]
    async fn send_message(
        &self,
        request: &DeliveryRequest<'_>,
    ) -> Result<MessageId, DeliveryError> {
        let html_content = Content::builder()
            .data(request.html_body)
            .charset(request.charset)
            .build()
            .context("Failed to build the HTML body.")?;
        let text_content = Content::builder()
            .data(request.text_body)
            .charset(request.charset)
            .build()
            .context("Failed to build the plain text body.")?;
        let body = Body::builder()
            .html(html_content)
            .text(text_content)
            .build();
        let subject = Content::builder()
            .data(request.subject)
            .charset(request.charset)
            .build()
            .context("Failed to build the subject.")?;
        let message = Message::builder().subject(subject).body(body).build();
        let content = EmailContent::builder().simple(message).build();
        let destination = Destination::builder()
            .to_addresses(request.destination)
            .build();

        let output = self
            .client(request.region)
            .await
            .send_email()
            .from_email_address(request.sender_header)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(into_delivery_error)?;

        let message_id = output
            .message_id()
            .context("SES accepted the message but returned no message id.")?;
        Ok(MessageId::new(message_id))
    }
}

/// Service-side rejections keep their message; transport and parsing
/// failures are unexpected.
fn into_delivery_error<E, R>(error: SdkError<E, R>) -> DeliveryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match error {
        SdkError::ServiceError(context) => {
            let err = context.into_err();
            let message = err
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            tracing::error!(code = ?err.code(), %message, "SES rejected the message");
            DeliveryError::Remote(RemoteError {
                code: err.code().map(str::to_owned),
                message,
            })
        }
        other => {
            let error = anyhow::anyhow!("{}", DisplayErrorContext(&other));
            DeliveryError::Unexpected(error.context("Failed to reach SES."))
        }
    }
}
