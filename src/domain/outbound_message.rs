use crate::domain::{is_blank, AwsRegion, EmailAddress};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("The '{0}' field is required.")]
    MissingField(&'static str),
    #[error("The '{field}' field is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// A single email, fully specified. Only obtainable through
/// [`OutboundMessageBuilder::build`], so every instance has its required
/// fields set.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    recipient: EmailAddress,
    sender_address: EmailAddress,
    sender_display_name: Option<String>,
    region: AwsRegion,
    subject: Option<String>,
    plain_text_body: String,
    html_body: Option<String>,
}

impl OutboundMessage {
    pub fn builder() -> OutboundMessageBuilder {
        OutboundMessageBuilder::default()
    }

    pub fn recipient(&self) -> &EmailAddress {
        &self.recipient
    }

    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// `Name <address>` when a non-empty display name was given.
    pub fn sender_header(&self) -> String {
        match self.sender_display_name.as_deref() {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, self.sender_address),
            _ => self.sender_address.to_string(),
        }
    }

    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }

    pub fn plain_text_body(&self) -> &str {
        &self.plain_text_body
    }

    pub fn html_body(&self) -> &str {
        self.html_body.as_deref().unwrap_or(&self.plain_text_body)
    }
}

#[derive(Debug, Default)]
pub struct OutboundMessageBuilder {
    recipient: Option<String>,
    sender_address: Option<String>,
    sender_display_name: Option<String>,
    region: Option<String>,
    subject: Option<String>,
    plain_text_body: Option<String>,
    html_body: Option<String>,
}

impl OutboundMessageBuilder {
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn sender_address(mut self, address: impl Into<String>) -> Self {
        self.sender_address = Some(address.into());
        self
    }

    pub fn sender_display_name(mut self, name: Option<String>) -> Self {
        self.sender_display_name = name;
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    pub fn plain_text_body(mut self, body: impl Into<String>) -> Self {
        self.plain_text_body = Some(body.into());
        self
    }

    pub fn html_body(mut self, body: Option<String>) -> Self {
        self.html_body = body;
        self
    }

    pub fn build(self) -> Result<OutboundMessage, MessageError> {
        let recipient = EmailAddress::parse(required("recipient", self.recipient)?)
            .map_err(|reason| MessageError::InvalidField {
                field: "recipient",
                reason,
            })?;
        let sender_address = EmailAddress::parse(required("sender_address", self.sender_address)?)
            .map_err(|reason| MessageError::InvalidField {
                field: "sender_address",
                reason,
            })?;
        let region = AwsRegion::parse(required("region", self.region)?).map_err(|reason| {
            MessageError::InvalidField {
                field: "region",
                reason,
            }
        })?;
        let plain_text_body = required("plain_text_body", self.plain_text_body)?;
        if is_blank(&plain_text_body) {
            return Err(MessageError::InvalidField {
                field: "plain_text_body",
                reason: "The message body must not be empty.".to_string(),
            });
        }

        Ok(OutboundMessage {
            recipient,
            sender_address,
            sender_display_name: self.sender_display_name,
            region,
            subject: self.subject,
            plain_text_body,
            html_body: self.html_body,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, MessageError> {
    value.ok_or(MessageError::MissingField(field))
}
