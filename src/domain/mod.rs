mod aws_region;
mod email_address;
mod outbound_message;

pub use aws_region::AwsRegion;
pub use email_address::EmailAddress;
pub use outbound_message::{MessageError, OutboundMessage, OutboundMessageBuilder};

/// Rejects empty and whitespace-only input.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
