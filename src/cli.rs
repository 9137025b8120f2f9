//! Command-line front end: argument parsing and the error → exit code boundary.

use crate::credentials::HostEnvironment;
use crate::domain::{MessageError, OutboundMessage};
use crate::email::DeliveryService;
use crate::error::{EXIT_SUCCESS, EXIT_USAGE};
use crate::sender::MessageSender;
use clap::{Args, Parser, Subcommand};

pub const TEST_SUBJECT: &str = "Test message from ses-sender";
pub const TEST_BODY: &str = "This is a test message sent with ses-sender through Amazon SES.";

#[derive(Debug, Parser)]
#[command(
    name = "ses-sender",
    version,
    about = "Send an email through Amazon Simple Email Service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a canned test message
    SendTest(Envelope),
    /// Send a message with the given body
    SendEmail(SendEmailArgs),
}

/// Addressing flags shared by both commands.
#[derive(Debug, Args)]
pub struct Envelope {
    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Sender address, verified in SES
    #[arg(long = "from-addr", alias = "fromaddr")]
    pub from_addr: String,

    /// Display name shown next to the sender address
    #[arg(long = "from-name", alias = "fromname")]
    pub from_name: Option<String>,

    /// AWS region of the SES endpoint, e.g. us-west-2
    #[arg(long = "aws-region", alias = "awsregion")]
    pub aws_region: String,
}

#[derive(Debug, Args)]
pub struct SendEmailArgs {
    #[command(flatten)]
    pub envelope: Envelope,

    /// Plain text body
    #[arg(long = "message-txt", alias = "message_txt")]
    pub message_txt: String,

    /// HTML body, defaults to the plain text body
    #[arg(long = "message-html", alias = "message_html")]
    pub message_html: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,
}

/// Parses `args`, printing help or the usage error on failure.
///
/// `Err` holds the exit code to stop with.
pub fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let printed = e.print();
        if e.use_stderr() || printed.is_err() {
            EXIT_USAGE
        } else {
            EXIT_SUCCESS
        }
    })
}

impl Command {
    pub fn into_message(self) -> Result<OutboundMessage, MessageError> {
        match self {
            Command::SendTest(envelope) => envelope
                .into_builder()
                .subject(Some(TEST_SUBJECT.to_string()))
                .plain_text_body(TEST_BODY)
                .build(),
            Command::SendEmail(args) => args
                .envelope
                .into_builder()
                .subject(args.subject)
                .plain_text_body(args.message_txt)
                .html_body(args.message_html)
                .build(),
        }
    }
}

impl Envelope {
    fn into_builder(self) -> crate::domain::OutboundMessageBuilder {
        OutboundMessage::builder()
            .recipient(self.to)
            .sender_address(self.from_addr)
            .sender_display_name(self.from_name)
            .region(self.aws_region)
    }
}

/// Runs one command to completion and returns the process exit code.
pub async fn run<E, D>(cli: Cli, environment: E, delivery: D) -> u8
where
    E: HostEnvironment,
    D: DeliveryService,
{
    let message = match cli.command.into_message() {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected incomplete message");
            eprintln!("{}", e);
            return EXIT_USAGE;
        }
    };

    println!("Attempting to send an email to {}", message.recipient());
    let mut sender = MessageSender::new(message, environment, delivery);
    match sender.send().await {
        Ok(message_id) => {
            println!("Email sent! Message ID: {}", message_id);
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to send email");
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
