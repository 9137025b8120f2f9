use ses_sender::cli::{parse_args, run};
use ses_sender::configuration::get_configuration;
use ses_sender::credentials::OsEnvironment;
use ses_sender::email::SesEmailClient;
use ses_sender::error::EXIT_USAGE;
use ses_sender::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    let configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Failed to read configuration: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let subscriber = get_subscriber(
        "ses-sender".into(),
        configuration.log_level.clone(),
        std::io::stderr,
    );
    if let Err(e) = init_subscriber(subscriber) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let email_client = SesEmailClient::new(&configuration.email_client);
    ExitCode::from(run(cli, OsEnvironment, email_client).await)
}
