use crate::helpers::{
    init_tracing, test_message, FakeEnvironment, StubDelivery, StubResponse,
    LINUX_CREDENTIALS_PATH, VALID_CREDENTIALS_FILE,
};
use claim::{assert_err, assert_ok};
use ses_sender::domain::OutboundMessage;
use ses_sender::error::{CredentialProblem, SendError};
use ses_sender::sender::{MessageSender, SenderState};
use std::path::PathBuf;

#[tokio::test]
async fn missing_credentials_fail_without_contacting_ses() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("abc123");
    let mut sender = MessageSender::new(test_message(), FakeEnvironment::linux(), delivery.clone());

    // act
    let error = sender.send().await.unwrap_err();

    // assert
    match &error {
        SendError::Credential(e) => {
            assert_eq!(e.path, PathBuf::from(LINUX_CREDENTIALS_PATH));
            assert_eq!(e.problem, CredentialProblem::MissingFile);
        }
        other => panic!("Expected a credential error, got {:?}", other),
    }
    assert_eq!(error.exit_code(), 2);
    assert_eq!(sender.state(), SenderState::Rejected);
    assert!(delivery.recorded().is_empty());
}

#[tokio::test]
async fn unsupported_platform_is_not_a_credential_error() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("abc123");
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::on_platform("Fake OS"),
        delivery.clone(),
    );

    // act
    let error = sender.send().await.unwrap_err();

    // assert
    assert!(matches!(&error, SendError::UnsupportedPlatform(p) if p == "Fake OS"));
    assert_eq!(error.exit_code(), 3);
    assert!(delivery.recorded().is_empty());
}

#[tokio::test]
async fn accepted_message_returns_the_message_id() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("abc123");
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        delivery.clone(),
    );

    // act
    let message_id = assert_ok!(sender.send().await);

    // assert
    assert_eq!(message_id.as_ref(), "abc123");
    assert_eq!(sender.state(), SenderState::Sent);
    assert_eq!(delivery.recorded().len(), 1);
}

#[tokio::test]
async fn remote_rejection_is_surfaced_verbatim() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::new(StubResponse::Rejected("Email address not verified"));
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        delivery,
    );

    // act
    let error = sender.send().await.unwrap_err();

    // assert
    assert!(matches!(error, SendError::Remote(_)));
    assert_eq!(error.to_string(), "Email address not verified");
    assert_eq!(error.exit_code(), 4);
    assert_eq!(sender.state(), SenderState::Failed);
}

#[tokio::test]
async fn other_delivery_failures_exit_like_a_failed_send() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::new(StubResponse::Broken("fake unexpected exception"));
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        delivery,
    );

    // act
    let error = sender.send().await.unwrap_err();

    // assert
    assert!(matches!(error, SendError::Delivery(_)));
    assert_eq!(error.exit_code(), 1);
    assert_eq!(sender.state(), SenderState::Failed);
}

#[tokio::test]
async fn request_carries_defaults_and_utf8_charset() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("fakemsgID");
    let message = OutboundMessage::builder()
        .recipient("email@domain.com")
        .sender_address("jane@example.com")
        .sender_display_name(Some("Jane".to_string()))
        .region("eu-west-1")
        .plain_text_body("some text")
        .build()
        .unwrap();
    let mut sender = MessageSender::new(
        message,
        FakeEnvironment::linux().with_file(LINUX_CREDENTIALS_PATH, VALID_CREDENTIALS_FILE),
        delivery.clone(),
    );

    // act
    assert_ok!(sender.send().await);

    // assert
    let requests = delivery.recorded();
    let request = &requests[0];
    assert_eq!(request.destination, "email@domain.com");
    assert_eq!(request.sender_header, "Jane <jane@example.com>");
    assert_eq!(request.subject, "");
    assert_eq!(request.text_body, "some text");
    assert_eq!(request.html_body, "some text");
    assert_eq!(request.charset, "UTF-8");
    assert_eq!(request.region, "eu-west-1");
}

#[test]
fn validation_is_repeatable() {
    init_tracing();
    let test_cases = vec![
        FakeEnvironment::linux().with_env_credentials(),
        FakeEnvironment::linux(),
        FakeEnvironment::linux().with_file(LINUX_CREDENTIALS_PATH, "[default]"),
        FakeEnvironment::on_platform("Fake OS"),
    ];

    for environment in test_cases {
        let mut sender = MessageSender::new(
            test_message(),
            environment,
            StubDelivery::accepting("abc123"),
        );

        let first = sender.validate().map_err(|e| e.exit_code());
        let second = sender.validate().map_err(|e| e.exit_code());

        assert_eq!(first, second);
    }
}

#[test]
fn successful_validation_moves_to_validated() {
    init_tracing();
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        StubDelivery::accepting("abc123"),
    );
    assert_eq!(sender.state(), SenderState::Created);

    assert_eq!(assert_ok!(sender.validate()), true);
    assert_eq!(sender.state(), SenderState::Validated);
}

#[tokio::test]
async fn finished_sender_cannot_send_again() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("abc123");
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        delivery.clone(),
    );
    assert_ok!(sender.send().await);

    // act
    let second = sender.send().await;

    // assert
    assert_err!(second);
    assert_eq!(delivery.recorded().len(), 1);
}

#[tokio::test]
async fn validating_a_failed_sender_does_not_reopen_it() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::new(StubResponse::Rejected("Email address not verified"));
    let mut sender = MessageSender::new(
        test_message(),
        FakeEnvironment::linux().with_env_credentials(),
        delivery.clone(),
    );
    assert_err!(sender.send().await);

    // act
    assert_ok!(sender.validate());
    let retry = sender.send().await;

    // assert
    assert_eq!(sender.state(), SenderState::Failed);
    assert!(matches!(retry, Err(SendError::Unexpected(_))));
    assert_eq!(delivery.recorded().len(), 1);
}

#[tokio::test]
async fn validating_a_rejected_sender_does_not_reopen_it() {
    // arrange
    init_tracing();
    let delivery = StubDelivery::accepting("abc123");
    let mut sender =
        MessageSender::new(test_message(), FakeEnvironment::linux(), delivery.clone());
    assert_err!(sender.validate());

    // act
    let second = sender.validate();
    let send = sender.send().await;

    // assert
    assert_err!(second);
    assert_err!(send);
    assert_eq!(sender.state(), SenderState::Rejected);
    assert!(delivery.recorded().is_empty());
}
