use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use qrform::dispatch::{UriOpener, send_email, send_sms};
use qrform::output::alert_for;
use qrform::Error;

/// Opener that records URIs and optionally refuses them
#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    refuse: bool,
}

impl RecordingOpener {
    fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UriOpener for RecordingOpener {
    async fn open(&self, uri: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(uri.to_string());
        if self.refuse {
            Err(io::Error::new(io::ErrorKind::NotFound, "no handler installed"))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn sms_requires_number_and_message() {
    let opener = RecordingOpener::default();

    let err = send_sms(&opener, "", "msg").await.unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "phone number"));
    assert_eq!(
        alert_for(&err).message,
        "Please provide a phone number and a message."
    );

    let err = send_sms(&opener, "555", "").await.unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "phone number"));
    assert_eq!(
        alert_for(&err).message,
        "Please provide a phone number and a message."
    );

    assert!(opener.opened().is_empty());
}

#[tokio::test]
async fn email_requires_address_and_message() {
    let opener = RecordingOpener::default();

    assert!(matches!(
        send_email(&opener, "", "hi").await,
        Err(Error::MissingField(_))
    ));
    let err = send_email(&opener, "a@b.com", "").await.unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "email address"));
    assert_eq!(
        alert_for(&err).message,
        "Please provide an email address and a message."
    );
    assert!(opener.opened().is_empty());
}

#[tokio::test]
async fn sms_opens_verbatim_uri() {
    let opener = RecordingOpener::default();

    let uri = send_sms(&opener, "555", "see you at 5 & bring snacks")
        .await
        .unwrap();

    assert_eq!(uri, "sms:555?body=see you at 5 & bring snacks");
    assert_eq!(opener.opened(), vec![uri]);
}

#[tokio::test]
async fn email_opens_mailto_uri() {
    let opener = RecordingOpener::default();

    let uri = send_email(&opener, "a@b.com", "hi").await.unwrap();

    assert_eq!(uri, "mailto:a@b.com?body=hi");
    assert_eq!(opener.opened(), vec!["mailto:a@b.com?body=hi".to_string()]);
}

#[tokio::test]
async fn refused_uri_is_dispatch_failure() {
    let opener = RecordingOpener {
        refuse: true,
        ..Default::default()
    };

    let err = send_sms(&opener, "555", "hi").await.unwrap_err();
    assert!(matches!(err, Error::DispatchFailed { scheme: "sms", .. }));
    assert_eq!(alert_for(&err).message, "Unable to send SMS.");

    let err = send_email(&opener, "a@b.com", "hi").await.unwrap_err();
    assert!(matches!(err, Error::DispatchFailed { scheme: "mailto", .. }));
    assert_eq!(alert_for(&err).message, "Unable to send email.");

    // One attempt each, no retries.
    assert_eq!(opener.opened().len(), 2);
}
