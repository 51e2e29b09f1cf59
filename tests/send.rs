//! Sending tests against a mock API server.

use httpmock::Method::POST;
use httpmock::MockServer;
use mailtrap::{Address, Client, Error, Mail};
use serde_json::json;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .api_key("correct-api-key")
        .api_host(server.base_url())
        .build()
        .unwrap()
}

#[test]
fn sends_mail_and_decodes_message_ids() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/send")
            .header("authorization", "Bearer correct-api-key")
            .header("content-type", "application/json")
            .json_body(json!({
                "from": { "email": "a@b.com" },
                "to": [{ "email": "c@d.com" }],
                "cc": [],
                "bcc": [],
                "subject": "Hi",
                "text": "Hello",
                "attachments": [],
                "headers": {},
                "custom_variables": {}
            }));
        then.status(200)
            .json_body(json!({ "success": true, "message_ids": ["id-1"] }));
    });

    let client = client_for(&server);
    let mail = Mail::from_content(Address::new("a@b.com"), "Hi")
        .to(Address::new("c@d.com"))
        .text("Hello");

    let response = client.send(&mail).unwrap();

    mock.assert();
    assert!(response.success);
    assert_eq!(response.message_ids, Some(vec!["id-1".to_string()]));
}

#[test]
fn send_accepts_success_without_message_ids() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(200).json_body(json!({ "success": true }));
    });

    let client = client_for(&server);
    let mail = Mail::from_content(Address::new("a@b.com"), "Hi").text("Hello");

    let response = client.send(&mail).unwrap();
    assert!(response.success);
    assert_eq!(response.message_ids, None);
}

#[test]
fn sandbox_client_posts_to_inbox_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/send/4242");
        then.status(200).json_body(json!({ "success": true }));
    });

    let client = Client::builder()
        .api_key("correct-api-key")
        .sandbox(true)
        .inbox_id(4242)
        .api_host(server.base_url())
        .build()
        .unwrap();
    let mail = Mail::from_content(Address::new("a@b.com"), "Hi").text("Hello");

    client.send(&mail).unwrap();
    mock.assert();
}

#[test]
fn unauthorized_surfaces_authorization_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(401).json_body(json!({ "errors": ["Unauthorized"] }));
    });

    let client = client_for(&server);
    let mail = Mail::from_content(Address::new("a@b.com"), "Hi").text("Hello");

    let err = client.send(&mail).unwrap_err();
    assert!(matches!(err, Error::Authorization(_)));
    assert_eq!(err.messages(), vec!["Unauthorized".to_string()]);
    assert_eq!(err.to_string(), "Unauthorized");
}

#[test]
fn validation_errors_arrive_as_message_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(400).json_body(json!({
            "errors": ["'subject' is required", "must specify either text or html body"]
        }));
    });

    let client = client_for(&server);
    let err = client.send(&Mail::new().from(Address::new("a@b.com"))).unwrap_err();

    assert_eq!(
        err.messages(),
        vec![
            "'subject' is required".to_string(),
            "must specify either text or html body".to_string()
        ]
    );
    assert_eq!(
        err.to_string(),
        "'subject' is required, must specify either text or html body"
    );
}

#[test]
fn payload_too_large_maps_to_mail_size_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(413).body("Request Entity Too Large");
    });

    let client = client_for(&server);
    let err = client
        .send(&Mail::from_content(Address::new("a@b.com"), "Hi"))
        .unwrap_err();

    assert!(matches!(err, Error::MailSize(_)));
    assert_eq!(err.messages(), vec!["message too large".to_string()]);
}

#[test]
fn rate_limit_maps_to_rate_limit_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(429).body("slow down");
    });

    let client = client_for(&server);
    let err = client
        .send(&Mail::from_content(Address::new("a@b.com"), "Hi"))
        .unwrap_err();

    assert!(matches!(err, Error::RateLimit(_)));
    assert_eq!(err.messages(), vec!["too many requests".to_string()]);
}

#[test]
fn server_errors_map_to_generic_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(500).body("internal error");
    });

    let client = client_for(&server);
    let err = client
        .send(&Mail::from_content(Address::new("a@b.com"), "Hi"))
        .unwrap_err();

    assert!(matches!(err, Error::Api(_)));
    assert_eq!(err.messages(), vec!["server error".to_string()]);
}

#[test]
fn attachments_travel_base64_encoded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/send").json_body(json!({
            "from": { "email": "a@b.com" },
            "to": [],
            "cc": [],
            "bcc": [],
            "subject": "With attachment",
            "attachments": [{ "content": "aGVsbG8gd29ybGQ=", "filename": "attachment.txt" }],
            "headers": {},
            "custom_variables": {}
        }));
        then.status(200).json_body(json!({ "success": true }));
    });

    let client = client_for(&server);
    let mut mail = Mail::from_content(Address::new("a@b.com"), "With attachment");
    mail.add_attachment("aGVsbG8gd29ybGQ=", "attachment.txt").unwrap();

    client.send(&mail).unwrap();
    mock.assert();
}
