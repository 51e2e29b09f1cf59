//! Management resource tests against a mock API server.

use httpmock::Method::{DELETE, GET, PATCH, POST};
use httpmock::MockServer;
use mailtrap::Client;
use mailtrap::api::contact_imports::{ContactImportsApi, ImportRequest};
use mailtrap::api::contact_lists::ContactListsApi;
use mailtrap::api::contacts::{ContactRequest, ContactsApi};
use mailtrap::api::projects::ProjectsApi;
use mailtrap::api::suppressions::SuppressionsApi;
use mailtrap::api::templates::{EmailTemplatesApi, EmailTemplateUpdate};
use serde_json::json;

const ACCOUNT_ID: u64 = 1_111_111;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .api_key("correct-api-key")
        .general_api_host(server.base_url())
        .build()
        .unwrap()
}

#[test]
fn creates_a_contact_and_unwraps_the_data_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/accounts/1111111/contacts")
            .header("authorization", "Bearer correct-api-key")
            .json_body(json!({
                "contact": { "email": "user@example.com", "list_ids": [1, 2] }
            }));
        then.status(200).json_body(json!({
            "data": {
                "id": "contact-uuid",
                "email": "user@example.com",
                "list_ids": [1, 2],
                "status": "subscribed"
            }
        }));
    });

    let client = client_for(&server);
    let contacts = ContactsApi::new(&client, ACCOUNT_ID);
    let contact = contacts
        .create(
            &ContactRequest::email("user@example.com")
                .list_id(1)
                .list_id(2),
        )
        .unwrap();

    mock.assert();
    assert_eq!(contact.id.as_deref(), Some("contact-uuid"));
    assert_eq!(contact.list_ids, [1, 2]);
    assert!(contact.newly_created());
}

#[test]
fn upserting_a_contact_reports_the_action() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PATCH).path("/api/accounts/1111111/contacts/user@example.com");
        then.status(200).json_body(json!({
            "data": { "id": "contact-uuid", "email": "user@example.com" },
            "action": "updated"
        }));
    });

    let client = client_for(&server);
    let contact = ContactsApi::new(&client, ACCOUNT_ID)
        .upsert("user@example.com", &ContactRequest::email("user@example.com"))
        .unwrap();

    assert_eq!(contact.action.as_deref(), Some("updated"));
    assert!(!contact.newly_created());
}

#[test]
fn adds_a_contact_to_lists() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/accounts/1111111/contacts/contact-uuid")
            .json_body(json!({ "contact": { "list_ids_included": [3, 4] } }));
        then.status(200).json_body(json!({
            "data": { "id": "contact-uuid", "list_ids": [1, 3, 4] },
            "action": "updated"
        }));
    });

    let client = client_for(&server);
    let contact = ContactsApi::new(&client, ACCOUNT_ID)
        .add_to_lists("contact-uuid", &[3, 4])
        .unwrap();

    mock.assert();
    assert_eq!(contact.list_ids, [1, 3, 4]);
}

#[test]
fn deletes_a_contact_with_no_content_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/accounts/1111111/contacts/contact-uuid");
        then.status(204);
    });

    let client = client_for(&server);
    ContactsApi::new(&client, ACCOUNT_ID)
        .delete("contact-uuid")
        .unwrap();
    mock.assert();
}

#[test]
fn lists_contact_lists() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/accounts/1111111/contacts/lists");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Customers" },
            { "id": 2, "name": "Trials" }
        ]));
    });

    let client = client_for(&server);
    let lists = ContactListsApi::new(&client, ACCOUNT_ID).list().unwrap();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].name, "Customers");
    assert_eq!(lists[1].id, 2);
}

#[test]
fn starts_a_contact_import_from_a_chained_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/accounts/1111111/contacts/imports")
            .json_body(json!({
                "contacts": [{
                    "email": "user@example.com",
                    "fields": {},
                    "list_ids_included": [1],
                    "list_ids_excluded": []
                }]
            }));
        then.status(200).json_body(json!({ "id": 42, "status": "created" }));
    });

    let client = client_for(&server);
    let request = ImportRequest::new().add_to_lists("user@example.com", &[1]);
    let import = ContactImportsApi::new(&client, ACCOUNT_ID)
        .create(request.contacts())
        .unwrap();

    mock.assert();
    assert_eq!(import.id, 42);
    assert_eq!(import.status, "created");
}

#[test]
fn updates_an_email_template_with_partial_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/accounts/1111111/email_templates/7")
            .json_body(json!({ "email_template": { "subject": "New subject" } }));
        then.status(200).json_body(json!({
            "id": 7,
            "uuid": "template-uuid",
            "name": "Welcome",
            "subject": "New subject"
        }));
    });

    let client = client_for(&server);
    let update = EmailTemplateUpdate {
        subject: Some("New subject".into()),
        ..EmailTemplateUpdate::default()
    };
    let template = EmailTemplatesApi::new(&client, ACCOUNT_ID)
        .update(7, &update)
        .unwrap();

    mock.assert();
    assert_eq!(template.uuid, "template-uuid");
    assert_eq!(template.subject.as_deref(), Some("New subject"));
}

#[test]
fn lists_suppressions_filtered_by_email() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/accounts/1111111/suppressions")
            .query_param("email", "blocked@example.com");
        then.status(200).json_body(json!([{
            "id": "suppression-uuid",
            "type": "hard bounce",
            "email": "blocked@example.com",
            "sending_stream": "transactional"
        }]));
    });

    let client = client_for(&server);
    let suppressions = SuppressionsApi::new(&client, ACCOUNT_ID)
        .list(Some("blocked@example.com"))
        .unwrap();

    mock.assert();
    assert_eq!(suppressions.len(), 1);
    assert_eq!(suppressions[0].kind.as_deref(), Some("hard bounce"));
}

#[test]
fn project_crud_round_trip() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/accounts/1111111/projects")
            .json_body(json!({ "project": { "name": "Staging" } }));
        then.status(200).json_body(json!({ "id": 9, "name": "Staging" }));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/accounts/1111111/projects/9");
        then.status(204);
    });

    let client = client_for(&server);
    let projects = ProjectsApi::new(&client, ACCOUNT_ID);

    let project = projects.create("Staging").unwrap();
    assert_eq!(project.id, 9);

    projects.delete(project.id).unwrap();
    delete_mock.assert();
}

#[test]
fn management_calls_hit_the_general_host_not_the_send_host() {
    let general = MockServer::start();
    let send = MockServer::start();
    let general_mock = general.mock(|when, then| {
        when.method(GET).path("/api/accounts/1111111/projects");
        then.status(200).json_body(json!([]));
    });

    let client = Client::builder()
        .api_key("correct-api-key")
        .bulk(true)
        .api_host(send.base_url())
        .general_api_host(general.base_url())
        .build()
        .unwrap();

    let projects = ProjectsApi::new(&client, ACCOUNT_ID).list().unwrap();
    assert!(projects.is_empty());
    general_mock.assert();
}
