mod common;

use adminhub_core::models::{ClientForm, ContactForm, ProjectForm, ProjectStatus};
use adminhub_core::{ApiError, ListParams, Method, Storage};
use serde_json::{json, Value};

use common::{api, json_response, url, MockTransport};

fn project_page() -> Value {
    json!({
        "success": true,
        "data": {
            "projects": [
                {"id": 7, "name": "Tienda online", "status": "development", "client_company": "Acme SL"}
            ],
            "pagination": {"current_page": 1, "last_page": 3}
        }
    })
}

fn body_of(transport: &MockTransport, index: usize) -> Value {
    let request = &transport.requests()[index];
    serde_json::from_str(request.body.as_deref().expect("request has a body")).unwrap()
}

#[tokio::test]
async fn test_list_projects_twice_in_rapid_succession() {
    let transport = MockTransport::gated(|_| json_response(200, project_page()));
    let (api, _) = api(transport.clone(), Some("tok"));

    let params = ListParams::new().page(1);
    let release = async {
        tokio::task::yield_now().await;
        transport.release();
    };
    let (a, b, ()) = tokio::join!(api.list_projects(&params), api.list_projects(&params), release);

    assert_eq!(transport.calls(), 1);
    assert_eq!(transport.requests()[0].url, url("projects?page=1"));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.projects, b.projects);
    assert_eq!(a.projects[0].status, ProjectStatus::Development);
    assert_eq!(a.pagination.last_page, 3);
}

#[tokio::test(start_paused = true)]
async fn test_get_contacts_again_after_window_hits_network() {
    let transport = MockTransport::new(|_| {
        json_response(
            200,
            json!({"success": true, "data": {"contacts": [], "pagination": {"last_page": 1}}}),
        )
    });
    let (api, _) = api(transport.clone(), Some("tok"));

    api.list_contacts(&ListParams::new()).await.unwrap();
    tokio::time::advance(std::time::Duration::from_secs(6)).await;
    api.list_contacts(&ListParams::new()).await.unwrap();

    assert_eq!(transport.calls_to(&url("admin-contacts")), 2);
}

#[tokio::test]
async fn test_update_project_empties_cache() {
    let transport = MockTransport::new(|req| {
        if req.method == Method::Patch {
            json_response(200, json!({"success": true, "message": "Project updated"}))
        } else if req.url.contains("/clients") {
            json_response(200, json!({"success": true, "data": {"clients": [], "pagination": {"last_page": 1}}}))
        } else {
            json_response(200, project_page())
        }
    });
    let (api, _) = api(transport.clone(), Some("tok"));

    api.list_projects(&ListParams::new()).await.unwrap();
    api.list_clients(&ListParams::new()).await.unwrap();
    assert_eq!(api.gateway().cache_len(), 2);

    let form = ProjectForm {
        status: Some(ProjectStatus::Completed),
        ..Default::default()
    };
    let ack = api.update_project(7, &form).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Project updated"));
    assert_eq!(api.gateway().cache_len(), 0);

    let patch = &transport.requests()[2];
    assert_eq!(patch.url, url("projects/7"));
    assert_eq!(body_of(&transport, 2), json!({"status": "completed"}));
}

#[tokio::test]
async fn test_get_personnel_with_expired_token() {
    let transport = MockTransport::new(|_| json_response(401, json!({"message": "Unauthenticated."})));
    let (api, storage) = api(transport, Some("expired"));

    let err = api.list_personnel(&ListParams::new()).await.unwrap_err();
    assert_eq!(err, ApiError::AuthExpired);
    assert_eq!(storage.get("auth_token"), None);
    assert_eq!(storage.get("user"), None);
    assert!(!api.is_authenticated());
    assert!(api.current_user().is_none());
}

#[tokio::test]
async fn test_change_project_status_refetches_stats_over_network() {
    let transport = MockTransport::new(|req| match (req.method, req.url.as_str()) {
        (Method::Patch, _) => json_response(200, json!({"success": true})),
        (Method::Get, u) if u.ends_with("projects?stats=1") => json_response(
            200,
            json!({"success": true, "data": {"total": 4, "completed_count": 2}}),
        ),
        _ => json_response(404, json!({"success": false})),
    });
    let (api, _) = api(transport.clone(), Some("tok"));

    // Warm the cache; the status change must not be answered from it
    api.project_stats().await.unwrap();
    let stats = api.change_project_status(7, ProjectStatus::Completed).await.unwrap();

    assert_eq!(stats.completed_count, 2);
    assert_eq!(transport.calls_to(&url("projects?stats=1")), 2);
    assert_eq!(body_of(&transport, 1), json!({"status": "completed"}));
}

#[tokio::test]
async fn test_change_status_skips_stats_when_update_fails() {
    let transport = MockTransport::new(|_| json_response(403, json!({"success": false, "message": "Forbidden"})));
    let (api, _) = api(transport.clone(), Some("tok"));

    let err = api.change_contact_status(5, "read").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_login_stores_token_and_profile() {
    let transport = MockTransport::new(|_| {
        json_response(
            200,
            json!({
                "success": true,
                "data": {"token": "1|secret", "user": {"id": 1, "name": "Ana", "email": "ana@example.com"}}
            }),
        )
    });
    let (api, storage) = api(transport.clone(), None);

    let user = api.login("ana@example.com", "hunter2").await.unwrap();
    assert_eq!(user.display_name(), "Ana");
    assert_eq!(storage.get("auth_token").as_deref(), Some("1|secret"));
    assert_eq!(api.current_user(), Some(user));
    assert_eq!(
        body_of(&transport, 0),
        json!({"email": "ana@example.com", "password": "hunter2"})
    );
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let transport = MockTransport::new(|_| json_response(200, json!({"success": true, "data": {}})));
    let (api, storage) = api(transport, None);

    let err = api.login("ana@example.com", "x").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
    assert_eq!(storage.get("auth_token"), None);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let transport = MockTransport::new(|_| json_response(500, json!({"success": false})));
    let (api, storage) = api(transport, Some("tok"));

    assert!(api.logout().await.is_err());
    assert_eq!(storage.get("auth_token"), None);
    assert_eq!(storage.get("user"), None);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let transport = MockTransport::new(|_| {
        json_response(200, json!({"success": false, "message": "Client has active projects"}))
    });
    let (api, _) = api(transport, Some("tok"));

    let err = api.delete_client(2).await.unwrap_err();
    assert_eq!(err, ApiError::Rejected("Client has active projects".to_string()));
}

#[tokio::test]
async fn test_assign_and_unassign_personnel_bodies() {
    let transport = MockTransport::new(|_| json_response(200, json!({"success": true})));
    let (api, _) = api(transport.clone(), Some("tok"));

    api.assign_personnel(7, 3, Some("lead")).await.unwrap();
    api.unassign_personnel(7, 3).await.unwrap();

    assert!(transport.requests().iter().all(|r| r.method == Method::Patch && r.url == url("projects/7")));
    assert_eq!(
        body_of(&transport, 0),
        json!({"action": "assign", "personnel_id": 3, "role": "lead"})
    );
    assert_eq!(body_of(&transport, 1), json!({"action": "unassign", "personnel_id": 3}));
}

#[tokio::test]
async fn test_resource_endpoints() {
    let transport = MockTransport::new(|req| {
        let data = if req.url.contains("positions=1") {
            json!(["Backend", "Diseño"])
        } else if req.url.contains("stats=1") {
            json!({"total": 10, "pending": 4})
        } else if req.url.ends_with("/clients") {
            json!({"id": 12, "company": "Nueva SL"})
        } else {
            json!({"id": 5, "name": "Luis", "email": "luis@example.com"})
        };
        json_response(200, json!({"success": true, "data": data}))
    });
    let (api, _) = api(transport.clone(), Some("tok"));

    let positions = api.personnel_positions().await.unwrap();
    assert_eq!(positions, vec!["Backend".to_string(), "Diseño".to_string()]);

    let stats = api.contact_stats().await.unwrap();
    assert_eq!(stats.total, 10);
    assert_eq!(stats.count("pending"), Some(4));

    let contact = api.get_contact(5).await.unwrap();
    assert_eq!(contact.name, "Luis");

    let form = ClientForm {
        company: Some("Nueva SL".to_string()),
        ..Default::default()
    };
    let client = api.create_client(&form).await.unwrap();
    assert_eq!(client.id, 12);

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            url("personnel?positions=1"),
            url("admin-contacts?stats=1"),
            url("contacts/5"),
            url("clients"),
        ]
    );
}

#[tokio::test]
async fn test_submit_contact_posts_public_form() {
    let transport = MockTransport::new(|_| json_response(201, json!({"success": true, "message": "Gracias"})));
    let (api, _) = api(transport.clone(), None);

    let form = ContactForm {
        name: "Luis".to_string(),
        email: "luis@example.com".to_string(),
        message: "Quiero una web".to_string(),
        ..Default::default()
    };
    let ack = api.submit_contact(&form).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Gracias"));

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, url("contacts"));
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_contacts_export_url_carries_token() {
    let transport = MockTransport::new(|_| json_response(200, json!({"success": true})));
    let (api, _) = api(transport.clone(), Some("1|a b"));

    let export = api
        .contacts_export_url(&ListParams::new().search("acme").status("pending"))
        .unwrap();
    assert_eq!(
        export,
        url("admin-contacts/export?search=acme&status=pending&token=1%7Ca+b")
    );

    let bare = api.contacts_export_url(&ListParams::new()).unwrap();
    assert_eq!(bare, url("admin-contacts/export?token=1%7Ca+b"));

    // Built locally, never sent through the gateway
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_contacts_export_requires_login() {
    let transport = MockTransport::new(|_| json_response(200, json!({"success": true})));
    let (api, _) = api(transport, None);

    let err = api.contacts_export_url(&ListParams::new()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}
