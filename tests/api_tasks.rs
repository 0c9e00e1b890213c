//! Integration tests del workflow de tareas
//!
//! Test para:
//! - GET /workflow/tasks/{task_id} (organizador vía evento padre, proveedor
//!   vía lista asignada)
//! - POST /workflow/tasks/{task_id}/comments
//! - POST /workflow/tasks/{task_id}/files
//! - GET /workflow/tasks/{task_id}/files/{file_id}
//!
//! El rol sale siempre del JWT firmado con el secreto compartido; los tests
//! generan tokens reales con create_test_jwt.

mod common;

#[cfg(test)]
mod workflow_tests {
    use super::common::*;
    use axum_test::http::HeaderName;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_fixture(id: &str, comments: serde_json::Value, files: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Contratar catering",
            "status": "pending",
            "comments": comments,
            "files": files
        })
    }

    fn event_fixture(status: &str, tasks: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "1",
            "name": "Boda de Ana",
            "status": status,
            "tasks": tasks
        })
    }

    fn comment_fixture(author: &str, text: &str) -> serde_json::Value {
        json!({
            "userType": author,
            "text": text,
            "date": "2025-03-01T10:00:00Z"
        })
    }

    // ============================================================
    // Test para GET /workflow/tasks/{task_id} - get_task_view
    // ============================================================

    #[tokio::test]
    async fn test_organizer_view_follows_parent_event() {
        let backend = MockServer::start().await;
        let event = event_fixture(
            "in progress",
            json!([task_fixture(
                "t1",
                json!([comment_fixture("organizer", "Pedir menú vegano")]),
                json!([{ "id": "f-1", "fileName": "menu.pdf" }])
            )]),
        );

        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_ok();
        let view: serde_json::Value = response.json();
        assert_eq!(view["id"], "t1");
        assert_eq!(view["name"], "Contratar catering");
        assert_eq!(view["comments"][0]["authorLabel"], "Organizador");
        assert_eq!(view["comments"][0]["text"], "Pedir menú vegano");
        assert_eq!(view["files"][0]["fileName"], "menu.pdf");
    }

    #[tokio::test]
    async fn test_organizer_view_without_event_param_is_400() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_bad_request();
        let envelope: serde_json::Value = response.json();
        assert_eq!(
            envelope["message"]["description"],
            "Falta el parámetro 'event' del evento padre"
        );

        let requests = backend.received_requests().await.unwrap();
        assert!(requests.is_empty(), "No backend call should be made");
    }

    #[tokio::test]
    async fn test_provider_view_follows_assigned_list() {
        let backend = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/task/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                task_fixture("t1", json!([]), json!([])),
                task_fixture("t2", json!([comment_fixture("provider", "Enviado")]), json!([]))
            ])))
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-9", "provider", TEST_JWT_SECRET);

        // El proveedor no necesita el parámetro event
        let response = server
            .get("/workflow/tasks/t2")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_ok();
        let view: serde_json::Value = response.json();
        assert_eq!(view["id"], "t2");
        assert_eq!(view["comments"][0]["authorLabel"], "Proveedor");
    }

    #[tokio::test]
    async fn test_task_missing_from_event_is_404() {
        let backend = MockServer::start().await;
        let event = event_fixture("in progress", json!([task_fixture("t1", json!([]), json!([]))]));

        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t9?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_not_found();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "Tarea no encontrada en el evento");
    }

    #[tokio::test]
    async fn test_task_missing_from_assigned_list_is_404() {
        let backend = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/task/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-9", "provider", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_not_found();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "Tarea no asignada al proveedor");
    }

    #[tokio::test]
    async fn test_admin_cannot_enter_workflow() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-0", "admin", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_forbidden();
        let requests = backend.received_requests().await.unwrap();
        assert!(requests.is_empty(), "Admin must be rejected before any backend call");
    }

    #[tokio::test]
    async fn test_garbage_token_fails_claims_check() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);

        let response = server
            .get("/workflow/tasks/t1?event=1")
            .add_header(HeaderName::from_static("token"), "no-soy-un-jwt".to_string())
            .await;

        response.assert_status_unauthorized();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "Token inválido");
    }

    // ============================================================
    // Test para POST /workflow/tasks/{task_id}/comments - add_task_comment
    // ============================================================

    #[tokio::test]
    async fn test_empty_comment_rejected_without_backend_call() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .post("/workflow/tasks/t1/comments?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .json(&json!({ "text": "   " }))
            .await;

        response.assert_status_bad_request();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "El comentario no puede estar vacío");

        let requests = backend.received_requests().await.unwrap();
        assert!(requests.is_empty(), "Empty comment must not produce backend calls");
    }

    #[tokio::test]
    async fn test_comment_patches_role_suffix_and_returns_refreshed_view() {
        let backend = MockServer::start().await;
        let before = event_fixture("in progress", json!([task_fixture("t1", json!([]), json!([]))]));
        let after = event_fixture(
            "in progress",
            json!([task_fixture(
                "t1",
                json!([comment_fixture("organizer", "hola")]),
                json!([])
            )]),
        );

        // Primera lectura sin el comentario, segunda ya refrescada
        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(before))
            .up_to_n_times(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(after))
            .mount(&backend)
            .await;

        // El texto viaja recortado y con el sufijo del rol en la ruta
        Mock::given(method("PATCH"))
            .and(path("/tasks/t1/comments/organizer"))
            .and(body_json(json!({ "text": "hola" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "code": "000", "description": "Comentario añadido" }
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .post("/workflow/tasks/t1/comments?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .json(&json!({ "text": "  hola  " }))
            .await;

        response.assert_status_ok();
        let view: serde_json::Value = response.json();
        assert_eq!(view["comments"][0]["text"], "hola");
        assert_eq!(view["comments"][0]["authorLabel"], "Organizador");
    }

    #[tokio::test]
    async fn test_provider_comment_uses_provider_suffix() {
        let backend = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/task/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                task_fixture("t1", json!([]), json!([]))
            ])))
            .mount(&backend)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tasks/t1/comments/provider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "code": "000", "description": "Comentario añadido" }
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-9", "provider", TEST_JWT_SECRET);

        let response = server
            .post("/workflow/tasks/t1/comments")
            .add_header(HeaderName::from_static("token"), token)
            .json(&json!({ "text": "Presupuesto listo" }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_comment_blocked_when_event_finished() {
        let backend = MockServer::start().await;
        let event = event_fixture("finished", json!([task_fixture("t1", json!([]), json!([]))]));

        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .post("/workflow/tasks/t1/comments?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .json(&json!({ "text": "tarde" }))
            .await;

        response.assert_status_bad_request();
        let envelope: serde_json::Value = response.json();
        assert_eq!(
            envelope["message"]["description"],
            "El evento no admite cambios en sus tareas"
        );

        // Solo la lectura del evento; la mutación nunca salió
        let requests = backend.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method.as_str(), "GET");
    }

    #[tokio::test]
    async fn test_comment_backend_failure_preserves_envelope() {
        let backend = MockServer::start().await;
        let event = event_fixture("in progress", json!([task_fixture("t1", json!([]), json!([]))]));

        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&backend)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tasks/t1/comments/organizer"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": { "code": "210", "description": "Tarea bloqueada" }
            })))
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .post("/workflow/tasks/t1/comments?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .json(&json!({ "text": "hola" }))
            .await;

        response.assert_status_conflict();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["code"], "210");
        assert_eq!(envelope["message"]["description"], "Tarea bloqueada");
    }

    // ============================================================
    // Test para POST /workflow/tasks/{task_id}/files - upload_task_file
    // ============================================================

    #[tokio::test]
    async fn test_upload_without_file_part_is_400() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let form = MultipartForm::new().add_text("descripcion", "sin archivo");

        let response = server
            .post("/workflow/tasks/t1/files?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .multipart(form)
            .await;

        response.assert_status_bad_request();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "Debes seleccionar un archivo");

        let requests = backend.received_requests().await.unwrap();
        assert!(requests.is_empty(), "Upload without file must not reach the backend");
    }

    #[tokio::test]
    async fn test_upload_forwards_file_and_returns_refreshed_view() {
        let backend = MockServer::start().await;
        let before = event_fixture("in progress", json!([task_fixture("t1", json!([]), json!([]))]));
        let after = event_fixture(
            "in progress",
            json!([task_fixture(
                "t1",
                json!([]),
                json!([{ "id": "f-2", "fileName": "presupuesto.pdf" }])
            )]),
        );

        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(before))
            .up_to_n_times(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/events/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(after))
            .mount(&backend)
            .await;
        Mock::given(method("POST"))
            .and(path("/tasks/t1/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "code": "000", "description": "Archivo subido" }
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let part = Part::bytes(b"PDFDATA".to_vec())
            .file_name("presupuesto.pdf")
            .mime_type("application/pdf");
        let form = MultipartForm::new().add_part("file", part);

        let response = server
            .post("/workflow/tasks/t1/files?event=1")
            .add_header(HeaderName::from_static("token"), token)
            .multipart(form)
            .await;

        response.assert_status_ok();
        let view: serde_json::Value = response.json();
        assert_eq!(view["files"][0]["fileName"], "presupuesto.pdf");

        // El reenvío al backend fue multipart con la parte `file`
        let requests = backend.received_requests().await.unwrap();
        let upload = requests
            .iter()
            .find(|r| r.method.as_str() == "POST")
            .expect("Upload request should have been forwarded");
        let content_type = upload.headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    // ============================================================
    // Test para GET /workflow/tasks/{task_id}/files/{file_id} - download_task_file
    // ============================================================

    #[tokio::test]
    async fn test_download_passes_through_headers_and_bytes() {
        let backend = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/t1/files/f1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"PDFDATA".to_vec())
                    .insert_header("content-type", "application/pdf")
                    .insert_header("content-disposition", "attachment; filename=\"menu.pdf\""),
            )
            .expect(1)
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-1", "organizer", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1/files/f1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(headers.get("content-type").unwrap(), "application/pdf");
        assert_eq!(
            headers.get("content-disposition").unwrap(),
            "attachment; filename=\"menu.pdf\""
        );
        assert_eq!(response.as_bytes().as_ref(), b"PDFDATA");
    }

    #[tokio::test]
    async fn test_download_relays_backend_status() {
        let backend = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/t1/files/f9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": { "code": "404", "description": "Archivo no encontrado" }
            })))
            .mount(&backend)
            .await;

        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-9", "provider", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1/files/f9")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_not_found();
        let envelope: serde_json::Value = response.json();
        assert_eq!(envelope["message"]["description"], "Archivo no encontrado");
    }

    #[tokio::test]
    async fn test_download_rejects_admin() {
        let backend = MockServer::start().await;
        let state = create_test_state(&backend.uri());
        let server = create_test_server(state);
        let token = create_test_jwt("u-0", "admin", TEST_JWT_SECRET);

        let response = server
            .get("/workflow/tasks/t1/files/f1")
            .add_header(HeaderName::from_static("token"), token)
            .await;

        response.assert_status_forbidden();
        let requests = backend.received_requests().await.unwrap();
        assert!(requests.is_empty(), "Admin download must not reach the backend");
    }
}
