//! JSON API behaviour, driven through the router

mod support;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use support::{app, body_json, empty, json_request, session_cookie};

#[tokio::test]
async fn test_status_and_health_are_public() {
    let app = app();

    let response = app.send(empty("GET", "/api/status", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "online");
    assert_eq!(body["environment"], "development");
    assert!(body["endpoints"].as_array().unwrap().len() > 10);

    let response = app.send(empty("GET", "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_endpoints_require_a_session() {
    let app = app();

    for (method, uri) in [
        ("GET", "/api/tarefas"),
        ("GET", "/api/usuario"),
        ("GET", "/api/estatisticas"),
        ("POST", "/api/tarefas/abc/concluir"),
    ] {
        let response = app.send(empty(method, uri, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Acesso negado. Faça login para continuar.");
    }

    let response = app
        .send(empty("GET", "/api/tarefas", Some("taskdesk_session=forged")))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = app();

    for (email, password) in [("admin@teste.com", "errada"), ("nobody@teste.com", "123456")] {
        let response = app
            .send(json_request(
                "POST",
                "/api/login",
                None,
                json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&response).is_none());
        assert_eq!(body_json(response).await["message"], "Email ou senha incorretos!");
    }

    let response = app
        .send(json_request("POST", "/api/login", None, json!({ "email": "" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_then_login_with_portuguese_field_names() {
    let app = app();

    let response = app
        .send(json_request(
            "POST",
            "/api/registro",
            None,
            json!({
                "nomeCompleto": "Ana Souza",
                "email": " Ana@Example.com ",
                "dataNascimento": "1992-04-01",
                "senha": "segredo",
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert!(body["data"].get("password").is_none());

    let response = app
        .send(json_request(
            "POST",
            "/api/registro",
            None,
            json!({
                "fullName": "Ana Clone",
                "email": "ANA@example.com",
                "birthDate": "1990-01-01",
                "password": "segredo",
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Email já cadastrado!");

    let cookie = app.login("ana@example.com", "segredo").await;
    let response = app.send(empty("GET", "/api/usuario", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["fullName"], "Ana Souza");
}

#[tokio::test]
async fn test_task_bodies_accept_portuguese_field_names() {
    let app = app();
    let cookie = app.login_demo().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/tarefas",
            Some(&cookie),
            json!({ "descricao": "Comprar leite", "prioridade": "urgente" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Comprar leite");
    assert_eq!(body["data"]["priority"], "urgent");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/tarefas/{id}"),
            Some(&cookie),
            json!({ "descricao": "Comprar pão", "prioridade": "media", "status": "concluida" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Comprar pão");
    assert_eq!(body["data"]["priority"], "medium");
    assert_eq!(body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_task_lifecycle_over_the_api() {
    let app = app();
    let cookie = app.login_demo().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/tarefas",
            Some(&cookie),
            json!({ "title": "Buy milk", "priority": "urgent" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Tarefa criada com sucesso");
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    app.clock.advance(Duration::minutes(90));
    let response = app
        .send(empty("POST", &format!("/api/tarefas/{id}/concluir"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["elapsed"], "1 hora(s)");

    let response = app
        .send(empty("POST", &format!("/api/tarefas/{id}/concluir"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Tarefa já está concluída");

    let response = app
        .send(empty("GET", "/api/estatisticas", Some(&cookie)))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["completionPercentage"], 100);
    assert_eq!(body["data"]["averageCompletionLabel"], "1 hora(s)");
    assert_eq!(body["data"]["byPriority"]["urgent"], 1);

    let response = app
        .send(empty("POST", &format!("/api/tarefas/{id}/reabrir"), Some(&cookie)))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["elapsed"].is_null());
    assert!(body["data"]["completedAt"].is_null());

    let response = app
        .send(empty("DELETE", &format!("/api/tarefas/{id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(empty("GET", &format!("/api/tarefas/{id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Tarefa não encontrada");
}

#[tokio::test]
async fn test_list_is_sorted_and_counted() {
    let app = app();
    let cookie = app.login_demo().await;

    for (title, priority) in [("Low one", "low"), ("Urgent one", "urgent"), ("Medium one", "medium")] {
        app.clock.advance(Duration::minutes(1));
        let response = app
            .send(json_request(
                "POST",
                "/api/tarefas",
                Some(&cookie),
                json!({ "title": title, "priority": priority }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = body_json(app.send(empty("GET", "/api/tarefas", Some(&cookie))).await).await;
    assert_eq!(body["total"], 3);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Urgent one", "Medium one", "Low one"]);
}

#[tokio::test]
async fn test_put_applies_partial_updates_and_status() {
    let app = app();
    let cookie = app.login_demo().await;

    let body = body_json(
        app.send(json_request(
            "POST",
            "/api/tarefas",
            Some(&cookie),
            json!({ "title": "Write report", "detail": "Q2 numbers" }),
        ))
        .await,
    )
    .await;
    assert_eq!(body["data"]["priority"], "low");
    let uri = format!("/api/tarefas/{}", body["data"]["id"].as_str().unwrap());

    let response = app
        .send(json_request(
            "PUT",
            &uri,
            Some(&cookie),
            json!({ "priority": "medium", "status": "completed" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Write report");
    assert_eq!(body["data"]["detail"], "Q2 numbers");
    assert_eq!(body["data"]["priority"], "medium");
    assert_eq!(body["data"]["elapsed"], "Menos de 1 minuto");

    let response = app
        .send(json_request("PUT", &uri, Some(&cookie), json!({ "status": "done" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(json_request("PUT", &uri, Some(&cookie), json!({ "title": "ab" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Título deve ter pelo menos 3 caracteres!"
    );
}

#[tokio::test]
async fn test_validation_failures_are_400() {
    let app = app();
    let cookie = app.login_demo().await;

    let response = app
        .send(json_request("POST", "/api/tarefas", Some(&cookie), json!({ "title": "ab" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(json_request(
            "POST",
            "/api/tarefas",
            Some(&cookie),
            json!({ "title": "Buy milk", "priority": "asap" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Prioridade inválida!");

    let body = body_json(app.send(empty("GET", "/api/tarefas", Some(&cookie))).await).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_400_envelope() {
    let app = app();
    let cookie = app.login_demo().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/tarefas")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_foreign_and_unknown_tasks_are_not_found() {
    let app = app();
    let admin = app.login_demo().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/registro",
            None,
            json!({
                "fullName": "Bia Lima",
                "email": "bia@example.com",
                "birthDate": "1995-07-20",
                "password": "segredo",
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let bia = app.login("bia@example.com", "segredo").await;

    let body = body_json(
        app.send(json_request(
            "POST",
            "/api/tarefas",
            Some(&bia),
            json!({ "title": "Pay rent" }),
        ))
        .await,
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    for (method, uri) in [
        ("GET", format!("/api/tarefas/{id}")),
        ("POST", format!("/api/tarefas/{id}/concluir")),
        ("DELETE", format!("/api/tarefas/{id}")),
        ("GET", "/api/tarefas/not-a-uuid".to_string()),
    ] {
        let response = app.send(empty(method, &uri, Some(&admin))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
    }

    let body = body_json(
        app.send(empty("GET", &format!("/api/tarefas/{id}"), Some(&bia)))
            .await,
    )
    .await;
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = app();
    let cookie = app.login_demo().await;

    let response = app.send(empty("POST", "/api/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Logout realizado com sucesso!"
    );

    let response = app.send(empty("GET", "/api/usuario", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
