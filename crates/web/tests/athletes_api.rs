mod common;

use axum::http::StatusCode;
use common::{TestApp, athlete};
use serde_json::{Value, json};

async fn seeded_app() -> TestApp {
    let app = TestApp::new();
    app.seed_category("Scale").await;
    app.seed_category("RX").await;
    app.seed_training_center("CT King").await;
    app
}

async fn create_one(app: &TestApp, cpf: &str) -> String {
    let response = app
        .post("/athletes", athlete("Joao", cpf, "Scale", "CT King"))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_single_athlete_in_single_athlete_out() {
    let app = seeded_app().await;

    let response = app
        .post("/athletes", athlete("Joao", "12345678900", "Scale", "CT King"))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert!(data.is_object());
    assert_eq!(data["nome"], json!("Joao"));
    assert_eq!(data["peso"], json!(70.5));
    assert_eq!(data["altura"], json!(1.75));
    assert_eq!(data["categoria"], json!({"nome": "Scale"}));
    assert_eq!(data["centro_treinamento"], json!({"nome": "CT King"}));
    assert!(data["created_at"].is_string());
}

#[tokio::test]
async fn test_batch_in_batch_out_in_order() {
    let app = seeded_app().await;

    let response = app
        .post(
            "/athletes/",
            json!([
                athlete("Ana", "11111111111", "Scale", "CT King"),
                athlete("Bia", "22222222222", "RX", "CT King"),
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let items = response.data().as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["cpf"], json!("11111111111"));
    assert_eq!(items[1]["categoria"]["nome"], json!("RX"));
}

#[tokio::test]
async fn test_one_element_batch_yields_single_athlete() {
    let app = seeded_app().await;

    let response = app
        .post(
            "/athletes",
            json!([athlete("Ana", "11111111111", "Scale", "CT King")]),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.data().is_object());
    assert_eq!(response.data()["cpf"], json!("11111111111"));
}

#[tokio::test]
async fn test_duplicate_cpf_in_batch_persists_nothing() {
    let app = seeded_app().await;

    let response = app
        .post(
            "/athletes",
            json!([
                athlete("Ana", "11111111111", "Scale", "CT King"),
                athlete("Bia", "11111111111", "Scale", "CT King"),
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.error_message().contains("11111111111"));

    let listed = app.get("/athletes").await;
    assert_eq!(listed.data(), &json!([]));
}

#[tokio::test]
async fn test_existing_cpf_is_conflict() {
    let app = seeded_app().await;
    create_one(&app, "12345678900").await;

    let response = app
        .post("/athletes", athlete("Outro", "12345678900", "RX", "CT King"))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_category_in_batch_persists_nothing() {
    let app = seeded_app().await;

    let response = app
        .post(
            "/athletes",
            json!([
                athlete("Ana", "11111111111", "Scale", "CT King"),
                athlete("Bia", "22222222222", "Elite", "CT King"),
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error_message().contains("Elite"));
    assert_eq!(app.get("/athletes").await.data(), &json!([]));
}

#[tokio::test]
async fn test_unknown_training_center_is_bad_request() {
    let app = seeded_app().await;

    let response = app
        .post("/athletes", athlete("Ana", "11111111111", "Scale", "CT Nowhere"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_batch_validation_errors_carry_item_index() {
    let app = seeded_app().await;
    let mut invalid = athlete("Bia", "22222222222", "Scale", "CT King");
    invalid["peso"] = json!(0.0);
    invalid["sexo"] = json!("MF");

    let response = app
        .post(
            "/athletes",
            json!([athlete("Ana", "11111111111", "Scale", "CT King"), invalid]),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.validation_fields(), vec!["1.peso", "1.sexo"]);
}

#[tokio::test]
async fn test_missing_field_in_batch_item_is_unprocessable() {
    let app = seeded_app().await;
    let mut incomplete = athlete("Bia", "22222222222", "Scale", "CT King");
    incomplete.as_object_mut().unwrap().remove("cpf");

    let response = app.post("/athletes", json!([incomplete])).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.validation_fields(), vec!["0.cpf"]);
}

#[tokio::test]
async fn test_list_and_get_athletes() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let listed = app.get("/athletes").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let fetched = app.get(&format!("/athletes/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["cpf"], json!("12345678900"));
}

#[tokio::test]
async fn test_patch_weight_only_changes_weight() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;
    let before = app.get(&format!("/athletes/{id}")).await;

    let response = app
        .patch(&format!("/athletes/{id}"), json!({"peso": 80.0}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["peso"], json!(80.0));

    let mut expected = before.data().clone();
    expected["peso"] = json!(80.0);
    assert_eq!(response.data(), &expected);
}

#[tokio::test]
async fn test_patch_moves_athlete_to_another_category() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let response = app
        .patch(&format!("/athletes/{id}"), json!({"categoria": {"nome": "RX"}}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["categoria"]["nome"], json!("RX"));
}

#[tokio::test]
async fn test_patch_with_unknown_category_changes_nothing() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let response = app
        .patch(
            &format!("/athletes/{id}"),
            json!({"idade": 40, "categoria": {"nome": "Elite"}}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let fetched = app.get(&format!("/athletes/{id}")).await;
    assert_eq!(fetched.data()["idade"], json!(25));
    assert_eq!(fetched.data()["categoria"]["nome"], json!("Scale"));
}

#[tokio::test]
async fn test_patch_reference_without_name_is_bad_request() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let response = app
        .patch(&format!("/athletes/{id}"), json!({"centro_treinamento": {}}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_rejects_non_positive_height() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let response = app
        .patch(&format!("/athletes/{id}"), json!({"altura": -1.0}))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.validation_fields(), vec!["altura"]);
}

#[tokio::test]
async fn test_patch_unknown_athlete_is_not_found() {
    let app = seeded_app().await;

    let response = app
        .patch(
            "/athletes/6f1c2a4e-0000-4000-8000-000000000000",
            json!({"idade": 30}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_athlete_frees_its_category() {
    let app = seeded_app().await;
    let id = create_one(&app, "12345678900").await;

    let deleted = app.delete(&format!("/athletes/{id}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(deleted.body, Value::Null);
    assert_eq!(
        app.get(&format!("/athletes/{id}")).await.status,
        StatusCode::NOT_FOUND
    );

    let categories = app.get("/categories").await;
    let scale_id = categories.data()[0]["id"].as_str().unwrap().to_string();
    let response = app.delete(&format!("/categories/{scale_id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_malformed_athlete_id_is_unprocessable() {
    let app = seeded_app().await;

    let response = app.delete("/athletes/123").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.validation_fields(), vec!["id"]);
}
