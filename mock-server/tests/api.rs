use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Patient, Stored};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const PATIENT: &str = r#"{"name":"Ana","email":"ana@x.io","date_of_birth":"1990-01-01",
    "gender":"F","phone":"1","address":"Rua 1","diseases":["Flu"],"notes":""}"#;

// --- root ---

#[tokio::test]
async fn root_reports_operational() {
    let resp = app().oneshot(get_request("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "operational");
}

// --- list ---

#[tokio::test]
async fn every_collection_starts_empty() {
    for collection in ["patients", "doctors", "exam-types", "blood-tests"] {
        let resp = app()
            .oneshot(get_request(&format!("/api/v1/{collection}/")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{collection}");
        let items: Vec<Value> = body_json(resp).await;
        assert!(items.is_empty(), "{collection}");
    }
}

// --- create ---

#[tokio::test]
async fn create_patient_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/patients/", PATIENT))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Stored<Patient> = body_json(resp).await;
    assert!(!created.id.is_empty());
    assert_eq!(created.fields.name, "Ana");
    assert_eq!(created.fields.diseases, vec!["Flu"]);
}

#[tokio::test]
async fn create_exam_type_keeps_only_sent_categories() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/exam-types/",
            r#"{"name":"Hb","description":"g/dL","reference_values":{"female":{"min":12,"max":15.5}}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    let ranges = body["reference_values"].as_object().unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!(body["reference_values"]["female"]["max"], 15.5);
}

#[tokio::test]
async fn create_doctor_missing_specialty_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/doctors/",
            r#"{"name":"Grey","email":"g","date_of_birth":"d","gender":"F","phone":"1","address":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn blood_test_for_unknown_patient_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/blood-tests/",
            r#"{"patient_id":"nobody","test_date":"2024-05-01","exam_types":[],"results":[],"lab_name":"L"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "Patient not found for the provided patient_id.");
}

// --- get ---

#[tokio::test]
async fn get_unknown_patient_returns_404() {
    let resp = app()
        .oneshot(get_request("/api/v1/patients/missing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["detail"], "Patient not found");
}

// --- lifecycle ---

#[tokio::test]
async fn create_list_get_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create patient
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/v1/patients/", PATIENT))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let patient: Stored<Patient> = body_json(resp).await;

    // create exam type
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/exam-types/",
            r#"{"name":"Glucose","description":"mg/dL","reference_values":{}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let exam_type: Value = body_json(resp).await;
    let exam_type_id = exam_type["id"].as_str().unwrap().to_string();

    // create blood test referencing both
    let body = format!(
        r#"{{"patient_id":"{}","test_date":"2024-05-01","exam_types":["{exam_type_id}"],
            "results":[{{"exam_type_id":"{exam_type_id}","value":92.5}}],"lab_name":"Central"}}"#,
        patient.id
    );
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/v1/blood-tests/", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let test: Value = body_json(resp).await;
    let test_id = test["id"].as_str().unwrap().to_string();

    // list blood tests
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/v1/blood-tests/"))
        .await
        .unwrap();
    let tests: Vec<Value> = body_json(resp).await;
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0]["patient_id"], patient.id.as_str());
    assert_eq!(tests[0]["results"][0]["value"], 92.5);

    // get by id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/v1/blood-tests/{test_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = body_json(resp).await;
    assert_eq!(fetched["lab_name"], "Central");
}
