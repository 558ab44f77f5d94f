use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/v1";

/// A stored record: the server-assigned id next to the submitted fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub specialty: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExamType {
    pub name: String,
    pub description: String,
    pub reference_values: std::collections::BTreeMap<String, ReferenceRange>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExamResult {
    pub exam_type_id: String,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BloodTest {
    pub patient_id: String,
    pub test_date: String,
    pub exam_types: Vec<String>,
    pub results: Vec<ExamResult>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    pub lab_name: String,
}

#[derive(Default)]
pub struct Store {
    pub patients: Vec<Stored<Patient>>,
    pub doctors: Vec<Stored<Doctor>>,
    pub exam_types: Vec<Stored<ExamType>>,
    pub blood_tests: Vec<Stored<BloodTest>>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": message.into() })))
}

/// A record kind held by the store, in insertion order.
pub trait Collection: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;

    fn table(store: &Store) -> &Vec<Stored<Self>>;
    fn table_mut(store: &mut Store) -> &mut Vec<Stored<Self>>;

    /// Cross-collection checks run before insertion.
    fn validate(&self, _store: &Store) -> Result<(), String> {
        Ok(())
    }
}

impl Collection for Patient {
    const NAME: &'static str = "Patient";

    fn table(store: &Store) -> &Vec<Stored<Self>> {
        &store.patients
    }
    fn table_mut(store: &mut Store) -> &mut Vec<Stored<Self>> {
        &mut store.patients
    }
}

impl Collection for Doctor {
    const NAME: &'static str = "Doctor";

    fn table(store: &Store) -> &Vec<Stored<Self>> {
        &store.doctors
    }
    fn table_mut(store: &mut Store) -> &mut Vec<Stored<Self>> {
        &mut store.doctors
    }
}

impl Collection for ExamType {
    const NAME: &'static str = "ExamType";

    fn table(store: &Store) -> &Vec<Stored<Self>> {
        &store.exam_types
    }
    fn table_mut(store: &mut Store) -> &mut Vec<Stored<Self>> {
        &mut store.exam_types
    }
}

impl Collection for BloodTest {
    const NAME: &'static str = "Blood test";

    fn table(store: &Store) -> &Vec<Stored<Self>> {
        &store.blood_tests
    }
    fn table_mut(store: &mut Store) -> &mut Vec<Stored<Self>> {
        &mut store.blood_tests
    }

    fn validate(&self, store: &Store) -> Result<(), String> {
        fn exists<T>(table: &[Stored<T>], id: &str) -> bool {
            table.iter().any(|r| r.id == id)
        }
        if !exists(&store.patients, &self.patient_id) {
            return Err("Patient not found for the provided patient_id.".to_string());
        }
        if let Some(missing) = self.exam_types.iter().find(|id| !exists(&store.exam_types, id)) {
            return Err(format!("ExamType not found for id: {missing}"));
        }
        if let Some(doctor_id) = self.doctor_id.as_deref().filter(|id| !id.is_empty()) {
            if !exists(&store.doctors, doctor_id) {
                return Err(format!("Doctor not found for id: {doctor_id}"));
            }
        }
        if let Some(result) = self.results.iter().find(|r| !exists(&store.exam_types, &r.exam_type_id)) {
            return Err(format!(
                "ExamType not found for result exam_type_id: {}",
                result.exam_type_id
            ));
        }
        Ok(())
    }
}

pub fn app() -> Router {
    app_with_store(Store::default())
}

/// Router over a pre-filled store.
pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/patients/", get(list::<Patient>).post(create::<Patient>))
        .route("/patients/{id}", get(get_one::<Patient>))
        .route("/doctors/", get(list::<Doctor>).post(create::<Doctor>))
        .route("/doctors/{id}", get(get_one::<Doctor>))
        .route("/exam-types/", get(list::<ExamType>).post(create::<ExamType>))
        .route("/exam-types/{id}", get(get_one::<ExamType>))
        .route("/blood-tests/", get(list::<BloodTest>).post(create::<BloodTest>))
        .route("/blood-tests/{id}", get(get_one::<BloodTest>));
    Router::new()
        .route("/", get(root))
        .nest(API_PREFIX, api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to People Health Tracker API",
        "status": "operational"
    }))
}

async fn list<C: Collection>(State(db): State<Db>) -> Json<Vec<Stored<C>>> {
    let store = db.read().await;
    Json(C::table(&store).clone())
}

async fn create<C: Collection>(
    State(db): State<Db>,
    Json(input): Json<C>,
) -> Result<(StatusCode, Json<Stored<C>>), ApiError> {
    let mut store = db.write().await;
    if let Err(message) = input.validate(&store) {
        tracing::warn!(kind = C::NAME, %message, "create rejected");
        return Err(detail(StatusCode::BAD_REQUEST, message));
    }
    let record = Stored {
        id: Uuid::new_v4().to_string(),
        fields: input,
    };
    C::table_mut(&mut store).push(record.clone());
    tracing::info!(kind = C::NAME, id = %record.id, "created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_one<C: Collection>(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Stored<C>>, ApiError> {
    let store = db.read().await;
    C::table(&store)
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, format!("{} not found", C::NAME)))
}
