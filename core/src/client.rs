//! Stateless HTTP request builder and response parser for the tracker API.
//!
//! # Design
//! `TrackerClient` holds only a `base_url`. Every operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the matching `HttpResponse`. Operations are generic over the
//! record type, which names its own collection through `Record::RESOURCE`.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::{NewRecord, Record, Resource};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
}

impl Default for TrackerClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TrackerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}/", self.base_url, resource.collection())
    }

    pub fn build_list(&self, resource: Resource) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(resource),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, resource: Resource, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{id}", self.collection_url(resource)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create<P: NewRecord>(&self, payload: &P) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(P::RESOURCE),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Decode a collection listing.
    ///
    /// Any JSON body that is not an array, whatever the status, yields an
    /// empty list. Array elements that do not decode are skipped with a
    /// warning so one bad record cannot hide the rest. Only a body that is
    /// not JSON at all is an error.
    pub fn parse_list<R: Record>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        let value: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        match value {
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(record) => Some(record),
                    Err(error) => {
                        tracing::warn!(resource = %R::RESOURCE, index, %error, "skipping undecodable record");
                        None
                    }
                })
                .collect()),
            other => {
                tracing::debug!(
                    resource = %R::RESOURCE,
                    status = response.status,
                    kind = json_kind(&other),
                    "non-array listing treated as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn parse_get<R: Record>(&self, response: HttpResponse) -> Result<R, ApiError> {
        if response.status == 404 {
            return Err(ApiError::NotFound);
        }
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Accept any 2xx. The created record in the body is not needed by the
    /// caller, so it is not decoded.
    pub fn parse_create(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
