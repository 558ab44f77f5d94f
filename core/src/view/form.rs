//! Creation forms: editable fields, one submission in flight at a time.
//!
//! # Design
//! `FormView` owns the submission state machine shared by every form:
//!
//! ```text
//! Idle --submit--> Submitting --2xx--> Succeeded (host navigates away)
//!   ^                  |
//!   +---- Failed <-----+ non-2xx, transport or decode failure
//! ```
//!
//! The field set and its update messages are supplied by a `FormFields`
//! implementation, one per entity.

use crate::client::TrackerClient;
use crate::error::{ApiError, FormError};
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::{NewRecord, Resource};
use crate::view::route::Route;
use crate::view::Revision;

/// Field state and payload derivation for one kind of record.
pub trait FormFields: Default {
    /// A single field edit.
    type Msg;
    type Payload: NewRecord;

    /// Shown when the server answers with a non-2xx status.
    const FAILURE: &'static str;

    fn update(&mut self, msg: Self::Msg);

    /// Fail on the first required field left empty.
    fn check_required(&self) -> Result<(), FormError>;

    fn payload(&self) -> Result<Self::Payload, FormError>;

    /// Collections fetched on mount to populate option lists.
    fn auxiliary(&self) -> &'static [Resource] {
        &[]
    }

    fn receive_auxiliary(
        &mut self,
        _client: &TrackerClient,
        _resource: Resource,
        _response: HttpResponse,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug)]
pub struct FormView<F> {
    fields: F,
    phase: Phase,
    revision: Revision,
}

impl<F: FormFields> Default for FormView<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormFields> FormView<F> {
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            phase: Phase::Idle,
            revision: Revision::default(),
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// The list page shown after a successful submit.
    pub fn target(&self) -> Route {
        Route::List(Self::resource())
    }

    fn resource() -> Resource {
        <F::Payload as NewRecord>::RESOURCE
    }

    /// Edits stay possible while a submission is in flight.
    pub fn update(&mut self, msg: F::Msg) {
        self.fields.update(msg);
        self.revision.bump();
    }

    pub fn auxiliary_requests(&self, client: &TrackerClient) -> Vec<(Resource, HttpRequest)> {
        self.fields
            .auxiliary()
            .iter()
            .map(|&resource| (resource, client.build_list(resource)))
            .collect()
    }

    /// Each option list settles on its own; a failure leaves it empty.
    pub fn receive_auxiliary(
        &mut self,
        client: &TrackerClient,
        resource: Resource,
        response: Result<HttpResponse, ApiError>,
    ) {
        match response.and_then(|r| self.fields.receive_auxiliary(client, resource, r)) {
            Ok(()) => self.revision.bump(),
            Err(error) => tracing::warn!(%resource, %error, "option list fetch failed"),
        }
    }

    /// Start a submission.
    ///
    /// Returns `None` when a submission is already in flight or when the
    /// fields fail local checks; in the latter case the form moves to
    /// `Failed` with the reason.
    pub fn submit(&mut self, client: &TrackerClient) -> Option<HttpRequest> {
        if self.is_submitting() {
            tracing::debug!("submit ignored while a request is in flight");
            return None;
        }
        let request = self
            .fields
            .check_required()
            .and_then(|()| self.fields.payload())
            .and_then(|payload| client.build_create(&payload).map_err(FormError::from));
        self.revision.bump();
        match request {
            Ok(req) => {
                self.phase = Phase::Submitting;
                Some(req)
            }
            Err(error) => {
                tracing::warn!(%error, "form rejected before submission");
                self.phase = Phase::Failed(error.to_string());
                None
            }
        }
    }

    /// Settle the in-flight submission. Returns the route to navigate to on
    /// success.
    pub fn complete(
        &mut self,
        client: &TrackerClient,
        response: Result<HttpResponse, ApiError>,
    ) -> Option<Route> {
        if !self.is_submitting() {
            return None;
        }
        self.revision.bump();
        let resource = Self::resource();
        match response.and_then(|r| client.parse_create(r)) {
            Ok(()) => {
                let target = self.target();
                tracing::info!(%resource, "record created");
                self.phase = Phase::Succeeded;
                Some(target)
            }
            Err(error) => {
                tracing::warn!(%resource, %error, "create failed");
                let message = match error {
                    ApiError::Http { .. } => F::FAILURE.to_string(),
                    other => other.to_string(),
                };
                self.phase = Phase::Failed(message);
                None
            }
        }
    }
}

/// Enforce a non-empty value for a required field.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

/// Parse decimal text entered in a numeric input.
pub(crate) fn parse_decimal(field: &str, text: &str) -> Result<f64, FormError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
