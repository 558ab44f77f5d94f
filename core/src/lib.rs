//! Client core for the People Health Tracker API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sit the
//! page state containers: list views that fetch and join collections, and
//! creation forms with an explicit submission state machine.
//!
//! # Design
//! - `TrackerClient` is stateless and holds only `base_url`.
//! - Every operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and hosts can run independent fetches in parallel.
//! - Views bump a `Revision` on each mutation; hosts redraw on change.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod forms;
pub mod http;
pub mod resource;
pub mod types;
pub mod view;

pub use client::{TrackerClient, DEFAULT_BASE_URL};
pub use error::{ApiError, FormError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Named, NewRecord, Record, Resource};
pub use types::{
    BloodTest, Doctor, ExamResult, ExamType, NewBloodTest, NewDoctor, NewExamType, NewPatient, Patient,
    ReferenceRange, ReferenceValues,
};
pub use view::form::{FormFields, FormView, Phase};
pub use view::list::{ListState, ListView};
pub use view::route::Route;
pub use view::table::Table;
pub use view::{RedrawTracker, Revision};
