//! List pages: fetch one primary collection, plus the collections it joins
//! against, and tabulate it.
//!
//! # Design
//! `ListView::requests` is the mount step: every collection the page needs
//! is requested at once, and the host may execute them concurrently. Each
//! response is fed back through `receive` in whatever order it completes.
//! The view leaves `Loading` only when every required collection has
//! settled. A collection whose fetch failed never settles.

use crate::client::TrackerClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::Resource;
use crate::types::{BloodTest, Doctor, ExamType, Patient};
use crate::view::lookup::NameLookup;
use crate::view::route::{singular, Route};
use crate::view::table::{self, Table};
use crate::view::Revision;

/// Collections fetched by a page. `None` means not settled yet.
#[derive(Debug, Default, Clone)]
pub struct Collections {
    pub patients: Option<Vec<Patient>>,
    pub doctors: Option<Vec<Doctor>>,
    pub exam_types: Option<Vec<ExamType>>,
    pub blood_tests: Option<Vec<BloodTest>>,
}

impl Collections {
    pub fn is_settled(&self, resource: Resource) -> bool {
        match resource {
            Resource::Patients => self.patients.is_some(),
            Resource::Doctors => self.doctors.is_some(),
            Resource::ExamTypes => self.exam_types.is_some(),
            Resource::BloodTests => self.blood_tests.is_some(),
        }
    }

    /// Decode `response` into the slot for `resource`, returning how many
    /// records it held.
    pub fn settle(
        &mut self,
        client: &TrackerClient,
        resource: Resource,
        response: HttpResponse,
    ) -> Result<usize, ApiError> {
        fn store<T>(slot: &mut Option<Vec<T>>, records: Vec<T>) -> usize {
            let count = records.len();
            *slot = Some(records);
            count
        }
        Ok(match resource {
            Resource::Patients => store(&mut self.patients, client.parse_list(response)?),
            Resource::Doctors => store(&mut self.doctors, client.parse_list(response)?),
            Resource::ExamTypes => store(&mut self.exam_types, client.parse_list(response)?),
            Resource::BloodTests => store(&mut self.blood_tests, client.parse_list(response)?),
        })
    }

    pub fn patients(&self) -> &[Patient] {
        self.patients.as_deref().unwrap_or_default()
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.doctors.as_deref().unwrap_or_default()
    }

    pub fn exam_types(&self) -> &[ExamType] {
        self.exam_types.as_deref().unwrap_or_default()
    }

    pub fn blood_tests(&self) -> &[BloodTest] {
        self.blood_tests.as_deref().unwrap_or_default()
    }

    fn len(&self, resource: Resource) -> usize {
        match resource {
            Resource::Patients => self.patients().len(),
            Resource::Doctors => self.doctors().len(),
            Resource::ExamTypes => self.exam_types().len(),
            Resource::BloodTests => self.blood_tests().len(),
        }
    }
}

/// What a list page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Empty(String),
    Rows(Table),
}

#[derive(Debug)]
pub struct ListView {
    primary: Resource,
    collections: Collections,
    revision: Revision,
}

impl ListView {
    pub fn new(primary: Resource) -> Self {
        Self {
            primary,
            collections: Collections::default(),
            revision: Revision::default(),
        }
    }

    pub fn primary(&self) -> Resource {
        self.primary
    }

    /// Collections this page waits for, primary first.
    pub fn required(&self) -> &'static [Resource] {
        match self.primary {
            Resource::Patients => &[Resource::Patients],
            Resource::Doctors => &[Resource::Doctors],
            Resource::ExamTypes => &[Resource::ExamTypes],
            Resource::BloodTests => &[
                Resource::BloodTests,
                Resource::Patients,
                Resource::ExamTypes,
                Resource::Doctors,
            ],
        }
    }

    pub fn requests(&self, client: &TrackerClient) -> Vec<(Resource, HttpRequest)> {
        self.required()
            .iter()
            .map(|&resource| {
                let req = client.build_list(resource);
                tracing::debug!(%resource, path = %req.path, "list request");
                (resource, req)
            })
            .collect()
    }

    /// Feed back the outcome of one request from `requests`.
    pub fn receive(
        &mut self,
        client: &TrackerClient,
        resource: Resource,
        response: Result<HttpResponse, ApiError>,
    ) {
        match response.and_then(|r| self.collections.settle(client, resource, r)) {
            Ok(count) => {
                tracing::info!(%resource, count, "collection loaded");
                self.revision.bump();
            }
            Err(error) => {
                tracing::warn!(%resource, %error, "collection fetch failed; page stays loading");
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.required().iter().all(|&r| self.collections.is_settled(r))
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Link to the page's creation form.
    pub fn new_link(&self) -> Route {
        Route::New(self.primary)
    }

    pub fn state(&self) -> ListState {
        if self.is_loading() {
            return ListState::Loading;
        }
        if self.collections.len(self.primary) == 0 {
            return ListState::Empty(format!("No {} found.", plural_lower(self.primary)));
        }
        let c = &self.collections;
        let table = match self.primary {
            Resource::Patients => table::patients(c.patients()),
            Resource::Doctors => table::doctors(c.doctors()),
            Resource::ExamTypes => table::exam_types(c.exam_types()),
            Resource::BloodTests => {
                let patients = NameLookup::from_records(c.patients());
                let exam_types = NameLookup::from_records(c.exam_types());
                let doctors = NameLookup::from_records(c.doctors());
                table::blood_tests(c.blood_tests(), &patients, &exam_types, &doctors)
            }
        };
        ListState::Rows(table)
    }
}

fn plural_lower(resource: Resource) -> String {
    format!("{}s", singular(resource).to_lowercase())
}
