//! Drives the core views: executes the requests they hand out, feeds the
//! responses back and draws a frame whenever a view changes.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracker_core::forms::{BloodTestField, BloodTestForm, Choice, DoctorForm, ExamTypeForm, PatientForm};
use tracker_core::view::route::singular;
use tracker_core::{
    BloodTest, Doctor, ExamType, FormFields, FormView, ListState, ListView, NewRecord, Patient, Record, Resource,
    Route, TrackerClient,
};

use crate::cli::{Command, NewForm};
use crate::render::{self, Screen};
use crate::transport::Transport;

pub struct Shell<W> {
    client: TrackerClient,
    transport: Transport,
    screen: Screen<W>,
}

impl<W: Write> Shell<W> {
    pub fn new(base_url: &str, out: W) -> Self {
        Self {
            client: TrackerClient::new(base_url),
            transport: Transport::new(),
            screen: Screen::new(out),
        }
    }

    pub fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Home => self.home(),
            Command::List { collection } => self.list(collection).map(|_| ()),
            Command::Show { collection, id } => self.show(collection, &id),
            Command::New { form } => self.new_record(form),
        }
    }

    pub fn into_inner(self) -> W {
        self.screen.into_inner()
    }

    fn home(&mut self) -> Result<()> {
        self.screen.navigate();
        self.screen.present(Default::default(), render::home)?;
        Ok(())
    }

    /// Load a list page, drawing it as collections arrive.
    pub fn list(&mut self, resource: Resource) -> Result<ListState> {
        self.screen.navigate();
        let mut view = ListView::new(resource);
        self.screen.present(view.revision(), || render::list_page(&view))?;

        let requests = view.requests(&self.client);
        let (client, transport, screen) = (&self.client, &self.transport, &mut self.screen);
        let mut drawn = Ok(());
        transport.execute_all(requests, |resource, response| {
            view.receive(client, resource, response);
            if drawn.is_ok() {
                drawn = screen.present(view.revision(), || render::list_page(&view));
            }
        });
        drawn?;

        if view.is_loading() {
            bail!("could not load {}", resource.title().to_lowercase());
        }
        Ok(view.state())
    }

    fn show(&mut self, resource: Resource, id: &str) -> Result<()> {
        let json = match resource {
            Resource::Patients => self.fetch_one::<Patient>(id)?,
            Resource::Doctors => self.fetch_one::<Doctor>(id)?,
            Resource::ExamTypes => self.fetch_one::<ExamType>(id)?,
            Resource::BloodTests => self.fetch_one::<BloodTest>(id)?,
        };
        self.screen.navigate();
        self.screen.present(Default::default(), || json)?;
        Ok(())
    }

    fn fetch_one<R: Record + Serialize>(&self, id: &str) -> Result<String> {
        let resource = R::RESOURCE;
        let response = self.transport.execute(self.client.build_get(resource, id));
        let record: R = response
            .and_then(|r| self.client.parse_get(r))
            .with_context(|| format!("fetching {} {id}", singular(resource).to_lowercase()))?;
        Ok(serde_json::to_string_pretty(&record)?)
    }

    fn new_record(&mut self, form: NewForm) -> Result<()> {
        let target = match form {
            NewForm::Patient(args) => self.submit::<PatientForm>(args.into_msgs())?,
            NewForm::Doctor(args) => self.submit::<DoctorForm>(args.into_msgs())?,
            NewForm::ExamType(args) => self.submit::<ExamTypeForm>(args.into_msgs())?,
            NewForm::Exam(args) => self.submit::<BloodTestForm>(args.into_msgs())?,
        };
        match target {
            Route::List(resource) => self.list(resource).map(|_| ()),
            Route::Home => self.home(),
            Route::New(_) => Ok(()),
        }
    }

    /// Mount a form, apply the edits, submit once and settle it.
    fn submit<F>(&mut self, msgs: Vec<F::Msg>) -> Result<Route>
    where
        F: FormFields + ResolveNames,
    {
        self.screen.navigate();
        let mut view: FormView<F> = FormView::new();

        let requests = view.auxiliary_requests(&self.client);
        let client = &self.client;
        self.transport
            .execute_all(requests, |resource, response| view.receive_auxiliary(client, resource, response));

        for msg in msgs {
            let msg = view.fields().resolve(msg);
            view.update(msg);
        }

        let heading = Route::New(<F::Payload as NewRecord>::RESOURCE).label();
        let Some(request) = view.submit(&self.client) else {
            let message = view.error().unwrap_or("submission refused").to_string();
            bail!(message);
        };
        self.screen
            .present(view.revision(), || format!("{heading}: {}", render::form_status(view.phase())))?;

        let response = self.transport.execute(request);
        let route = view.complete(&self.client, response);
        self.screen
            .present(view.revision(), || format!("{heading}: {}", render::form_status(view.phase())))?;
        match route {
            Some(route) => Ok(route),
            None => bail!(view.error().unwrap_or(F::FAILURE).to_string()),
        }
    }
}

/// Maps names typed on the command line onto ids from fetched option lists.
pub trait ResolveNames: FormFields {
    fn resolve(&self, msg: Self::Msg) -> Self::Msg {
        msg
    }
}

impl ResolveNames for PatientForm {}
impl ResolveNames for DoctorForm {}
impl ResolveNames for ExamTypeForm {}

impl ResolveNames for BloodTestForm {
    fn resolve(&self, msg: BloodTestField) -> BloodTestField {
        let options = &self.options;
        match msg {
            BloodTestField::PatientId(v) => BloodTestField::PatientId(choice_id(&options.patients, v)),
            BloodTestField::DoctorId(v) => BloodTestField::DoctorId(choice_id(&options.doctors, v)),
            BloodTestField::ExamTypes(vs) => BloodTestField::ExamTypes(
                vs.into_iter().map(|v| choice_id(&options.exam_types, v)).collect(),
            ),
            BloodTestField::ResultExamType(idx, v) => {
                BloodTestField::ResultExamType(idx, choice_id(&options.exam_types, v))
            }
            other => other,
        }
    }
}

/// An exact label match wins; anything else is taken as an id.
fn choice_id(choices: &[Choice], text: String) -> String {
    choices
        .iter()
        .find(|c| c.label == text)
        .map(|c| c.id.clone())
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<Choice> {
        vec![
            Choice {
                id: "p1".to_string(),
                label: "Ana".to_string(),
            },
            Choice {
                id: "p2".to_string(),
                label: "Bo".to_string(),
            },
        ]
    }

    #[test]
    fn label_resolves_to_id() {
        assert_eq!(choice_id(&choices(), "Bo".to_string()), "p2");
    }

    #[test]
    fn unknown_text_passes_through_as_id() {
        assert_eq!(choice_id(&choices(), "p1".to_string()), "p1");
        assert_eq!(choice_id(&choices(), "Zed".to_string()), "Zed");
    }

    #[test]
    fn exam_messages_resolve_every_reference() {
        let mut form = BloodTestForm::default();
        form.options.patients = choices();
        form.options.exam_types = vec![Choice {
            id: "t1".to_string(),
            label: "Glucose".to_string(),
        }];
        assert_eq!(
            form.resolve(BloodTestField::ExamTypes(vec!["Glucose".to_string(), "t9".to_string()])),
            BloodTestField::ExamTypes(vec!["t1".to_string(), "t9".to_string()])
        );
        assert_eq!(
            form.resolve(BloodTestField::ResultExamType(0, "Glucose".to_string())),
            BloodTestField::ResultExamType(0, "t1".to_string())
        );
        assert_eq!(
            form.resolve(BloodTestField::PatientId("Ana".to_string())),
            BloodTestField::PatientId("p1".to_string())
        );
        assert_eq!(
            form.resolve(BloodTestField::LabName("Ana".to_string())),
            BloodTestField::LabName("Ana".to_string())
        );
    }
}
