//! The exam form: references to patients, exam types and a doctor, plus a
//! free list of measured results.

use crate::client::TrackerClient;
use crate::error::{ApiError, FormError};
use crate::http::HttpResponse;
use crate::resource::{Named, Resource};
use crate::types::{Doctor, ExamResult, ExamType, NewBloodTest, Patient};
use crate::view::form::{non_empty, parse_decimal, require, FormFields};

/// One selectable option: the id sent, the name shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

impl Choice {
    fn from_records<R: Named>(records: &[R]) -> Vec<Choice> {
        records
            .iter()
            .map(|r| Choice {
                id: r.id().to_string(),
                label: r.name().to_string(),
            })
            .collect()
    }
}

/// A result row as typed: the value is still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub exam_type_id: String,
    pub value: String,
}

impl ResultRow {
    fn is_blank(&self) -> bool {
        self.exam_type_id.is_empty() && self.value.is_empty()
    }
}

/// Option lists fetched on mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamOptions {
    pub patients: Vec<Choice>,
    pub exam_types: Vec<Choice>,
    pub doctors: Vec<Choice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BloodTestForm {
    pub patient_id: String,
    pub test_date: String,
    pub exam_types: Vec<String>,
    pub results: Vec<ResultRow>,
    pub notes: String,
    pub doctor_id: String,
    pub lab_name: String,
    pub options: ExamOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BloodTestField {
    PatientId(String),
    TestDate(String),
    /// Replaces the whole multi-select.
    ExamTypes(Vec<String>),
    Notes(String),
    DoctorId(String),
    LabName(String),
    AddResult,
    RemoveResult(usize),
    ResultExamType(usize, String),
    ResultValue(usize, String),
}

impl FormFields for BloodTestForm {
    type Msg = BloodTestField;
    type Payload = NewBloodTest;

    const FAILURE: &'static str = "Error creating exam";

    fn update(&mut self, msg: BloodTestField) {
        match msg {
            BloodTestField::PatientId(v) => self.patient_id = v,
            BloodTestField::TestDate(v) => self.test_date = v,
            BloodTestField::ExamTypes(v) => self.exam_types = v,
            BloodTestField::Notes(v) => self.notes = v,
            BloodTestField::DoctorId(v) => self.doctor_id = v,
            BloodTestField::LabName(v) => self.lab_name = v,
            BloodTestField::AddResult => self.results.push(ResultRow::default()),
            BloodTestField::RemoveResult(idx) => {
                if idx < self.results.len() {
                    self.results.remove(idx);
                }
            }
            BloodTestField::ResultExamType(idx, v) => {
                if let Some(row) = self.results.get_mut(idx) {
                    row.exam_type_id = v;
                }
            }
            BloodTestField::ResultValue(idx, v) => {
                if let Some(row) = self.results.get_mut(idx) {
                    row.value = v;
                }
            }
        }
    }

    fn check_required(&self) -> Result<(), FormError> {
        require("patient_id", &self.patient_id)?;
        require("test_date", &self.test_date)?;
        if self.exam_types.is_empty() {
            return Err(FormError::MissingField("exam_types"));
        }
        require("doctor_id", &self.doctor_id)?;
        require("lab_name", &self.lab_name)
    }

    fn payload(&self) -> Result<NewBloodTest, FormError> {
        let results = self
            .results
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(idx, row)| {
                Ok(ExamResult {
                    exam_type_id: row.exam_type_id.clone(),
                    value: parse_decimal(&format!("results[{idx}].value"), &row.value)?,
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;
        Ok(NewBloodTest {
            patient_id: self.patient_id.clone(),
            test_date: self.test_date.clone(),
            exam_types: self.exam_types.clone(),
            results,
            notes: non_empty(&self.notes),
            doctor_id: non_empty(&self.doctor_id),
            lab_name: self.lab_name.clone(),
        })
    }

    fn auxiliary(&self) -> &'static [Resource] {
        &[Resource::Patients, Resource::ExamTypes, Resource::Doctors]
    }

    fn receive_auxiliary(
        &mut self,
        client: &TrackerClient,
        resource: Resource,
        response: HttpResponse,
    ) -> Result<(), ApiError> {
        match resource {
            Resource::Patients => {
                let records: Vec<Patient> = client.parse_list(response)?;
                self.options.patients = Choice::from_records(&records);
            }
            Resource::ExamTypes => {
                let records: Vec<ExamType> = client.parse_list(response)?;
                self.options.exam_types = Choice::from_records(&records);
            }
            Resource::Doctors => {
                let records: Vec<Doctor> = client.parse_list(response)?;
                self.options.doctors = Choice::from_records(&records);
            }
            Resource::BloodTests => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(exam_type_id: &str, value: &str) -> ResultRow {
        ResultRow {
            exam_type_id: exam_type_id.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn add_appends_empty_row() {
        let mut form = BloodTestForm::default();
        form.update(BloodTestField::AddResult);
        form.update(BloodTestField::AddResult);
        assert_eq!(form.results, vec![ResultRow::default(), ResultRow::default()]);
        assert!(form.exam_types.is_empty());
    }

    #[test]
    fn remove_by_index_keeps_order() {
        let mut form = BloodTestForm {
            results: vec![row("a", "1"), row("b", "2"), row("c", "3")],
            exam_types: vec!["a".to_string()],
            ..Default::default()
        };
        form.update(BloodTestField::RemoveResult(1));
        assert_eq!(form.results, vec![row("a", "1"), row("c", "3")]);
        assert_eq!(form.exam_types, vec!["a"]);

        form.update(BloodTestField::RemoveResult(9));
        assert_eq!(form.results.len(), 2);
    }

    #[test]
    fn row_edits_target_one_row() {
        let mut form = BloodTestForm::default();
        form.update(BloodTestField::AddResult);
        form.update(BloodTestField::AddResult);
        form.update(BloodTestField::ResultExamType(1, "t2".to_string()));
        form.update(BloodTestField::ResultValue(1, "4.2".to_string()));
        assert_eq!(form.results, vec![ResultRow::default(), row("t2", "4.2")]);
    }

    #[test]
    fn multi_select_replaces_selection() {
        let mut form = BloodTestForm::default();
        form.update(BloodTestField::ExamTypes(vec!["a".to_string(), "b".to_string()]));
        form.update(BloodTestField::ExamTypes(vec!["c".to_string()]));
        assert_eq!(form.exam_types, vec!["c"]);
    }

    #[test]
    fn payload_parses_values_and_drops_blank_rows() {
        let form = BloodTestForm {
            patient_id: "p1".to_string(),
            test_date: "2024-05-01".to_string(),
            exam_types: vec!["t1".to_string()],
            results: vec![row("t1", "92.5"), ResultRow::default()],
            doctor_id: "d1".to_string(),
            lab_name: "Central".to_string(),
            ..Default::default()
        };
        let payload = form.payload().unwrap();
        assert_eq!(
            payload.results,
            vec![ExamResult {
                exam_type_id: "t1".to_string(),
                value: 92.5
            }]
        );
        assert!(payload.notes.is_none());
        assert_eq!(payload.doctor_id.as_deref(), Some("d1"));
    }

    #[test]
    fn half_filled_row_is_an_error() {
        let form = BloodTestForm {
            results: vec![row("t1", "")],
            ..Default::default()
        };
        assert!(matches!(form.payload(), Err(FormError::InvalidNumber { .. })));
    }

    #[test]
    fn exam_types_selection_is_required() {
        let form = BloodTestForm {
            patient_id: "p1".to_string(),
            test_date: "2024-05-01".to_string(),
            ..Default::default()
        };
        assert_eq!(form.check_required(), Err(FormError::MissingField("exam_types")));
    }

    #[test]
    fn options_fill_from_listings() {
        let client = TrackerClient::default();
        let mut form = BloodTestForm::default();
        let response = HttpResponse {
            status: 200,
            body: r#"[{"id":"d1","name":"House"}]"#.to_string(),
        };
        form.receive_auxiliary(&client, Resource::Doctors, response).unwrap();
        assert_eq!(
            form.options.doctors,
            vec![Choice {
                id: "d1".to_string(),
                label: "House".to_string()
            }]
        );
        assert!(form.options.patients.is_empty());
    }
}
