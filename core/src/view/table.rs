//! Table layouts for each list page.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::{BloodTest, Doctor, ExamType, Patient};
use crate::view::lookup::NameLookup;

/// A rendered table: fixed headers and one row of cells per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub fn patients(patients: &[Patient]) -> Table {
    Table {
        headers: vec!["Name", "Email", "Date of birth", "Gender", "Phone"],
        rows: patients
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.email.clone(),
                    display_date(&p.date_of_birth),
                    p.gender.clone(),
                    p.phone.clone(),
                ]
            })
            .collect(),
    }
}

pub fn doctors(doctors: &[Doctor]) -> Table {
    Table {
        headers: vec!["Name", "Email", "Specialty"],
        rows: doctors
            .iter()
            .map(|d| vec![d.name.clone(), d.email.clone(), d.specialty.clone()])
            .collect(),
    }
}

pub fn exam_types(exam_types: &[ExamType]) -> Table {
    Table {
        headers: vec!["Name", "Description", "Reference values"],
        rows: exam_types
            .iter()
            .map(|et| {
                let ranges = et
                    .reference_values
                    .entries()
                    .into_iter()
                    .map(|(category, range)| format!("{category}: {} - {}", range.min, range.max))
                    .collect::<Vec<_>>()
                    .join("; ");
                vec![et.name.clone(), et.description.clone(), ranges]
            })
            .collect(),
    }
}

/// Exams joined against patients, exam types and doctors.
pub fn blood_tests(
    tests: &[BloodTest],
    patients: &NameLookup<'_>,
    exam_types: &NameLookup<'_>,
    doctors: &NameLookup<'_>,
) -> Table {
    Table {
        headers: vec!["Patient", "Date", "Exam types", "Doctor", "Lab", "Results"],
        rows: tests
            .iter()
            .map(|t| {
                let types = t
                    .exam_types
                    .iter()
                    .map(|id| exam_types.resolve(id))
                    .collect::<Vec<_>>()
                    .join(", ");
                let doctor = match t.doctor_id.as_deref() {
                    Some(id) if !id.is_empty() => doctors.resolve(id).to_string(),
                    _ => "-".to_string(),
                };
                let results = if t.results.is_empty() {
                    "-".to_string()
                } else {
                    t.results
                        .iter()
                        .map(|r| format!("{}: {}", exam_types.resolve(&r.exam_type_id), r.value))
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                vec![
                    patients.resolve(&t.patient_id).to_string(),
                    display_date(&t.test_date),
                    types,
                    doctor,
                    t.lab_name.clone(),
                    results,
                ]
            })
            .collect(),
    }
}

/// Calendar date of an ISO date or datetime, or the raw text when it is
/// neither.
pub fn display_date(raw: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d";
    if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
        return date.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format(FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format(FORMAT).to_string();
    }
    raw.to_string()
}
