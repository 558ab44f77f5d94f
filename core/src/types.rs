//! Domain DTOs for the tracker API.
//!
//! # Design
//! Read types are lenient: identifiers arrive as `id` or `_id`, absent
//! fields fall back to defaults, and server bookkeeping fields are ignored.
//! Creation payloads (`New*`) carry exactly what the forms send.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::resource::{Named, NewRecord, Record, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub diseases: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doctor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub specialty: String,
}

/// Normal bounds for one subject category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

/// Reference ranges keyed by subject category. Absent categories are not
/// serialized at all; categories other than the three the forms edit are
/// kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<ReferenceRange>,
    #[serde(flatten)]
    pub other: BTreeMap<String, ReferenceRange>,
}

impl ReferenceValues {
    /// Present categories: male, female, child, then the rest by name.
    pub fn entries(&self) -> Vec<(&str, ReferenceRange)> {
        [("male", self.male), ("female", self.female), ("child", self.child)]
            .into_iter()
            .filter_map(|(category, range)| range.map(|r| (category, r)))
            .chain(self.other.iter().map(|(category, range)| (category.as_str(), *range)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamType {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub reference_values: ReferenceValues,
}

/// One measured value within a blood test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub exam_type_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodTest {
    #[serde(alias = "_id")]
    pub id: String,
    pub patient_id: String,
    pub test_date: String,
    pub exam_types: Vec<String>,
    #[serde(deserialize_with = "lenient_results")]
    pub results: Vec<ExamResult>,
    pub notes: Option<String>,
    pub doctor_id: Option<String>,
    pub lab_name: String,
}

/// Results are read from an array of entries. Any other shape, and any entry
/// that does not decode, reads as no result.
fn lenient_results<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ExamResult>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub diseases: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExamType {
    pub name: String,
    pub description: String,
    pub reference_values: ReferenceValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBloodTest {
    pub patient_id: String,
    pub test_date: String,
    pub exam_types: Vec<String>,
    pub results: Vec<ExamResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    pub lab_name: String,
}

macro_rules! impl_record {
    ($record:ty, $new:ty, $resource:expr) => {
        impl Record for $record {
            const RESOURCE: Resource = $resource;

            fn id(&self) -> &str {
                &self.id
            }
        }

        impl NewRecord for $new {
            const RESOURCE: Resource = $resource;
        }
    };
}

impl_record!(Patient, NewPatient, Resource::Patients);
impl_record!(Doctor, NewDoctor, Resource::Doctors);
impl_record!(ExamType, NewExamType, Resource::ExamTypes);
impl_record!(BloodTest, NewBloodTest, Resource::BloodTests);

impl Named for Patient {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Doctor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ExamType {
    fn name(&self) -> &str {
        &self.name
    }
}
