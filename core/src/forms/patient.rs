use crate::error::FormError;
use crate::types::NewPatient;
use crate::view::form::{require, FormFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    /// Comma-separated free text.
    pub diseases: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientField {
    Name(String),
    Email(String),
    DateOfBirth(String),
    Gender(String),
    Phone(String),
    Address(String),
    Diseases(String),
    Notes(String),
}

impl FormFields for PatientForm {
    type Msg = PatientField;
    type Payload = NewPatient;

    const FAILURE: &'static str = "Error creating patient";

    fn update(&mut self, msg: PatientField) {
        match msg {
            PatientField::Name(v) => self.name = v,
            PatientField::Email(v) => self.email = v,
            PatientField::DateOfBirth(v) => self.date_of_birth = v,
            PatientField::Gender(v) => self.gender = v,
            PatientField::Phone(v) => self.phone = v,
            PatientField::Address(v) => self.address = v,
            PatientField::Diseases(v) => self.diseases = v,
            PatientField::Notes(v) => self.notes = v,
        }
    }

    fn check_required(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("date_of_birth", &self.date_of_birth)?;
        require("gender", &self.gender)?;
        require("phone", &self.phone)
    }

    fn payload(&self) -> Result<NewPatient, FormError> {
        Ok(NewPatient {
            name: self.name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth.clone(),
            gender: self.gender.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            diseases: split_diseases(&self.diseases),
            notes: self.notes.clone(),
        })
    }
}

/// Split comma-separated disease names, trimming each and dropping blanks.
pub fn split_diseases(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
