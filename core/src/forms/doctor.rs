use crate::error::FormError;
use crate::types::NewDoctor;
use crate::view::form::{require, FormFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorField {
    Name(String),
    Email(String),
    DateOfBirth(String),
    Gender(String),
    Phone(String),
    Address(String),
    Notes(String),
    Specialty(String),
}

impl FormFields for DoctorForm {
    type Msg = DoctorField;
    type Payload = NewDoctor;

    const FAILURE: &'static str = "Error creating doctor";

    fn update(&mut self, msg: DoctorField) {
        match msg {
            DoctorField::Name(v) => self.name = v,
            DoctorField::Email(v) => self.email = v,
            DoctorField::DateOfBirth(v) => self.date_of_birth = v,
            DoctorField::Gender(v) => self.gender = v,
            DoctorField::Phone(v) => self.phone = v,
            DoctorField::Address(v) => self.address = v,
            DoctorField::Notes(v) => self.notes = v,
            DoctorField::Specialty(v) => self.specialty = v,
        }
    }

    fn check_required(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("date_of_birth", &self.date_of_birth)?;
        require("gender", &self.gender)?;
        require("phone", &self.phone)?;
        require("specialty", &self.specialty)
    }

    fn payload(&self) -> Result<NewDoctor, FormError> {
        Ok(NewDoctor {
            name: self.name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth.clone(),
            gender: self.gender.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            notes: self.notes.clone(),
            specialty: self.specialty.clone(),
        })
    }
}
