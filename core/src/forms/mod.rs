//! Field sets for the four creation forms.
//!
//! Each form is a plain struct of text fields plus an enum of per-field edit
//! messages. Payload derivation lives next to the fields it reads.

pub mod blood_test;
pub mod doctor;
pub mod exam_type;
pub mod patient;

pub use blood_test::{BloodTestField, BloodTestForm, Choice, ExamOptions, ResultRow};
pub use doctor::{DoctorField, DoctorForm};
pub use exam_type::{Bound, Category, ExamTypeField, ExamTypeForm, RangeInput};
pub use patient::{split_diseases, PatientField, PatientForm};
