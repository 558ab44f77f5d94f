//! Command-line surface. Each `new` subcommand maps its flags onto the
//! field messages of the matching form.

use clap::{Args, Parser, Subcommand};
use tracker_core::forms::{BloodTestField, Bound, Category, DoctorField, ExamTypeField, PatientField};
use tracker_core::{Resource, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(name = "tracker", version, about = "People Health Tracker client")]
pub struct Cli {
    /// Base URL of the tracker API.
    #[arg(long, global = true, env = "TRACKER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the landing page.
    Home,
    /// List a collection: patients, doctors, exam-types or exams.
    List { collection: Resource },
    /// Show one record as JSON.
    Show { collection: Resource, id: String },
    /// Create a record, then show its list.
    New {
        #[command(subcommand)]
        form: NewForm,
    },
}

#[derive(Debug, Subcommand)]
pub enum NewForm {
    Patient(PatientArgs),
    Doctor(DoctorArgs),
    ExamType(ExamTypeArgs),
    /// A blood test exam.
    Exam(ExamArgs),
}

#[derive(Debug, Args)]
pub struct PatientArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub date_of_birth: String,
    #[arg(long, default_value = "")]
    pub gender: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
    /// Comma-separated disease names.
    #[arg(long, default_value = "")]
    pub diseases: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl PatientArgs {
    pub fn into_msgs(self) -> Vec<PatientField> {
        vec![
            PatientField::Name(self.name),
            PatientField::Email(self.email),
            PatientField::DateOfBirth(self.date_of_birth),
            PatientField::Gender(self.gender),
            PatientField::Phone(self.phone),
            PatientField::Address(self.address),
            PatientField::Diseases(self.diseases),
            PatientField::Notes(self.notes),
        ]
    }
}

#[derive(Debug, Args)]
pub struct DoctorArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub date_of_birth: String,
    #[arg(long, default_value = "")]
    pub gender: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long, default_value = "")]
    pub specialty: String,
}

impl DoctorArgs {
    pub fn into_msgs(self) -> Vec<DoctorField> {
        vec![
            DoctorField::Name(self.name),
            DoctorField::Email(self.email),
            DoctorField::DateOfBirth(self.date_of_birth),
            DoctorField::Gender(self.gender),
            DoctorField::Phone(self.phone),
            DoctorField::Address(self.address),
            DoctorField::Notes(self.notes),
            DoctorField::Specialty(self.specialty),
        ]
    }
}

#[derive(Debug, Args)]
pub struct ExamTypeArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub male_min: String,
    #[arg(long, default_value = "")]
    pub male_max: String,
    #[arg(long, default_value = "")]
    pub female_min: String,
    #[arg(long, default_value = "")]
    pub female_max: String,
    #[arg(long, default_value = "")]
    pub child_min: String,
    #[arg(long, default_value = "")]
    pub child_max: String,
}

impl ExamTypeArgs {
    pub fn into_msgs(self) -> Vec<ExamTypeField> {
        vec![
            ExamTypeField::Name(self.name),
            ExamTypeField::Description(self.description),
            ExamTypeField::Range(Category::Male, Bound::Min, self.male_min),
            ExamTypeField::Range(Category::Male, Bound::Max, self.male_max),
            ExamTypeField::Range(Category::Female, Bound::Min, self.female_min),
            ExamTypeField::Range(Category::Female, Bound::Max, self.female_max),
            ExamTypeField::Range(Category::Child, Bound::Min, self.child_min),
            ExamTypeField::Range(Category::Child, Bound::Max, self.child_max),
        ]
    }
}

/// References accept either an id or an exact name from the fetched options.
#[derive(Debug, Args)]
pub struct ExamArgs {
    #[arg(long, default_value = "")]
    pub patient: String,
    #[arg(long, default_value = "")]
    pub test_date: String,
    /// Repeat for each exam type.
    #[arg(long = "exam-type")]
    pub exam_types: Vec<String>,
    /// `EXAM_TYPE=VALUE`, repeat for each measured result.
    #[arg(long = "result", value_parser = parse_result)]
    pub results: Vec<(String, String)>,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long, default_value = "")]
    pub doctor: String,
    #[arg(long, default_value = "")]
    pub lab_name: String,
}

impl ExamArgs {
    pub fn into_msgs(self) -> Vec<BloodTestField> {
        let mut msgs = vec![
            BloodTestField::PatientId(self.patient),
            BloodTestField::TestDate(self.test_date),
            BloodTestField::ExamTypes(self.exam_types),
            BloodTestField::Notes(self.notes),
            BloodTestField::DoctorId(self.doctor),
            BloodTestField::LabName(self.lab_name),
        ];
        for (idx, (exam_type, value)) in self.results.into_iter().enumerate() {
            msgs.push(BloodTestField::AddResult);
            msgs.push(BloodTestField::ResultExamType(idx, exam_type));
            msgs.push(BloodTestField::ResultValue(idx, value));
        }
        msgs
    }
}

fn parse_result(s: &str) -> Result<(String, String), String> {
    let (exam_type, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected EXAM_TYPE=VALUE, got {s:?}"))?;
    Ok((exam_type.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tracker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn list_accepts_exams_alias() {
        let cli = parse(&["list", "exams"]);
        assert!(matches!(
            cli.command,
            Command::List {
                collection: Resource::BloodTests
            }
        ));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_flag_overrides_default() {
        let cli = parse(&["--base-url", "http://10.0.0.2:9000/api/v1", "home"]);
        assert_eq!(cli.base_url, "http://10.0.0.2:9000/api/v1");
    }

    #[test]
    fn unknown_collection_is_a_usage_error() {
        assert!(Cli::try_parse_from(["tracker", "list", "nurses"]).is_err());
    }

    #[test]
    fn exam_flags_become_ordered_result_rows() {
        let cli = parse(&[
            "new", "exam", "--patient", "Ana", "--exam-type", "t1", "--exam-type", "t2",
            "--result", "t1=92.5", "--result", "t2 = 4.1", "--lab-name", "Central",
        ]);
        let Command::New { form: NewForm::Exam(args) } = cli.command else {
            panic!("expected exam form");
        };
        let msgs = args.into_msgs();
        assert!(msgs.contains(&BloodTestField::ExamTypes(vec!["t1".to_string(), "t2".to_string()])));
        assert!(msgs.contains(&BloodTestField::ResultExamType(1, "t2".to_string())));
        assert!(msgs.contains(&BloodTestField::ResultValue(1, "4.1".to_string())));
    }

    #[test]
    fn malformed_result_is_rejected() {
        assert!(Cli::try_parse_from(["tracker", "new", "exam", "--result", "92.5"]).is_err());
    }
}
