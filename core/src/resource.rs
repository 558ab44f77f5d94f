//! The four REST collections and the traits tying record types to them.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A collection exposed by the tracker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Patients,
    Doctors,
    ExamTypes,
    BloodTests,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Patients,
        Resource::Doctors,
        Resource::ExamTypes,
        Resource::BloodTests,
    ];

    /// Path segment under the API base, without slashes.
    pub fn collection(self) -> &'static str {
        match self {
            Resource::Patients => "patients",
            Resource::Doctors => "doctors",
            Resource::ExamTypes => "exam-types",
            Resource::BloodTests => "blood-tests",
        }
    }

    /// Human title used by page headings.
    pub fn title(self) -> &'static str {
        match self {
            Resource::Patients => "Patients",
            Resource::Doctors => "Doctors",
            Resource::ExamTypes => "Exam Types",
            Resource::BloodTests => "Exams",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection {0:?}")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches('/') {
            "patients" => Ok(Resource::Patients),
            "doctors" => Ok(Resource::Doctors),
            "exam-types" => Ok(Resource::ExamTypes),
            "blood-tests" | "exams" => Ok(Resource::BloodTests),
            other => Err(UnknownResource(other.to_string())),
        }
    }
}

/// A record as returned by one of the collections.
pub trait Record: DeserializeOwned + Clone {
    const RESOURCE: Resource;

    fn id(&self) -> &str;
}

/// A record that other records refer to by id and show by name.
pub trait Named: Record {
    fn name(&self) -> &str;
}

/// A creation payload bound to the collection it is POSTed to.
pub trait NewRecord: Serialize {
    const RESOURCE: Resource;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_round_trip_through_from_str() {
        for resource in Resource::ALL {
            assert_eq!(resource.collection().parse::<Resource>().unwrap(), resource);
        }
    }

    #[test]
    fn exams_is_an_alias_for_blood_tests() {
        assert_eq!("exams".parse::<Resource>().unwrap(), Resource::BloodTests);
        assert_eq!("/patients/".parse::<Resource>().unwrap(), Resource::Patients);
    }

    #[test]
    fn unknown_collection_is_rejected() {
        let err = "nurses".parse::<Resource>().unwrap_err();
        assert_eq!(err, UnknownResource("nurses".to_string()));
    }
}
