//! Page addresses and the landing page.

use std::fmt;

use crate::resource::Resource;

pub const APP_TITLE: &str = "People Health Tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    List(Resource),
    New(Resource),
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List(resource) => format!("/{}", page_segment(resource)),
            Route::New(resource) => format!("/{}/new", page_segment(resource)),
        }
    }

    /// Label of the link pointing at this route.
    pub fn label(self) -> String {
        match self {
            Route::Home => APP_TITLE.to_string(),
            Route::List(resource) => resource.title().to_string(),
            Route::New(resource) => format!("New {}", singular(resource)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn page_segment(resource: Resource) -> &'static str {
    match resource {
        Resource::BloodTests => "exams",
        other => other.collection(),
    }
}

pub fn singular(resource: Resource) -> &'static str {
    match resource {
        Resource::Patients => "Patient",
        Resource::Doctors => "Doctor",
        Resource::ExamTypes => "Exam Type",
        Resource::BloodTests => "Exam",
    }
}

/// Links shown on the landing page, in display order.
pub fn landing_links() -> [Route; 4] {
    [
        Route::List(Resource::Patients),
        Route::List(Resource::BloodTests),
        Route::List(Resource::ExamTypes),
        Route::List(Resource::Doctors),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_links_cover_every_collection() {
        let links = landing_links();
        for resource in Resource::ALL {
            assert!(links.contains(&Route::List(resource)), "{resource} missing");
        }
    }

    #[test]
    fn exam_pages_use_exams_path() {
        assert_eq!(Route::List(Resource::BloodTests).path(), "/exams");
        assert_eq!(Route::New(Resource::BloodTests).path(), "/exams/new");
        assert_eq!(Route::New(Resource::ExamTypes).label(), "New Exam Type");
    }
}
