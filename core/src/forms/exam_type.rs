use crate::error::FormError;
use crate::types::{NewExamType, ReferenceRange, ReferenceValues};
use crate::view::form::{parse_decimal, require, FormFields};

/// Subject category of a reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Male,
    Female,
    Child,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Male => "male",
            Category::Female => "female",
            Category::Child => "child",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Min/max text exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub min: String,
    pub max: String,
}

impl RangeInput {
    /// A range only exists when both bounds were entered.
    fn parse(&self, category: Category) -> Result<Option<ReferenceRange>, FormError> {
        if self.min.is_empty() || self.max.is_empty() {
            return Ok(None);
        }
        let min = parse_decimal(&format!("{}_min", category.as_str()), &self.min)?;
        let max = parse_decimal(&format!("{}_max", category.as_str()), &self.max)?;
        Ok(Some(ReferenceRange { min, max }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamTypeForm {
    pub name: String,
    pub description: String,
    pub male: RangeInput,
    pub female: RangeInput,
    pub child: RangeInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamTypeField {
    Name(String),
    Description(String),
    Range(Category, Bound, String),
}

impl ExamTypeForm {
    fn range_mut(&mut self, category: Category) -> &mut RangeInput {
        match category {
            Category::Male => &mut self.male,
            Category::Female => &mut self.female,
            Category::Child => &mut self.child,
        }
    }
}

impl FormFields for ExamTypeForm {
    type Msg = ExamTypeField;
    type Payload = NewExamType;

    const FAILURE: &'static str = "Error creating exam type";

    fn update(&mut self, msg: ExamTypeField) {
        match msg {
            ExamTypeField::Name(v) => self.name = v,
            ExamTypeField::Description(v) => self.description = v,
            ExamTypeField::Range(category, bound, v) => {
                let range = self.range_mut(category);
                match bound {
                    Bound::Min => range.min = v,
                    Bound::Max => range.max = v,
                }
            }
        }
    }

    fn check_required(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("description", &self.description)
    }

    fn payload(&self) -> Result<NewExamType, FormError> {
        Ok(NewExamType {
            name: self.name.clone(),
            description: self.description.clone(),
            reference_values: ReferenceValues {
                male: self.male.parse(Category::Male)?,
                female: self.female.parse(Category::Female)?,
                child: self.child.parse(Category::Child)?,
                ..Default::default()
            },
        })
    }
}
