//! Disciplines, the specialties inside them, and student groups.

use serde::{Deserialize, Serialize};

use crate::impl_rest_resource;
use crate::model::error::{ValidationErrors, ValidationResult};
use crate::model::validate::{Validate, check_id, check_length};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discipline {
    id: i64,
    name: String,
}

impl_rest_resource!(Discipline, DisciplineCreate, "/disciplines", Discipline);

impl Discipline {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineCreate {
    pub name: String,
}

impl Validate for DisciplineCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", &self.name, 2, 255);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    id: i64,
    name: String,
    discipline_id: i64,
}

impl_rest_resource!(Specialty, SpecialtyCreate, "/specialties", Specialty);

impl Specialty {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discipline_id(&self) -> i64 {
        self.discipline_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyCreate {
    pub name: String,
    pub discipline_id: i64,
}

impl Validate for SpecialtyCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", &self.name, 2, 255);
        check_id(&mut errors, "discipline_id", self.discipline_id);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: i64,
    name: String,
}

impl_rest_resource!(Group, GroupCreate, "/groups", Group);

impl Group {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreate {
    pub name: String,
}

impl Validate for GroupCreate {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", &self.name, 2, 255);
        errors.into_result()
    }
}
