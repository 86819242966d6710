use serde::{Serialize, de::DeserializeOwned};

use crate::model::validate::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Course,
    Lesson,
    Specialty,
    Discipline,
    User,
    Group,
    Exam,
    Question,
    PassedExam,
    UserAnswer,
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// A record the API exposes under `PATH` with the usual verb mapping:
/// `GET PATH`, `POST PATH`, `GET|PUT|DELETE PATH/{id}`.
pub trait RestResource: ResourceTyped + DeserializeOwned + Send + Sync {
    type Create: Serialize + Validate + Send + Sync;
    const PATH: &'static str;

    fn resource_id(&self) -> i64;
}

#[macro_export]
macro_rules! impl_rest_resource {
    ($ent:ident, $ent_create:ident, $path:literal, $ty:ident) => {
        impl $crate::model::ResourceTyped for $ent {
            fn get_resource_type() -> $crate::model::ResourceType {
                $crate::model::ResourceType::$ty
            }
        }

        impl $crate::model::RestResource for $ent {
            type Create = $ent_create;
            const PATH: &'static str = $path;

            fn resource_id(&self) -> i64 {
                self.id
            }
        }
    };
}
