mod catalog;
pub use catalog::{Discipline, DisciplineCreate, Group, GroupCreate, Specialty, SpecialtyCreate};

mod course;
pub use course::{Course, CourseCreate, ExamRef};

mod lesson;
pub use lesson::{Lesson, LessonCreate};

mod user;
pub use user::{User, UserCreate, UserRole};

mod exam;
pub use exam::{Answer, AnswerCreate, Exam, ExamCreate, Question, QuestionCreate, QuestionKind};

mod passed_exam;
pub use passed_exam::{PassedExam, PassedExamCreate, UserAnswer, UserAnswerCreate};
