//! Certificates for passed attempts. Only the record and a plain-text
//! rendering live here; PDF export is left to the front end.

use chrono::{DateTime, Utc};

use crate::{
    model::entity::{Course, PassedExam},
    quiz::scoring::is_passed,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    student: String,
    course_title: String,
    score: u32,
    passed_exam_id: i64,
    issued_at: DateTime<Utc>,
}

impl Certificate {
    /// `None` unless the attempt reached the course's required score.
    pub fn issue(
        student: &str,
        course: &Course,
        attempt: &PassedExam,
        default_required_score: u32,
    ) -> Option<Self> {
        let required = course.required_score().unwrap_or(default_required_score);
        if !is_passed(attempt.score(), required) {
            return None;
        }

        Some(Self {
            student: student.to_string(),
            course_title: course.title().to_string(),
            score: attempt.score(),
            passed_exam_id: attempt.id(),
            issued_at: attempt.created_at().unwrap_or_else(Utc::now),
        })
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl std::fmt::Display for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "LearnUp Certificate of Completion")?;
        writeln!(f)?;
        writeln!(f, "This certifies that {}", self.student)?;
        writeln!(f, "has completed \"{}\"", self.course_title)?;
        writeln!(f, "with a score of {}%.", self.score)?;
        writeln!(f)?;
        write!(
            f,
            "Issued {} (attempt #{})",
            self.issued_at.format("%Y-%m-%d"),
            self.passed_exam_id
        )
    }
}
