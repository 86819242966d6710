//! Client-side scoring of a finished attempt.

use std::collections::{BTreeSet, HashMap};

use crate::model::entity::{Exam, Question, QuestionKind};

/// What a user picked for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(i64),
    Multiple(BTreeSet<i64>),
}

impl Selection {
    /// Selected answer ids, ascending for multiple-choice.
    pub fn answer_ids(&self) -> Vec<i64> {
        match self {
            Self::Single(id) => vec![*id],
            Self::Multiple(ids) => ids.iter().copied().collect(),
        }
    }

    pub fn contains(&self, answer_id: i64) -> bool {
        match self {
            Self::Single(id) => *id == answer_id,
            Self::Multiple(ids) => ids.contains(&answer_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Multiple(ids) if ids.is_empty())
    }
}

/// 1 when the question is answered exactly right, 0 otherwise. No partial
/// credit.
pub fn question_score(question: &Question, selection: Option<&Selection>) -> u32 {
    let correct = match (question.kind(), selection) {
        (QuestionKind::Single, Some(Selection::Single(id))) => {
            question.answer(*id).is_some_and(|a| a.is_correct())
        }
        (QuestionKind::Multiple, Some(Selection::Multiple(ids))) => {
            !ids.is_empty() && *ids == question.correct_answer_ids()
        }
        _ => false,
    };
    u32::from(correct)
}

/// `round(100 * correct / total)` with halves rounded up; 0 when there is
/// nothing to score.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * correct + total) / (2 * total)) as u32
}

pub fn is_passed(score: u32, required_score: u32) -> bool {
    score >= required_score
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    correct: usize,
    total: usize,
    score: u32,
    required_score: u32,
}

impl QuizOutcome {
    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn required_score(&self) -> u32 {
        self.required_score
    }

    pub fn passed(&self) -> bool {
        is_passed(self.score, self.required_score)
    }
}

pub fn evaluate(
    exam: &Exam,
    answers: &HashMap<i64, Selection>,
    required_score: u32,
) -> QuizOutcome {
    let total = exam.questions().len();
    let correct: usize = exam
        .questions()
        .iter()
        .map(|q| question_score(q, answers.get(&q.id())) as usize)
        .sum();

    QuizOutcome {
        correct,
        total,
        score: percentage(correct, total),
        required_score,
    }
}
