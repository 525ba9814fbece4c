//! Answers recorded during one audit run

use crate::models::AnswerOption;
use std::collections::HashMap;

/// The option chosen for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: String,
    pub option: AnswerOption,
}

/// Map from question identifier to the answer given for it.
///
/// Recording the same question twice replaces the previous answer.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: HashMap<String, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the one it replaced (if any)
    pub fn record(&mut self, question_id: &str, option: AnswerOption) -> Option<Answer> {
        let answer = Answer {
            question_id: question_id.to_string(),
            option,
        };
        self.answers.insert(question_id.to_string(), answer)
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// The option chosen for a question
    pub fn chosen(&self, question_id: &str) -> Option<&AnswerOption> {
        self.answers.get(question_id).map(|a| &a.option)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
