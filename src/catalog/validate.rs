//! Eager catalog validation
//!
//! A catalog is either entirely valid or rejected; the first violation found
//! is returned. Questions whose options all share the same score are legal
//! but carry no information, so they only produce a warning.

use crate::error::CatalogError;
use crate::models::{AuditModule, MAX_OPTION_SCORE};
use std::collections::HashSet;
use tracing::warn;

/// Check every structural invariant of a set of modules
pub fn validate_modules(modules: &[AuditModule]) -> Result<(), CatalogError> {
    if modules.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut module_ids = HashSet::new();
    for module in modules {
        if module.id.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier(format!(
                "module '{}'",
                module.title
            )));
        }
        if !module_ids.insert(module.id.as_str()) {
            return Err(CatalogError::DuplicateModule(module.id.clone()));
        }
        validate_module(module)?;
    }
    Ok(())
}

fn validate_module(module: &AuditModule) -> Result<(), CatalogError> {
    if module.questions.is_empty() {
        return Err(CatalogError::EmptyModule(module.id.clone()));
    }

    let mut question_ids = HashSet::new();
    for question in &module.questions {
        if question.id.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier(format!(
                "a question of module '{}'",
                module.id
            )));
        }
        if !question_ids.insert(question.id.as_str()) {
            return Err(CatalogError::DuplicateQuestion {
                module: module.id.clone(),
                question: question.id.clone(),
            });
        }
        if question.options.is_empty() {
            return Err(CatalogError::NoOptions {
                module: module.id.clone(),
                question: question.id.clone(),
            });
        }

        let mut option_ids = HashSet::new();
        for option in &question.options {
            if option.id.trim().is_empty() {
                return Err(CatalogError::EmptyIdentifier(format!(
                    "an option of '{}/{}'",
                    module.id, question.id
                )));
            }
            if !option_ids.insert(option.id.as_str()) {
                return Err(CatalogError::DuplicateOption {
                    module: module.id.clone(),
                    question: question.id.clone(),
                    option: option.id.clone(),
                });
            }
            if !(0..=MAX_OPTION_SCORE).contains(&option.score) {
                return Err(CatalogError::ScoreOutOfRange {
                    module: module.id.clone(),
                    question: question.id.clone(),
                    option: option.id.clone(),
                    score: option.score,
                    max: MAX_OPTION_SCORE,
                });
            }
        }

        if question.score_spread() == 0 {
            warn!(
                "Question '{}/{}' cannot discriminate: all options score {}",
                module.id, question.id, question.options[0].score
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, Question};

    fn option(id: &str, score: i32) -> AnswerOption {
        AnswerOption {
            id: id.into(),
            label: id.to_uppercase(),
            score,
            risk: None,
        }
    }

    fn question(id: &str, options: Vec<AnswerOption>) -> Question {
        Question {
            id: id.into(),
            category: "General".into(),
            text: format!("Question {id}?"),
            note: None,
            options,
        }
    }

    fn module(id: &str, questions: Vec<Question>) -> AuditModule {
        AuditModule {
            id: id.into(),
            title: id.to_uppercase(),
            subtitle: String::new(),
            standard: "Test".into(),
            questions,
        }
    }

    fn valid_question(id: &str) -> Question {
        question(id, vec![option("a", 10), option("b", 0)])
    }

    #[test]
    fn test_valid_modules_pass() {
        let modules = vec![
            module("m1", vec![valid_question("q1"), valid_question("q2")]),
            module("m2", vec![valid_question("q1")]),
        ];
        assert!(validate_modules(&modules).is_ok());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(validate_modules(&[]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_duplicate_module() {
        let modules = vec![
            module("m1", vec![valid_question("q1")]),
            module("m1", vec![valid_question("q1")]),
        ];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::DuplicateModule(id)) if id == "m1"
        ));
    }

    #[test]
    fn test_empty_module() {
        let modules = vec![module("m1", vec![])];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::EmptyModule(_))
        ));
    }

    #[test]
    fn test_duplicate_question() {
        let modules = vec![module("m1", vec![valid_question("q1"), valid_question("q1")])];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::DuplicateQuestion { question, .. }) if question == "q1"
        ));
    }

    #[test]
    fn test_question_without_options() {
        let modules = vec![module("m1", vec![question("q1", vec![])])];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::NoOptions { .. })
        ));
    }

    #[test]
    fn test_duplicate_option() {
        let modules = vec![module(
            "m1",
            vec![question("q1", vec![option("a", 10), option("a", 0)])],
        )];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::DuplicateOption { option, .. }) if option == "a"
        ));
    }

    #[test]
    fn test_negative_score() {
        let modules = vec![module(
            "m1",
            vec![question("q1", vec![option("a", 10), option("b", -1)])],
        )];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::ScoreOutOfRange { score: -1, .. })
        ));
    }

    #[test]
    fn test_score_above_maximum() {
        let modules = vec![module(
            "m1",
            vec![question("q1", vec![option("a", MAX_OPTION_SCORE + 1)])],
        )];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::ScoreOutOfRange { max: 10, .. })
        ));
    }

    #[test]
    fn test_blank_identifier() {
        let modules = vec![module("m1", vec![valid_question("  ")])];
        assert!(matches!(
            validate_modules(&modules),
            Err(CatalogError::EmptyIdentifier(_))
        ));
    }

    #[test]
    fn test_flat_question_is_only_a_warning() {
        let modules = vec![module(
            "m1",
            vec![question("q1", vec![option("a", 5), option("b", 5)])],
        )];
        assert!(validate_modules(&modules).is_ok());
    }
}
