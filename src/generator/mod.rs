/*
    This module generates random sentences of a grammar
*/

use rand::prelude::*;
use std::fmt::Display;
use std::path::PathBuf;

use crate::derivation::score::{leftmost_nonterminal, substitute};
use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was reached
    UndefinedNonterminal(String),
    // The form still had nonterminals after the allowed number of expansions
    StepLimit(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::StepLimit(steps) => write!(f, "No sentence after {} expansions", steps),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<SententialForm, GenerateError>;

pub fn generate(grammar: &Grammar, max_steps: usize, file: PathBuf) -> GenResult {
    generate_with_rng(grammar, max_steps, file, &mut thread_rng())
}

// Expands the leftmost nonterminal with a uniformly chosen rule until only
// terminals are left
pub fn generate_with_rng<R: Rng + ?Sized>(grammar: &Grammar, max_steps: usize, file: PathBuf, rng: &mut R) -> GenResult {
    let mut form = vec![grammar.start_symbol().clone()];

    for _ in 0..max_steps {
        let Some(index) = leftmost_nonterminal(&form) else {
            return Ok(form);
        };

        let rule = grammar.rules_for(&form[index])
            .choose(rng)
            .copied()
            .ok_or_else(|| GenerateError {
                location: Location::in_file(file.clone(), 0),
                error: GenerateErrorType::UndefinedNonterminal(form[index].to_string())
            })?;
        form = substitute(&form, index, &rule.rhs);
    }

    if is_sentence(&form) {
        return Ok(form);
    }

    Err(GenerateError {
        location: Location::in_file(file, 0),
        error: GenerateErrorType::StepLimit(max_steps)
    })
}
