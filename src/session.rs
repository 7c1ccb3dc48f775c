/*
    This module reads sentences from the user and reports their derivations
*/

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::info;

use crate::derivation::{derive_with_limits, DerivationTable, SearchFailure, SearchLimits};
use crate::grammar::*;

#[derive(Debug, PartialEq)]
pub enum SentenceError {
    Empty,
    // The sentence holds something shaped like a nonterminal
    Nonterminal(String),
}

impl Display for SentenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentenceError::Empty => write!(f, "Sentence is empty"),
            SentenceError::Nonterminal(text) => write!(f, "Sentence should not have any nonterminals, found `{}`", text),
        }
    }
}

impl std::error::Error for SentenceError {}

// Text between a `<` and a later `>`, even across words
fn bracketed_span(text: &str) -> Option<&str> {
    let open = text.find('<')?;
    let close = open + text[open..].rfind('>')?;
    Some(&text[open..=close])
}

/// Splits a line into a sentence of terminals, rejecting anything that
/// could be read as a nonterminal.
pub fn parse_sentence(line: &str) -> Result<SententialForm, SentenceError> {
    if let Some(span) = bracketed_span(line) {
        return Err(SentenceError::Nonterminal(span.to_string()));
    }

    let sentence = symbols(line);
    if sentence.is_empty() {
        return Err(SentenceError::Empty);
    }
    Ok(sentence)
}

pub fn report<W: Write>(output: &mut W, sentence: &[Symbol], result: &Result<DerivationTable, SearchFailure>) -> io::Result<()> {
    match result {
        Ok(table) => {
            writeln!(output, "Derivation of: {}", format_form(sentence))?;
            write!(output, "{}", table)
        }
        Err(failure) => writeln!(output, "{}", failure),
    }
}

fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

/// Prompts for sentences until the user declines or input runs out.
pub fn run<R: BufRead, W: Write>(grammar: &Grammar, limits: &SearchLimits, input: R, output: &mut W) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        prompt(output, "Enter a sentence\n")?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let sentence = match parse_sentence(&line) {
            Ok(sentence) => sentence,
            Err(e) => {
                writeln!(output, "Invalid sentence, try again. {}", e)?;
                continue;
            }
        };

        info!(sentence = %format_form(&sentence), "deriving");
        let result = derive_with_limits(grammar, &sentence, limits);
        report(output, &sentence, &result)?;

        prompt(output, "Enter another sentence (y/n)?: ")?;
        match lines.next().transpose()? {
            Some(answer) if matches!(answer.trim(), "y" | "Y") => continue,
            Some(_) => break,
            None => {
                writeln!(output)?;
                break;
            }
        }
    }

    writeln!(output, "Ending program")
}
