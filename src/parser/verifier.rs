use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{Rule, Symbol};
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum WarningType {
    // A nonterminal appears on a right hand side but has no rules. The
    // search treats it as a dead end.
    UndefinedNonterminal(String),
}

impl ErrorType for WarningType {}

impl Display for WarningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningType::UndefinedNonterminal(nonterminal) => write!(f, "No rules for nonterminal `{}`", nonterminal),
        }
    }
}

pub type Warning = Error<WarningType>;

fn get_rule_undefined_symbols(rule: &Rule, location: &Location, defined: &HashSet<&Symbol>) -> Vec<Warning> {
    rule.rhs.iter()
        .filter(|symbol| symbol.is_nonterminal() && !defined.contains(symbol))
        .unique()
        .map(|symbol| Warning {
            location: location.to_owned(),
            error: WarningType::UndefinedNonterminal(symbol.to_string())
        })
        .collect()
}

// Reports every use of an undefined nonterminal, at the line of the rule
// using it. Each undefined nonterminal is reported once per rule.
pub fn verify_rules(rules: &[(Rule, Location)]) -> Vec<Warning> {
    let defined: HashSet<&Symbol> = rules.iter().map(|(rule, _)| &rule.lhs).collect();

    rules.iter()
        .flat_map(|(rule, location)| get_rule_undefined_symbols(rule, location, &defined))
        .collect()
}
