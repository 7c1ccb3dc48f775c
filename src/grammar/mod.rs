/*
    This module is for storing and querying grammars
*/

use std::fmt::Display;

use itertools::Itertools;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

// A lexeme wrapped in angle brackets is a nonterminal, anything else is a
// terminal. No lookup is involved.
pub fn classify(lexeme: &str) -> SymbolKind {
    if lexeme.len() >= 2 && lexeme.starts_with('<') && lexeme.ends_with('>') {
        SymbolKind::Nonterminal
    } else {
        SymbolKind::Terminal
    }
}

// The base unit in a grammar rule. Both variants keep the lexeme exactly as
// written, brackets included for nonterminals.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn new(lexeme: &str) -> Self {
        match classify(lexeme) {
            SymbolKind::Terminal => Symbol::Terminal(lexeme.to_string()),
            SymbolKind::Nonterminal => Symbol::Nonterminal(lexeme.to_string()),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::Nonterminal(_) => SymbolKind::Nonterminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind() == SymbolKind::Terminal
    }

    pub fn is_nonterminal(&self) -> bool {
        self.kind() == SymbolKind::Nonterminal
    }

    pub fn lexeme(&self) -> &str {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => s,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// One step of a derivation. A form without nonterminals is a sentence.
pub type SententialForm = Vec<Symbol>;

pub fn is_sentence(form: &[Symbol]) -> bool {
    form.iter().all(Symbol::is_terminal)
}

pub fn format_form(form: &[Symbol]) -> String {
    form.iter().join(" ")
}

// Splits a whitespace separated string into symbols
pub fn symbols(text: &str) -> SententialForm {
    text.split_whitespace().map(Symbol::new).collect()
}

/// A single production. Identity is by value, so two rules written the same
/// way anywhere in a grammar are the same rule.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Rule {
    pub lhs: Symbol,
    pub rhs: Alternative,
}

impl Rule {
    // Whether applying the rule puts a terminal where the nonterminal was
    pub fn introduces_terminal(&self) -> bool {
        self.rhs.first().is_some_and(Symbol::is_terminal)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.lhs, format_form(&self.rhs))
    }
}

/// Rules in declaration order. The start symbol is the left hand side of
/// the first rule, and rules sharing a left hand side are tried in the
/// order they were written.
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn from_rules(rules: Vec<Rule>) -> Option<Self> {
        if rules.is_empty() {
            None
        } else {
            Some(Grammar { rules })
        }
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.rules[0].lhs
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // An empty group is a dead end for the search, not an error
    pub fn rules_for(&self, nonterminal: &Symbol) -> Vec<&Rule> {
        self.rules.iter().filter(|rule| rule.lhs == *nonterminal).collect()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Symbol> {
        self.rules.iter().map(|rule| &rule.lhs).unique()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
