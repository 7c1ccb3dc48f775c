/*
    This module searches for leftmost derivations of sentences
*/

pub mod ledger;
pub mod score;

use std::fmt::Display;

use tracing::{debug, trace};

use crate::grammar::*;
use ledger::UsageLedger;
use score::{leftmost_nonterminal, match_score, substitute};

/// Bounds on the search. They are heuristic: some derivable sentences
/// fall outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchLimits {
    // How far one rule may be used ahead of its siblings. Defaults to the
    // token length of the target sentence.
    pub flex: Option<usize>,
    // How many tokens longer than the target a form may grow
    pub slack: usize,
    // Recursion ceiling. Reaching it aborts the whole search.
    pub max_depth: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            flex: None,
            slack: 1,
            max_depth: 4096,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SearchFailure {
    // Every permitted expansion was tried
    NotFound,
    // The recursion ceiling was hit before the search finished
    SearchExhausted { depth: usize },
}

impl Display for SearchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFailure::NotFound => write!(f, "No derivation found"),
            SearchFailure::SearchExhausted { depth } => write!(f, "Search abandoned at recursion depth {}", depth),
        }
    }
}

impl std::error::Error for SearchFailure {}

/// The sentential forms of a leftmost derivation, from the start symbol to
/// the derived sentence.
#[derive(Debug, PartialEq, Clone)]
pub struct DerivationTable {
    steps: Vec<SententialForm>,
}

impl DerivationTable {
    pub fn steps(&self) -> &[SententialForm] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Display for DerivationTable {
    // 1: <S> -> a <S>
    // 2:     -> a a
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut steps = self.steps.iter().map(|step| format_form(step));
        let Some(first) = steps.next() else {
            return Ok(());
        };
        let Some(second) = steps.next() else {
            return writeln!(f, "1: {}", first);
        };

        writeln!(f, "1: {} -> {}", first, second)?;
        let width = first.chars().count() + 4;
        for (i, step) in steps.enumerate() {
            writeln!(f, "{:<w$}-> {}", format!("{}:", i + 2), step, w = width)?;
        }
        Ok(())
    }
}

// One level of the search: a sentential form whose leftmost nonterminal
// is being rewritten, and the next rule of its group to try
struct Frame<'g> {
    form: SententialForm,
    score: usize,
    index: usize,
    group: Vec<&'g Rule>,
    next: usize,
}

// What a newly reached sentential form turns out to be
enum Reached<'g> {
    Matched(SententialForm),
    DeadEnd,
    Open(Frame<'g>),
}

struct Search<'g> {
    grammar: &'g Grammar,
    target: &'g [Symbol],
    ledger: UsageLedger<'g>,
    flex: usize,
    max_len: usize,
    max_depth: usize,
    // Filled innermost first while unwinding
    table: Vec<SententialForm>,
}

impl<'g> Search<'g> {
    fn new(grammar: &'g Grammar, target: &'g [Symbol], limits: &SearchLimits) -> Self {
        Search {
            grammar,
            target,
            ledger: UsageLedger::new(grammar.rules()),
            flex: limits.flex.unwrap_or(target.len()),
            max_len: target.len() + limits.slack,
            max_depth: limits.max_depth,
            table: Vec::new(),
        }
    }

    fn reach(&self, form: SententialForm, score: usize) -> Reached<'g> {
        let Some(index) = leftmost_nonterminal(&form) else {
            if form == self.target {
                return Reached::Matched(form);
            }
            trace!(form = %format_form(&form), "sentence rejected");
            return Reached::DeadEnd;
        };

        if form.len() > self.max_len {
            trace!(form = %format_form(&form), "over length");
            return Reached::DeadEnd;
        }

        let group = self.grammar.rules_for(&form[index]);
        Reached::Open(Frame { form, score, index, group, next: 0 })
    }

    // Applies the next permitted rule of the frame's group, giving the
    // rewritten form and its score
    fn advance(&mut self, frame: &mut Frame<'g>) -> Option<(SententialForm, usize)> {
        while let Some(&rule) = frame.group.get(frame.next) {
            frame.next += 1;

            if !self.ledger.is_least_used(rule, &frame.group, self.flex) {
                trace!(%rule, "skipping overused rule");
                continue;
            }

            let next = substitute(&frame.form, frame.index, &rule.rhs);
            self.ledger.increment(rule);

            if !rule.introduces_terminal() {
                trace!(%rule, "expanding");
                return Some((next, frame.score));
            }

            let next_score = match_score(self.target, &next);
            if next_score > frame.score {
                trace!(%rule, "expanding");
                return Some((next, next_score));
            }
        }
        None
    }

    // Depth first over an explicit stack, so the recursion ceiling bounds
    // heap use rather than the thread's stack. Ok(true) once the target is
    // reached, with the path to it recorded in the table.
    fn run(&mut self, start: SententialForm, score: usize) -> Result<bool, SearchFailure> {
        let mut stack = match self.reach(start, score) {
            Reached::Matched(form) => {
                self.table.push(form);
                return Ok(true);
            }
            Reached::DeadEnd => return Ok(false),
            Reached::Open(frame) => vec![frame],
        };

        while let Some(frame) = stack.last_mut() {
            let Some((next, next_score)) = self.advance(frame) else {
                self.ledger.reset_group(&frame.group);
                stack.pop();
                continue;
            };

            let depth = stack.len();
            if depth > self.max_depth {
                return Err(SearchFailure::SearchExhausted { depth: self.max_depth });
            }

            match self.reach(next, next_score) {
                Reached::Matched(form) => {
                    self.table.push(form);
                    while let Some(frame) = stack.pop() {
                        self.table.push(frame.form);
                    }
                    return Ok(true);
                }
                Reached::DeadEnd => {}
                Reached::Open(frame) => stack.push(frame),
            }
        }

        Ok(false)
    }
}

pub fn derive(grammar: &Grammar, sentence: &[Symbol]) -> Result<DerivationTable, SearchFailure> {
    derive_with_limits(grammar, sentence, &SearchLimits::default())
}

/// Searches for a leftmost derivation of `sentence`, which must hold only
/// terminals.
pub fn derive_with_limits(grammar: &Grammar, sentence: &[Symbol], limits: &SearchLimits) -> Result<DerivationTable, SearchFailure> {
    debug!(sentence = %format_form(sentence), ?limits, "searching for derivation");

    let mut search = Search::new(grammar, sentence, limits);
    let start = vec![grammar.start_symbol().clone()];
    let score = match_score(sentence, &start);

    match search.run(start, score) {
        Ok(true) => {
            let mut steps = search.table;
            steps.reverse();
            debug!(steps = steps.len(), "derivation found");
            Ok(DerivationTable { steps })
        }
        Ok(false) => {
            debug!("no derivation found");
            Err(SearchFailure::NotFound)
        }
        Err(failure) => {
            debug!(%failure, "search exhausted");
            Err(failure)
        }
    }
}
