use crate::grammar::{SententialForm, Symbol};

/// Length of the common prefix of the target sentence and a sentential form.
pub fn match_score(target: &[Symbol], form: &[Symbol]) -> usize {
    target.iter().zip(form).take_while(|(a, b)| a == b).count()
}

pub fn leftmost_nonterminal(form: &[Symbol]) -> Option<usize> {
    form.iter().position(Symbol::is_nonterminal)
}

// Replaces the symbol at `index` with `rhs`
pub fn substitute(form: &[Symbol], index: usize, rhs: &[Symbol]) -> SententialForm {
    let mut next = Vec::with_capacity(form.len() + rhs.len() - 1);
    next.extend_from_slice(&form[..index]);
    next.extend_from_slice(rhs);
    next.extend_from_slice(&form[index + 1..]);
    next
}
