use std::collections::HashMap;

use crate::grammar::Rule;

/// Per-rule usage counts for one search. Rules are keyed by value, so
/// duplicate productions share a counter.
#[derive(Debug, Default)]
pub struct UsageLedger<'g> {
    counts: HashMap<&'g Rule, usize>,
}

impl<'g> UsageLedger<'g> {
    pub fn new(rules: &'g [Rule]) -> Self {
        UsageLedger { counts: rules.iter().map(|rule| (rule, 0)).collect() }
    }

    pub fn count(&self, rule: &Rule) -> usize {
        self.counts.get(rule).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, rule: &'g Rule) {
        *self.counts.entry(rule).or_insert(0) += 1;
    }

    // Forgets what a level of the search contributed once its group is
    // exhausted
    pub fn reset_group(&mut self, group: &[&'g Rule]) {
        for rule in group {
            self.counts.insert(*rule, 0);
        }
    }

    /// False when some other rule of the group trails `candidate` by more
    /// than `flex` uses.
    pub fn is_least_used(&self, candidate: &Rule, group: &[&Rule], flex: usize) -> bool {
        let used = self.count(candidate);
        group.iter()
            .filter(|rule| **rule != candidate)
            .all(|rule| self.count(rule) + flex >= used)
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{symbols, Symbol};

    use super::*;

    fn rule(lhs: &str, rhs: &str) -> Rule {
        Rule { lhs: Symbol::new(lhs), rhs: symbols(rhs) }
    }

    #[test]
    fn counts_start_at_zero() {
        let rules = vec![rule("<S>", "a <S>"), rule("<S>", "a")];
        let ledger = UsageLedger::new(&rules);
        assert!(rules.iter().all(|r| ledger.count(r) == 0));
    }

    #[test]
    fn duplicates_share_a_counter() {
        let rules = vec![rule("<S>", "a"), rule("<S>", "a")];
        let mut ledger = UsageLedger::new(&rules);
        ledger.increment(&rules[0]);
        assert_eq!(ledger.count(&rules[1]), 1);
    }

    #[test]
    fn fairness_bound() {
        let rules = vec![rule("<S>", "a <S>"), rule("<S>", "a"), rule("<A>", "b")];
        let group = vec![&rules[0], &rules[1]];
        let mut ledger = UsageLedger::new(&rules);

        for _ in 0..2 {
            ledger.increment(&rules[0]);
            assert!(ledger.is_least_used(&rules[0], &group, 2));
        }
        ledger.increment(&rules[0]);
        assert!(!ledger.is_least_used(&rules[0], &group, 2));
        assert!(ledger.is_least_used(&rules[1], &group, 2));

        ledger.reset_group(&group);
        assert_eq!(ledger.count(&rules[0]), 0);
        assert!(ledger.is_least_used(&rules[0], &group, 0));
    }

    #[test]
    fn single_rule_group_always_passes() {
        let rules = vec![rule("<A>", "b")];
        let group = vec![&rules[0]];
        let mut ledger = UsageLedger::new(&rules);
        for _ in 0..10 {
            ledger.increment(&rules[0]);
        }
        assert!(ledger.is_least_used(&rules[0], &group, 0));
    }
}
