pub mod builtin;
pub mod pattern;
pub mod rule;

pub use rule::{ConclusionTemplate, Rule, RuleKind};

/// A logic's full set of propositional α/β rules, registration-ordered
/// (registration order is the tie-breaker of last resort — spec §4.5
/// ordering guarantee #3).
pub type RuleSet = Vec<Rule>;

impl Rule {
    pub fn kind_ordinal(&self) -> u8 {
        match self.kind {
            RuleKind::Alpha => 0,
            RuleKind::Beta => 1,
        }
    }
}
