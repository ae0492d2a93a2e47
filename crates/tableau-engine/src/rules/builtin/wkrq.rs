//! wKrQ propositional rules. `M`/`N` (Ferguson's epistemic signs) branch
//! the way WK3's `U` does — see `DESIGN.md` for why this crate treats them
//! as the epistemic analogue of weak Kleene's contaminating gap value
//! rather than inventing a distinct branching shape. Restricted-quantifier
//! (γ/δ) rules live in [`crate::tableau::engine`] since they need branch
//! domain state that a static pattern/conclusion rule cannot express.

use crate::rules::rule::{Rule, RuleKind};
use crate::sign::Sign;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new("t-negation", RuleKind::Alpha, 1, Sign::T, "~A", vec![vec![(Sign::F, 'A')]]),
        Rule::new("f-negation", RuleKind::Alpha, 1, Sign::F, "~A", vec![vec![(Sign::T, 'A')]]),
        Rule::new("m-negation", RuleKind::Alpha, 1, Sign::M, "~A", vec![vec![(Sign::N, 'A')]]),
        Rule::new("n-negation", RuleKind::Alpha, 1, Sign::N, "~A", vec![vec![(Sign::M, 'A')]]),
        Rule::new(
            "t-conjunction",
            RuleKind::Alpha,
            1,
            Sign::T,
            "A & B",
            vec![vec![(Sign::T, 'A'), (Sign::T, 'B')]],
        ),
        Rule::new(
            "f-conjunction",
            RuleKind::Beta,
            1,
            Sign::F,
            "A & B",
            vec![vec![(Sign::F, 'A')], vec![(Sign::F, 'B')]],
        ),
        Rule::new(
            "m-conjunction",
            RuleKind::Beta,
            2,
            Sign::M,
            "A & B",
            vec![vec![(Sign::M, 'A')], vec![(Sign::M, 'B')]],
        ),
        Rule::new(
            "n-conjunction",
            RuleKind::Beta,
            2,
            Sign::N,
            "A & B",
            vec![vec![(Sign::N, 'A')], vec![(Sign::N, 'B')]],
        ),
        Rule::new(
            "t-disjunction",
            RuleKind::Beta,
            1,
            Sign::T,
            "A | B",
            vec![vec![(Sign::T, 'A')], vec![(Sign::T, 'B')]],
        ),
        Rule::new(
            "f-disjunction",
            RuleKind::Alpha,
            1,
            Sign::F,
            "A | B",
            vec![vec![(Sign::F, 'A'), (Sign::F, 'B')]],
        ),
        Rule::new(
            "m-disjunction",
            RuleKind::Beta,
            2,
            Sign::M,
            "A | B",
            vec![vec![(Sign::M, 'A')], vec![(Sign::M, 'B')]],
        ),
        Rule::new(
            "n-disjunction",
            RuleKind::Beta,
            2,
            Sign::N,
            "A | B",
            vec![vec![(Sign::N, 'A')], vec![(Sign::N, 'B')]],
        ),
        Rule::new(
            "t-implication",
            RuleKind::Beta,
            1,
            Sign::T,
            "A -> B",
            vec![vec![(Sign::F, 'A')], vec![(Sign::T, 'B')]],
        ),
        Rule::new(
            "f-implication",
            RuleKind::Alpha,
            1,
            Sign::F,
            "A -> B",
            vec![vec![(Sign::T, 'A'), (Sign::F, 'B')]],
        ),
        Rule::new(
            "m-implication",
            RuleKind::Beta,
            2,
            Sign::M,
            "A -> B",
            vec![vec![(Sign::N, 'A')], vec![(Sign::M, 'B')]],
        ),
        Rule::new(
            "n-implication",
            RuleKind::Beta,
            2,
            Sign::N,
            "A -> B",
            vec![vec![(Sign::M, 'A')], vec![(Sign::N, 'B')]],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_unique() {
        let names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len());
    }
}
