//! First-Degree Entailment tableau rules: the standard Belnap–Dunn
//! four-valued connectives (see [`crate::truth::FdeTruthSystem`]), with
//! `B`-rules branching over the three ways a glut can arise.

use crate::rules::rule::{Rule, RuleKind};
use crate::sign::Sign;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new("t-negation", RuleKind::Alpha, 1, Sign::T, "~A", vec![vec![(Sign::F, 'A')]]),
        Rule::new("f-negation", RuleKind::Alpha, 1, Sign::F, "~A", vec![vec![(Sign::T, 'A')]]),
        Rule::new("b-negation", RuleKind::Alpha, 1, Sign::B, "~A", vec![vec![(Sign::B, 'A')]]),
        Rule::new("n-negation", RuleKind::Alpha, 1, Sign::N, "~A", vec![vec![(Sign::N, 'A')]]),
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
            "b-conjunction",
            RuleKind::Beta,
            2,
            Sign::B,
            "A & B",
            vec![
                vec![(Sign::B, 'A'), (Sign::T, 'B')],
                vec![(Sign::T, 'A'), (Sign::B, 'B')],
                vec![(Sign::B, 'A'), (Sign::B, 'B')],
            ],
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
            "b-disjunction",
            RuleKind::Beta,
            2,
            Sign::B,
            "A | B",
            vec![
                vec![(Sign::B, 'A'), (Sign::F, 'B')],
                vec![(Sign::F, 'A'), (Sign::B, 'B')],
                vec![(Sign::B, 'A'), (Sign::B, 'B')],
            ],
        ),
        Rule::new(
            "n-disjunction",
            RuleKind::Beta,
            2,
            Sign::N,
            "A | B",
            vec![vec![(Sign::N, 'A')], vec![(Sign::N, 'B')]],
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
