//! Standard two-valued Smullyan tableau rules.

use crate::rules::rule::{Rule, RuleKind};
use crate::sign::Sign;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new("t-negation", RuleKind::Alpha, 1, Sign::T, "~A", vec![vec![(Sign::F, 'A')]]),
        Rule::new("f-negation", RuleKind::Alpha, 1, Sign::F, "~A", vec![vec![(Sign::T, 'A')]]),
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
