//! Weak Kleene (WK3) tableau rules. `U` is contaminating: a `U`-targeted
//! rule only needs to pin one operand to `U`, since the other is
//! irrelevant once the connective is already undefined. A `T`/`F`-targeted
//! rule, by contrast, must rule out `U` on *both* operands — under the
//! strict truth table in [`crate::truth::Wk3TruthSystem`] a defined result
//! is only reachable when neither operand is undefined — so those rules
//! branch over every operand-pair that yields the target value with both
//! sides pinned to `T` or `F`, the same shape FDE's B-rules use.

use crate::rules::rule::{Rule, RuleKind};
use crate::sign::Sign;

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new("t-negation", RuleKind::Alpha, 1, Sign::T, "~A", vec![vec![(Sign::F, 'A')]]),
        Rule::new("f-negation", RuleKind::Alpha, 1, Sign::F, "~A", vec![vec![(Sign::T, 'A')]]),
        Rule::new("u-negation", RuleKind::Alpha, 1, Sign::U, "~A", vec![vec![(Sign::U, 'A')]]),
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
            vec![
                vec![(Sign::F, 'A'), (Sign::T, 'B')],
                vec![(Sign::T, 'A'), (Sign::F, 'B')],
                vec![(Sign::F, 'A'), (Sign::F, 'B')],
            ],
        ),
        Rule::new(
            "u-conjunction",
            RuleKind::Beta,
            2,
            Sign::U,
            "A & B",
            vec![vec![(Sign::U, 'A')], vec![(Sign::U, 'B')]],
        ),
        Rule::new(
            "t-disjunction",
            RuleKind::Beta,
            1,
            Sign::T,
            "A | B",
            vec![
                vec![(Sign::T, 'A'), (Sign::T, 'B')],
                vec![(Sign::T, 'A'), (Sign::F, 'B')],
                vec![(Sign::F, 'A'), (Sign::T, 'B')],
            ],
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
            "u-disjunction",
            RuleKind::Beta,
            2,
            Sign::U,
            "A | B",
            vec![vec![(Sign::U, 'A')], vec![(Sign::U, 'B')]],
        ),
        Rule::new(
            "t-implication",
            RuleKind::Beta,
            1,
            Sign::T,
            "A -> B",
            vec![
                vec![(Sign::F, 'A'), (Sign::T, 'B')],
                vec![(Sign::F, 'A'), (Sign::F, 'B')],
                vec![(Sign::T, 'A'), (Sign::T, 'B')],
            ],
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
            "u-implication",
            RuleKind::Beta,
            2,
            Sign::U,
            "A -> B",
            vec![vec![(Sign::U, 'A')], vec![(Sign::U, 'B')]],
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
