//! Declarative α/β rules: a signed premise pattern plus branch conclusions
//! that simply re-sign the pattern's bound subformulas.

use crate::connective::ConnectiveSpec;
use crate::rules::pattern::{matches, Bindings, PatternNode};
use crate::sign::{Sign, SignedFormula};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleKind {
    Alpha,
    Beta,
}

/// One branch's worth of conclusions: re-sign the formula bound to `var`
/// under the premise match.
pub type ConclusionTemplate = (Sign, char);

pub struct Rule {
    pub name: &'static str,
    pub kind: RuleKind,
    /// Lower runs first within the same [`RuleKind`] (spec §4.5 ordering
    /// guarantee #2).
    pub priority: u8,
    pub premise_sign: Sign,
    pub premise_pattern: PatternNode,
    /// One inner `Vec` per resulting branch. Alpha rules have exactly one;
    /// beta rules have two or more.
    pub conclusions: Vec<Vec<ConclusionTemplate>>,
}

impl Rule {
    pub fn new(
        name: &'static str,
        kind: RuleKind,
        priority: u8,
        premise_sign: Sign,
        premise_template: &str,
        conclusions: Vec<Vec<ConclusionTemplate>>,
    ) -> Rule {
        if kind == RuleKind::Beta {
            assert!(conclusions.len() >= 2, "rule '{}' is beta but has < 2 branches", name);
        } else {
            assert!(conclusions.len() == 1, "rule '{}' is alpha but has != 1 branch", name);
        }
        Rule {
            name,
            kind,
            priority,
            premise_sign,
            premise_pattern: PatternNode::parse(premise_template),
            conclusions,
        }
    }

    /// Try to apply this rule to a single signed formula. Returns one
    /// signed-formula list per resulting branch, or `None` if the premise
    /// doesn't match (sign mismatch or shape mismatch) — callers treat this
    /// as [`crate::error::TableauError::RuleInapplicable`] without ever
    /// constructing the error for the common non-matching case.
    pub fn apply(
        &self,
        signed: &SignedFormula,
        connectives: &[ConnectiveSpec],
    ) -> Option<Vec<Vec<SignedFormula>>> {
        if signed.sign != self.premise_sign {
            return None;
        }
        let mut bindings: Bindings = Bindings::new();
        if !matches(&self.premise_pattern, &signed.formula, connectives, &mut bindings) {
            return None;
        }
        Some(
            self.conclusions
                .iter()
                .map(|branch| {
                    branch
                        .iter()
                        .map(|(sign, var)| {
                            SignedFormula::new(*sign, bindings[var].clone())
                        })
                        .collect()
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connective::{Associativity, Format};
    use crate::formula::Formula;

    fn table() -> Vec<ConnectiveSpec> {
        vec![ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix)]
    }

    #[test]
    fn alpha_conjunction_rule_produces_one_branch_two_formulas() {
        let rule = Rule::new(
            "t-conjunction",
            RuleKind::Alpha,
            1,
            Sign::T,
            "A & B",
            vec![vec![(Sign::T, 'A'), (Sign::T, 'B')]],
        );
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let conj = Formula::compound("&", vec![p.clone(), q.clone()]);
        let signed = SignedFormula::new(Sign::T, conj);
        let branches = rule.apply(&signed, &table()).unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0], vec![SignedFormula::new(Sign::T, p), SignedFormula::new(Sign::T, q)]);
    }

    #[test]
    fn wrong_sign_does_not_apply() {
        let rule = Rule::new(
            "t-conjunction",
            RuleKind::Alpha,
            1,
            Sign::T,
            "A & B",
            vec![vec![(Sign::T, 'A'), (Sign::T, 'B')]],
        );
        let conj = Formula::compound("&", vec![Formula::atom("p"), Formula::atom("q")]);
        let signed = SignedFormula::new(Sign::F, conj);
        assert!(rule.apply(&signed, &table()).is_none());
    }
}
