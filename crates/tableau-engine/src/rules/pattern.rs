//! Premise patterns, parsed once into a match tree rather than re-parsed
//! on every match attempt.

use crate::connective::{find_by_symbol, ConnectiveSpec};
use crate::formula::{Formula, FormulaRef};
use std::collections::HashMap;

/// A compact match tree for a rule premise's formula shape. Built once when
/// a [`crate::rules::rule::Rule`] is constructed (at plugin registration),
/// then walked directly against candidate formulas — no string re-parsing
/// happens during search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// A single uppercase letter binds to whatever formula occupies this
    /// position.
    Var(char),
    /// `~A`: the formula must be a one-place compound whose canonical
    /// operation is `"not"`.
    Neg(Box<PatternNode>),
    /// `A & B` / `A | B` / `A -> B`: the formula must be a two-place
    /// compound whose canonical operation matches.
    Binary(&'static str, Box<PatternNode>, Box<PatternNode>),
}

impl PatternNode {
    /// Parse a template like `"A"`, `"~A"`, or `"A & B"`. Templates only
    /// ever combine single-letter variables with `~`, `&`, `|`, and `->`,
    /// so this is a direct scan rather than a general expression parser.
    pub fn parse(template: &str) -> PatternNode {
        let t = template.trim();
        if let Some(rest) = t.strip_prefix('~') {
            return PatternNode::Neg(Box::new(PatternNode::parse(rest)));
        }
        if t.chars().count() == 1 {
            return PatternNode::Var(t.chars().next().expect("non-empty template"));
        }
        if let Some(pos) = t.find("->") {
            let (l, r) = (&t[..pos], &t[pos + 2..]);
            return PatternNode::Binary(
                "implies",
                Box::new(PatternNode::parse(l.trim())),
                Box::new(PatternNode::parse(r.trim())),
            );
        }
        if let Some(pos) = t.find('&') {
            let (l, r) = (&t[..pos], &t[pos + 1..]);
            return PatternNode::Binary(
                "and",
                Box::new(PatternNode::parse(l.trim())),
                Box::new(PatternNode::parse(r.trim())),
            );
        }
        if let Some(pos) = t.find('|') {
            let (l, r) = (&t[..pos], &t[pos + 1..]);
            return PatternNode::Binary(
                "or",
                Box::new(PatternNode::parse(l.trim())),
                Box::new(PatternNode::parse(r.trim())),
            );
        }
        panic!("unparsable rule pattern template: '{}'", template);
    }
}

pub type Bindings = HashMap<char, FormulaRef>;

/// Try to match `node` against `formula`, accumulating bindings. Returns
/// `false` (leaving `bindings` partially populated — callers always discard
/// it on failure) if the shapes disagree or a variable's new occurrence
/// conflicts with an earlier binding.
pub fn matches(
    node: &PatternNode,
    formula: &FormulaRef,
    connectives: &[ConnectiveSpec],
    bindings: &mut Bindings,
) -> bool {
    match node {
        PatternNode::Var(c) => match bindings.get(c) {
            Some(existing) => existing == formula,
            None => {
                bindings.insert(*c, formula.clone());
                true
            }
        },
        PatternNode::Neg(inner) => match formula.as_ref() {
            Formula::Compound(sym, args) if args.len() == 1 => {
                match find_by_symbol(connectives, sym.as_ref()) {
                    Some(spec) if spec.canonical == "not" => {
                        matches(inner, &args[0], connectives, bindings)
                    }
                    _ => false,
                }
            }
            _ => false,
        },
        PatternNode::Binary(op, left, right) => match formula.as_ref() {
            Formula::Compound(sym, args) if args.len() == 2 => {
                match find_by_symbol(connectives, sym.as_ref()) {
                    Some(spec) if &spec.canonical == op => {
                        matches(left, &args[0], connectives, bindings)
                            && matches(right, &args[1], connectives, bindings)
                    }
                    _ => false,
                }
            }
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connective::{Associativity, Format};

    fn table() -> Vec<ConnectiveSpec> {
        vec![
            ConnectiveSpec::new("~", "not", 1, 4, Associativity::None, Format::Prefix),
            ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix),
        ]
    }

    #[test]
    fn binds_conjunction_operands() {
        let node = PatternNode::parse("A & B");
        let f = Formula::compound("&", vec![Formula::atom("p"), Formula::atom("q")]);
        let mut bindings = Bindings::new();
        assert!(matches(&node, &f, &table(), &mut bindings));
        assert_eq!(bindings[&'A'], Formula::atom("p"));
        assert_eq!(bindings[&'B'], Formula::atom("q"));
    }

    #[test]
    fn rejects_mismatched_connective() {
        let node = PatternNode::parse("~A");
        let f = Formula::compound("&", vec![Formula::atom("p"), Formula::atom("q")]);
        let mut bindings = Bindings::new();
        assert!(!matches(&node, &f, &table(), &mut bindings));
    }

    #[test]
    fn repeated_variable_requires_equal_formula() {
        let node = PatternNode::Binary(
            "and",
            Box::new(PatternNode::Var('A')),
            Box::new(PatternNode::Var('A')),
        );
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let same = Formula::compound("&", vec![p.clone(), p.clone()]);
        let different = Formula::compound("&", vec![p, q]);
        let mut b1 = Bindings::new();
        assert!(matches(&node, &same, &table(), &mut b1));
        let mut b2 = Bindings::new();
        assert!(!matches(&node, &different, &table(), &mut b2));
    }
}
