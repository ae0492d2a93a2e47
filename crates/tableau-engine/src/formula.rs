//! Immutable formula AST shared across tableau branches.

use crate::connective::{find_by_symbol, Associativity, ConnectiveSpec, Format};
use crate::error::TableauError;
use crate::term::Term;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A formula node, reference-counted so branches can share subtrees without
/// deep-cloning (spec §5: "Formulas are shared immutable values referenced
/// by many branches").
pub type FormulaRef = Arc<Formula>;

/// A step in a path through the formula AST, used to target one specific
/// occurrence of a subformula rather than every structurally-equal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// The `n`th child of a compound connective.
    Child(usize),
    /// The restriction of a restricted quantifier.
    Restriction,
    /// The matrix of a restricted quantifier.
    Matrix,
}

/// An immutable propositional/first-order formula.
///
/// Equality and hashing are structural: two formulas built the same way
/// compare equal regardless of identity, which is what keys the engine's
/// contradiction index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Formula {
    Atom(Arc<str>),
    Predicate(Arc<str>, Vec<Term>),
    Compound(Arc<str>, Vec<FormulaRef>),
    RestrictedExistential {
        var: Arc<str>,
        restriction: FormulaRef,
        matrix: FormulaRef,
    },
    RestrictedUniversal {
        var: Arc<str>,
        restriction: FormulaRef,
        matrix: FormulaRef,
    },
}

impl Formula {
    pub fn atom(name: impl Into<Arc<str>>) -> FormulaRef {
        Arc::new(Formula::Atom(name.into()))
    }

    pub fn predicate(name: impl Into<Arc<str>>, terms: Vec<Term>) -> FormulaRef {
        Arc::new(Formula::Predicate(name.into(), terms))
    }

    /// Build a compound without checking arity against a connective table.
    /// Prefer [`Formula::compound_checked`] wherever a [`ConnectiveSpec`] is
    /// in scope (the parser and rule instantiation both are).
    pub fn compound(symbol: impl Into<Arc<str>>, args: Vec<FormulaRef>) -> FormulaRef {
        Arc::new(Formula::Compound(symbol.into(), args))
    }

    /// Build a compound, validating arity against `spec`.
    pub fn compound_checked(
        spec: &ConnectiveSpec,
        args: Vec<FormulaRef>,
    ) -> Result<FormulaRef, TableauError> {
        if args.len() != spec.arity {
            return Err(TableauError::MalformedFormula {
                connective: spec.symbol.to_string(),
                expected: spec.arity,
                got: args.len(),
            });
        }
        Ok(Arc::new(Formula::Compound(Arc::from(spec.symbol), args)))
    }

    pub fn restricted_existential(
        var: impl Into<Arc<str>>,
        restriction: FormulaRef,
        matrix: FormulaRef,
    ) -> FormulaRef {
        Arc::new(Formula::RestrictedExistential {
            var: var.into(),
            restriction,
            matrix,
        })
    }

    pub fn restricted_universal(
        var: impl Into<Arc<str>>,
        restriction: FormulaRef,
        matrix: FormulaRef,
    ) -> FormulaRef {
        Arc::new(Formula::RestrictedUniversal {
            var: var.into(),
            restriction,
            matrix,
        })
    }

    pub fn is_negation(&self, negation_symbol: &str) -> bool {
        matches!(self, Formula::Compound(sym, args) if sym.as_ref() == negation_symbol && args.len() == 1)
    }

    /// Atomic propositions occurring syntactically (propositional atoms
    /// only — see [`Formula::predicates`] for first-order instances).
    pub fn atoms(&self) -> HashSet<Arc<str>> {
        let mut out = HashSet::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms(&self, out: &mut HashSet<Arc<str>>) {
        match self {
            Formula::Atom(name) => {
                out.insert(name.clone());
            }
            Formula::Predicate(_, _) => {}
            Formula::Compound(_, args) => {
                for a in args {
                    a.collect_atoms(out);
                }
            }
            Formula::RestrictedExistential { restriction, matrix, .. }
            | Formula::RestrictedUniversal { restriction, matrix, .. } => {
                restriction.collect_atoms(out);
                matrix.collect_atoms(out);
            }
        }
    }

    /// Distinct `(name, arity)` predicate instances occurring syntactically,
    /// together with the constants they're applied to.
    pub fn predicates(&self) -> Vec<(Arc<str>, Vec<Term>)> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates(&self, out: &mut Vec<(Arc<str>, Vec<Term>)>) {
        match self {
            Formula::Atom(_) => {}
            Formula::Predicate(name, terms) => out.push((name.clone(), terms.clone())),
            Formula::Compound(_, args) => {
                for a in args {
                    a.collect_predicates(out);
                }
            }
            Formula::RestrictedExistential { restriction, matrix, .. }
            | Formula::RestrictedUniversal { restriction, matrix, .. } => {
                restriction.collect_predicates(out);
                matrix.collect_predicates(out);
            }
        }
    }

    /// Constants mentioned anywhere in the formula (used to seed a branch's
    /// first-order domain before any fresh constant is generated).
    pub fn constants(&self) -> HashSet<Arc<str>> {
        let mut out = HashSet::new();
        for (_, terms) in self.predicates() {
            for t in terms {
                collect_term_constants(&t, &mut out);
            }
        }
        out
    }

    /// Capture-avoiding substitution of terms: `subst` maps variable names to
    /// replacement terms. A quantifier's own bound variable is removed from
    /// the substitution before descending into its restriction/matrix, so a
    /// replacement can never be captured by a nested binder of the same name.
    pub fn substitute_terms(&self, subst: &HashMap<Arc<str>, Term>) -> FormulaRef {
        match self {
            Formula::Atom(_) => Arc::new(self.clone()),
            Formula::Predicate(name, terms) => {
                let new_terms = terms
                    .iter()
                    .map(|t| substitute_term(t, subst))
                    .collect();
                Arc::new(Formula::Predicate(name.clone(), new_terms))
            }
            Formula::Compound(sym, args) => {
                let new_args = args.iter().map(|a| a.substitute_terms(subst)).collect();
                Arc::new(Formula::Compound(sym.clone(), new_args))
            }
            Formula::RestrictedExistential { var, restriction, matrix } => {
                let inner = without_var(subst, var);
                Arc::new(Formula::RestrictedExistential {
                    var: var.clone(),
                    restriction: restriction.substitute_terms(&inner),
                    matrix: matrix.substitute_terms(&inner),
                })
            }
            Formula::RestrictedUniversal { var, restriction, matrix } => {
                let inner = without_var(subst, var);
                Arc::new(Formula::RestrictedUniversal {
                    var: var.clone(),
                    restriction: restriction.substitute_terms(&inner),
                    matrix: matrix.substitute_terms(&inner),
                })
            }
        }
    }

    /// Substitute a single variable with a fresh constant. Convenience
    /// wrapper over [`Formula::substitute_terms`].
    pub fn instantiate(&self, var: &str, constant: &str) -> FormulaRef {
        let mut subst = HashMap::new();
        subst.insert(Arc::from(var), Term::constant(constant));
        self.substitute_terms(&subst)
    }

    /// All subformulas including `self`, depth-first.
    pub fn subformulas(&self) -> Vec<FormulaRef> {
        let mut out = vec![Arc::new(self.clone())];
        match self {
            Formula::Atom(_) | Formula::Predicate(_, _) => {}
            Formula::Compound(_, args) => {
                for a in args {
                    out.extend(a.subformulas());
                }
            }
            Formula::RestrictedExistential { restriction, matrix, .. }
            | Formula::RestrictedUniversal { restriction, matrix, .. } => {
                out.extend(restriction.subformulas());
                out.extend(matrix.subformulas());
            }
        }
        out
    }

    /// Print using `connectives` for precedence/associativity/format. Infix
    /// compounds get parenthesized operands when precedence demands it;
    /// prefix compounds omit parentheses around a single atomic operand;
    /// functional compounds print `name(arg,...)`.
    pub fn display(&self, connectives: &[ConnectiveSpec]) -> String {
        self.display_prec(connectives, 0)
    }

    fn display_prec(&self, connectives: &[ConnectiveSpec], min_prec: u8) -> String {
        match self {
            Formula::Atom(name) => name.to_string(),
            Formula::Predicate(name, terms) => {
                let args: Vec<String> = terms.iter().map(Term::display_string).collect();
                format!("{}({})", name, args.join(","))
            }
            Formula::Compound(sym, args) => {
                let spec = find_by_symbol(connectives, sym.as_ref());
                let (prec, format, assoc) = spec
                    .map(|s| (s.precedence, s.format, s.associativity))
                    .unwrap_or((0, Format::Infix, Associativity::None));
                let rendered = match format {
                    Format::Functional => {
                        let inner: Vec<String> = args
                            .iter()
                            .map(|a| a.display_prec(connectives, 0))
                            .collect();
                        format!("{}({})", sym, inner.join(","))
                    }
                    Format::Prefix => {
                        let operand = &args[0];
                        let needs_parens = matches!(
                            operand.as_ref(),
                            Formula::Compound(inner_sym, _) if find_by_symbol(connectives, inner_sym.as_ref())
                                .map(|s| s.precedence < prec)
                                .unwrap_or(false)
                        );
                        let rendered_operand = operand.display_prec(connectives, prec);
                        if needs_parens {
                            format!("{}({})", sym, rendered_operand)
                        } else {
                            format!("{}{}", sym, rendered_operand)
                        }
                    }
                    Format::Infix => {
                        let left_min = match assoc {
                            Associativity::Left => prec,
                            _ => prec + 1,
                        };
                        let right_min = match assoc {
                            Associativity::Right => prec,
                            _ => prec + 1,
                        };
                        let left = args[0].display_prec(connectives, left_min);
                        let right = args[1].display_prec(connectives, right_min);
                        format!("{} {} {}", left, sym, right)
                    }
                };
                if prec < min_prec {
                    format!("({})", rendered)
                } else {
                    rendered
                }
            }
            Formula::RestrictedExistential { var, restriction, matrix } => format!(
                "[∃{} {}]{}",
                var,
                restriction.display_prec(connectives, 0),
                matrix.display_prec(connectives, 0)
            ),
            Formula::RestrictedUniversal { var, restriction, matrix } => format!(
                "[∀{} {}]{}",
                var,
                restriction.display_prec(connectives, 0),
                matrix.display_prec(connectives, 0)
            ),
        }
    }
}

fn without_var(subst: &HashMap<Arc<str>, Term>, var: &str) -> HashMap<Arc<str>, Term> {
    subst
        .iter()
        .filter(|(k, _)| k.as_ref() != var)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn substitute_term(term: &Term, subst: &HashMap<Arc<str>, Term>) -> Term {
    match term {
        Term::Variable(name) => subst.get(name.as_ref()).cloned().unwrap_or_else(|| term.clone()),
        Term::Constant(_) => term.clone(),
        Term::FunctionApplication(name, args) => Term::FunctionApplication(
            name.clone(),
            args.iter().map(|a| substitute_term(a, subst)).collect(),
        ),
    }
}

fn collect_term_constants(term: &Term, out: &mut HashSet<Arc<str>>) {
    match term {
        Term::Constant(name) => {
            out.insert(name.clone());
        }
        Term::Variable(_) => {}
        Term::FunctionApplication(_, args) => {
            for a in args {
                collect_term_constants(a, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_collects_propositional_atoms_only() {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let conj = Formula::compound("&", vec![p, q]);
        let atoms = conj.atoms();
        assert!(atoms.contains("p"));
        assert!(atoms.contains("q"));
        assert_eq!(atoms.len(), 2);
    }

    #[test]
    fn compound_checked_rejects_wrong_arity() {
        let spec = ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix);
        let p = Formula::atom("p");
        let err = Formula::compound_checked(&spec, vec![p]).unwrap_err();
        assert!(matches!(err, TableauError::MalformedFormula { .. }));
    }

    #[test]
    fn instantiate_replaces_bound_variable_with_constant() {
        let matrix = Formula::predicate("Flies", vec![Term::variable("X")]);
        let instantiated = matrix.instantiate("X", "tweety");
        assert_eq!(
            *instantiated,
            Formula::Predicate("Flies".into(), vec![Term::constant("tweety")])
        );
    }

    #[test]
    fn capture_avoidance_stops_at_nested_same_named_binder() {
        // [∃X P(X)]([∀X Q(X)]R(X)) — substituting X at the top level must not
        // reach inside the nested ∀X binder, which rebinds X.
        let inner = Formula::restricted_universal(
            "X",
            Formula::predicate("Q", vec![Term::variable("X")]),
            Formula::predicate("R", vec![Term::variable("X")]),
        );
        let mut subst = HashMap::new();
        subst.insert(Arc::from("X"), Term::constant("c"));
        let result = inner.substitute_terms(&subst);
        match result.as_ref() {
            Formula::RestrictedUniversal { restriction, matrix, .. } => {
                assert_eq!(**restriction, Formula::Predicate("Q".into(), vec![Term::variable("X")]));
                assert_eq!(**matrix, Formula::Predicate("R".into(), vec![Term::variable("X")]));
            }
            _ => panic!("expected RestrictedUniversal"),
        }
    }
}
