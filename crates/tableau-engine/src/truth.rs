//! Truth values and the per-logic connective tables that compute them.

use crate::formula::Formula;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The union of every truth value used by a shipped logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TruthValue {
    /// Classical, WK3, wKrQ, FDE: true.
    True,
    /// Classical, WK3, wKrQ, FDE: false.
    False,
    /// WK3: undefined (the gap value, written `e`).
    Undefined,
    /// wKrQ, FDE: both true and false (the glut value, written `b`).
    Both,
    /// wKrQ, FDE: neither true nor false (written `n`).
    Neither,
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TruthValue::True => "t",
            TruthValue::False => "f",
            TruthValue::Undefined => "e",
            TruthValue::Both => "b",
            TruthValue::Neither => "n",
        };
        f.write_str(s)
    }
}

/// A model: a total valuation over the atoms (and, for first-order logics,
/// predicate instances) a formula mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Valuation {
    pub atoms: HashMap<Arc<str>, TruthValue>,
}

impl Valuation {
    pub fn get(&self, atom: &str) -> Option<TruthValue> {
        self.atoms.get(atom).copied()
    }

    pub fn insert(&mut self, atom: impl Into<Arc<str>>, value: TruthValue) {
        self.atoms.insert(atom.into(), value);
    }
}

/// A logic's propositional connective semantics: how `not`/`and`/`or`/
/// `implies`/`iff` combine truth values, and which values count as
/// designated (true enough to satisfy a branch / ground entailment).
///
/// Connectives are looked up by [`crate::connective::ConnectiveSpec::canonical`]
/// name rather than surface symbol, so aliasing symbols (`&` and `·`, say)
/// never need duplicate table entries.
pub trait TruthValueSystem: Send + Sync {
    fn name(&self) -> &'static str;
    fn values(&self) -> &'static [TruthValue];
    fn designated(&self) -> &'static [TruthValue];
    fn is_designated(&self, v: TruthValue) -> bool {
        self.designated().contains(&v)
    }
    fn not(&self, a: TruthValue) -> TruthValue;
    fn and(&self, a: TruthValue, b: TruthValue) -> TruthValue;
    fn or(&self, a: TruthValue, b: TruthValue) -> TruthValue;
    /// Default material implication `not(a) or b`; wKrQ overrides this with
    /// its own table (see [`WkrqTruthSystem`]).
    fn implies(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        self.or(self.not(a), b)
    }
    fn iff(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        self.and(self.implies(a, b), self.implies(b, a))
    }

    /// Evaluate a quantifier-free, predicate-free formula under `valuation`.
    /// Predicates and restricted quantifiers require a first-order model
    /// with a domain and are evaluated instead by [`crate::tableau::model`].
    fn evaluate(&self, formula: &Formula, valuation: &Valuation) -> Option<TruthValue> {
        match formula {
            Formula::Atom(name) => valuation.get(name),
            Formula::Predicate(_, _) => None,
            Formula::Compound(sym, args) => {
                let canonical = canonical_name(sym.as_ref())?;
                match (canonical, args.as_slice()) {
                    ("not", [a]) => Some(self.not(self.evaluate(a, valuation)?)),
                    ("and", [a, b]) => {
                        Some(self.and(self.evaluate(a, valuation)?, self.evaluate(b, valuation)?))
                    }
                    ("or", [a, b]) => {
                        Some(self.or(self.evaluate(a, valuation)?, self.evaluate(b, valuation)?))
                    }
                    ("implies", [a, b]) => Some(
                        self.implies(self.evaluate(a, valuation)?, self.evaluate(b, valuation)?),
                    ),
                    ("iff", [a, b]) => {
                        Some(self.iff(self.evaluate(a, valuation)?, self.evaluate(b, valuation)?))
                    }
                    _ => None,
                }
            }
            Formula::RestrictedExistential { .. } | Formula::RestrictedUniversal { .. } => None,
        }
    }
}

/// Recovers a canonical operation name from a bare symbol when no
/// [`crate::connective::ConnectiveSpec`] table is at hand (used by tests and
/// by evaluation of formulas built directly with the well-known ASCII
/// symbols). Logic plugins should prefer carrying the canonical name on the
/// formula's connective table instead of relying on this guesswork.
fn canonical_name(symbol: &str) -> Option<&'static str> {
    match symbol {
        "~" | "!" | "¬" | "-" => Some("not"),
        "&" | "·" | "^" | "." | "*" => Some("and"),
        "|" | "∨" | "v" | "V" => Some("or"),
        "->" | "⊃" | "=>" | ">" => Some("implies"),
        "<->" | "≡" | "<=>" => Some("iff"),
        _ => None,
    }
}

/// T/F only, standard Boolean tables.
pub struct ClassicalTruthSystem;

impl TruthValueSystem for ClassicalTruthSystem {
    fn name(&self) -> &'static str {
        "classical"
    }
    fn values(&self) -> &'static [TruthValue] {
        &[TruthValue::True, TruthValue::False]
    }
    fn designated(&self) -> &'static [TruthValue] {
        &[TruthValue::True]
    }
    fn not(&self, a: TruthValue) -> TruthValue {
        match a {
            TruthValue::True => TruthValue::False,
            TruthValue::False => TruthValue::True,
            _ => unreachable!("classical truth system only produces True/False"),
        }
    }
    fn and(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (True, True) => True,
            (False, _) | (_, False) => False,
            _ => unreachable!("classical truth system only produces True/False"),
        }
    }
    fn or(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (False, False) => False,
            (True, _) | (_, True) => True,
            _ => unreachable!("classical truth system only produces True/False"),
        }
    }
}

/// T/F/U with strict (contaminating) connectives: any operand valued `U`
/// forces the result to `U`, even when the other operand alone would
/// classically decide the result (`f ∧ e = e`, not `f`).
pub struct Wk3TruthSystem;

impl TruthValueSystem for Wk3TruthSystem {
    fn name(&self) -> &'static str {
        "wk3"
    }
    fn values(&self) -> &'static [TruthValue] {
        &[TruthValue::True, TruthValue::False, TruthValue::Undefined]
    }
    fn designated(&self) -> &'static [TruthValue] {
        &[TruthValue::True]
    }
    fn not(&self, a: TruthValue) -> TruthValue {
        match a {
            TruthValue::True => TruthValue::False,
            TruthValue::False => TruthValue::True,
            TruthValue::Undefined => TruthValue::Undefined,
            _ => unreachable!("wk3 truth system only produces True/False/Undefined"),
        }
    }
    fn and(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (Undefined, _) | (_, Undefined) => Undefined,
            (True, True) => True,
            (False, _) | (_, False) => False,
            _ => unreachable!("wk3 truth system only produces True/False/Undefined"),
        }
    }
    fn or(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (Undefined, _) | (_, Undefined) => Undefined,
            (False, False) => False,
            (True, _) | (_, True) => True,
            _ => unreachable!("wk3 truth system only produces True/False/Undefined"),
        }
    }
}

/// T/F/B/N, the standard Belnap–Dunn four-valued connectives: conjunction
/// and disjunction are meet/join in the truth order `F ⊑ {N, B} ⊑ T` (`N`
/// and `B` incomparable), negation swaps `T`/`F` and fixes `B`/`N`.
pub struct FdeTruthSystem;

impl TruthValueSystem for FdeTruthSystem {
    fn name(&self) -> &'static str {
        "fde"
    }
    fn values(&self) -> &'static [TruthValue] {
        &[TruthValue::True, TruthValue::False, TruthValue::Both, TruthValue::Neither]
    }
    fn designated(&self) -> &'static [TruthValue] {
        &[TruthValue::True, TruthValue::Both]
    }
    fn not(&self, a: TruthValue) -> TruthValue {
        use TruthValue::*;
        match a {
            True => False,
            False => True,
            Both => Both,
            Neither => Neither,
            Undefined => unreachable!("fde truth system never produces Undefined"),
        }
    }
    fn and(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (False, _) | (_, False) => False,
            (True, x) | (x, True) => x,
            (Both, Both) => Both,
            (Neither, Neither) => Neither,
            (Both, Neither) | (Neither, Both) => False,
            _ => unreachable!("fde truth system never produces Undefined"),
        }
    }
    fn or(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        use TruthValue::*;
        match (a, b) {
            (True, _) | (_, True) => True,
            (False, x) | (x, False) => x,
            (Both, Both) => Both,
            (Neither, Neither) => Neither,
            (Both, Neither) | (Neither, Both) => True,
            _ => unreachable!("fde truth system never produces Undefined"),
        }
    }
}

/// T/F/U. wKrQ is weak Kleene logic underneath — its propositional
/// connectives coincide with [`Wk3TruthSystem`]'s three-valued tables. The
/// two logics diverge in their sign systems and rule sets: wKrQ adds
/// epistemic `M`/`N` signs and restricted quantifiers on top of the same
/// gap value `U` represents here. See `DESIGN.md` for this Open Question
/// resolution.
pub struct WkrqTruthSystem {
    inner: Wk3TruthSystem,
}

impl WkrqTruthSystem {
    pub fn new() -> Self {
        WkrqTruthSystem { inner: Wk3TruthSystem }
    }
}

impl Default for WkrqTruthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TruthValueSystem for WkrqTruthSystem {
    fn name(&self) -> &'static str {
        "wkrq"
    }
    fn values(&self) -> &'static [TruthValue] {
        self.inner.values()
    }
    fn designated(&self) -> &'static [TruthValue] {
        &[TruthValue::True]
    }
    fn not(&self, a: TruthValue) -> TruthValue {
        self.inner.not(a)
    }
    fn and(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        self.inner.and(a, b)
    }
    fn or(&self, a: TruthValue, b: TruthValue) -> TruthValue {
        self.inner.or(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wk3_conjunction_with_undefined_is_contaminating() {
        let sys = Wk3TruthSystem;
        assert_eq!(
            sys.and(TruthValue::False, TruthValue::Undefined),
            TruthValue::Undefined
        );
        assert_eq!(
            sys.and(TruthValue::Undefined, TruthValue::True),
            TruthValue::Undefined
        );
    }

    #[test]
    fn fde_conjunction_of_both_and_neither_is_false() {
        let sys = FdeTruthSystem;
        assert_eq!(sys.and(TruthValue::Both, TruthValue::Neither), TruthValue::False);
        assert_eq!(sys.or(TruthValue::Both, TruthValue::Neither), TruthValue::True);
    }

    #[test]
    fn fde_negation_fixes_both_and_neither() {
        let sys = FdeTruthSystem;
        assert_eq!(sys.not(TruthValue::Both), TruthValue::Both);
        assert_eq!(sys.not(TruthValue::Neither), TruthValue::Neither);
    }

    #[test]
    fn classical_evaluate_walks_compound_formula() {
        let sys = ClassicalTruthSystem;
        let mut v = Valuation::default();
        v.insert("p", TruthValue::True);
        v.insert("q", TruthValue::False);
        let formula = Formula::compound(
            "->",
            vec![Formula::atom("p"), Formula::atom("q")],
        );
        assert_eq!(sys.evaluate(&formula, &v), Some(TruthValue::False));
    }

    #[test]
    fn wkrq_designated_set_excludes_undefined() {
        let sys = WkrqTruthSystem::new();
        assert!(sys.is_designated(TruthValue::True));
        assert!(!sys.is_designated(TruthValue::Undefined));
    }

    #[test]
    fn wkrq_conjunction_matches_weak_kleene() {
        let sys = WkrqTruthSystem::new();
        assert_eq!(sys.and(TruthValue::False, TruthValue::Undefined), TruthValue::Undefined);
    }
}
