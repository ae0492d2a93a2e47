//! Signs: the tags attached to formulas on a tableau branch.

use crate::formula::FormulaRef;
use crate::truth::TruthValue;
use std::collections::HashSet;
use std::fmt;

/// The union of every sign used by a shipped logic. A given [`SignSystem`]
/// only recognizes a subset — `ClassicalSignSystem` never produces `U`, `M`,
/// `N`, or `B`, for instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    /// Classical, WK3, wKrQ, FDE: "formula is true".
    T,
    /// Classical, WK3, wKrQ, FDE: "formula is false".
    F,
    /// WK3: "formula is undefined".
    U,
    /// wKrQ: "formula may be true" (epistemic possibility).
    M,
    /// wKrQ, FDE: "formula is not established" / "neither".
    N,
    /// FDE: "formula is both true and false".
    B,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::T => "T",
            Sign::F => "F",
            Sign::U => "U",
            Sign::M => "M",
            Sign::N => "N",
            Sign::B => "B",
        };
        f.write_str(s)
    }
}

/// A formula tagged with a sign — the unit tableau branches accumulate and
/// close on. Cheap to clone: the formula is `Arc`-shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SignedFormula {
    pub sign: Sign,
    pub formula: FormulaRef,
}

impl SignedFormula {
    pub fn new(sign: Sign, formula: FormulaRef) -> Self {
        SignedFormula { sign, formula }
    }
}

impl fmt::Display for SignedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.sign, self.formula)
    }
}

/// The closed set of signs a logic uses, and the rule that decides when two
/// signs on the same formula close a branch.
pub trait SignSystem: Send + Sync {
    fn name(&self) -> &'static str;
    fn signs(&self) -> &'static [Sign];
    fn contains(&self, sign: Sign) -> bool {
        self.signs().contains(&sign)
    }
    /// Whether `a` and `b` signing the *same* formula closes a branch.
    /// Symmetric by convention: callers may pass either order.
    fn contradictory(&self, a: Sign, b: Sign) -> bool;

    /// The truth values that satisfy `sign` — used by model extraction to
    /// turn a branch's signed atoms into a valuation.
    fn truth_conditions(&self, sign: Sign) -> &'static [TruthValue];

    /// Given the signs already asserted for some formula on a branch and a
    /// new sign about to join them, return the pair of signs that jointly
    /// close the branch on that formula, if any. The default is the plain
    /// pairwise rule (`contradictory` against `new`); a sign system whose
    /// closure condition depends on the whole asserted set — FDE's "all four
    /// signs present" rule — overrides this instead of `contradictory`.
    fn closing_pair(&self, asserted: &HashSet<Sign>, new: Sign) -> Option<(Sign, Sign)> {
        asserted
            .iter()
            .find(|&&existing| self.contradictory(existing, new))
            .map(|&existing| (existing, new))
    }
}

/// T/F only. Two signs on one formula close a branch exactly when one is
/// `T` and the other `F`.
pub struct ClassicalSignSystem;

impl SignSystem for ClassicalSignSystem {
    fn name(&self) -> &'static str {
        "classical"
    }

    fn signs(&self) -> &'static [Sign] {
        &[Sign::T, Sign::F]
    }

    fn contradictory(&self, a: Sign, b: Sign) -> bool {
        matches!((a, b), (Sign::T, Sign::F) | (Sign::F, Sign::T))
    }

    fn truth_conditions(&self, sign: Sign) -> &'static [TruthValue] {
        match sign {
            Sign::T => &[TruthValue::True],
            Sign::F => &[TruthValue::False],
            _ => unreachable!("classical sign system only produces T/F"),
        }
    }
}

/// T/F/U. `U` never contradicts `T` or `F`: undefined is a genuine third
/// value, not a hedge between the other two.
pub struct Wk3SignSystem;

impl SignSystem for Wk3SignSystem {
    fn name(&self) -> &'static str {
        "wk3"
    }

    fn signs(&self) -> &'static [Sign] {
        &[Sign::T, Sign::F, Sign::U]
    }

    fn contradictory(&self, a: Sign, b: Sign) -> bool {
        matches!((a, b), (Sign::T, Sign::F) | (Sign::F, Sign::T))
    }

    fn truth_conditions(&self, sign: Sign) -> &'static [TruthValue] {
        match sign {
            Sign::T => &[TruthValue::True],
            Sign::F => &[TruthValue::False],
            Sign::U => &[TruthValue::Undefined],
            _ => unreachable!("wk3 sign system only produces T/F/U"),
        }
    }
}

/// T/F/M/N (Ferguson's epistemic signs). Only `T`/`F` contradict; `M`
/// ("may be true") and `N` ("not established") are compatible with anything
/// short of the definite opposite sign.
pub struct WkrqSignSystem;

impl SignSystem for WkrqSignSystem {
    fn name(&self) -> &'static str {
        "wkrq"
    }

    fn signs(&self) -> &'static [Sign] {
        &[Sign::T, Sign::F, Sign::M, Sign::N]
    }

    fn contradictory(&self, a: Sign, b: Sign) -> bool {
        matches!((a, b), (Sign::T, Sign::F) | (Sign::F, Sign::T))
    }

    fn truth_conditions(&self, sign: Sign) -> &'static [TruthValue] {
        match sign {
            Sign::T => &[TruthValue::True],
            Sign::F => &[TruthValue::False],
            // M ("may be true") and N ("not established") are epistemic
            // hedges over weak Kleene's three values, not FDE's four: both
            // admit the gap value, which is exactly why asserting M and N on
            // the same formula doesn't close a branch — they jointly pin the
            // formula to `Undefined` rather than to disjoint truth values.
            Sign::M => &[TruthValue::True, TruthValue::Undefined],
            Sign::N => &[TruthValue::False, TruthValue::Undefined],
            _ => unreachable!("wkrq sign system only produces T/F/M/N"),
        }
    }
}

/// T/F/B/N. `T` and `F` overlap on `Both`, so plain `T`/`F` never close a
/// branch by themselves — a formula is only over-determined once all four
/// signs (`T`, `F`, `B`, `N`) are asserted for it, which is FDE's actual
/// paraconsistency/paracompleteness boundary (see `DESIGN.md`).
pub struct FdeSignSystem;

impl SignSystem for FdeSignSystem {
    fn name(&self) -> &'static str {
        "fde"
    }

    fn signs(&self) -> &'static [Sign] {
        &[Sign::T, Sign::F, Sign::B, Sign::N]
    }

    fn contradictory(&self, _a: Sign, _b: Sign) -> bool {
        false
    }

    fn truth_conditions(&self, sign: Sign) -> &'static [TruthValue] {
        match sign {
            Sign::T => &[TruthValue::True, TruthValue::Both],
            Sign::F => &[TruthValue::False, TruthValue::Both],
            Sign::B => &[TruthValue::Both],
            Sign::N => &[TruthValue::Neither],
            _ => unreachable!("fde sign system only produces T/F/B/N"),
        }
    }

    fn closing_pair(&self, asserted: &HashSet<Sign>, new: Sign) -> Option<(Sign, Sign)> {
        let mut all = asserted.clone();
        all.insert(new);
        let has_all_four = [Sign::T, Sign::F, Sign::B, Sign::N].iter().all(|s| all.contains(s));
        has_all_four.then_some((Sign::T, Sign::F))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classical_only_t_f_contradict() {
        let s = ClassicalSignSystem;
        assert!(s.contradictory(Sign::T, Sign::F));
        assert!(s.contradictory(Sign::F, Sign::T));
    }

    #[test]
    fn wk3_undefined_is_not_contradictory_with_anything() {
        let s = Wk3SignSystem;
        assert!(!s.contradictory(Sign::U, Sign::T));
        assert!(!s.contradictory(Sign::U, Sign::F));
        assert!(!s.contradictory(Sign::U, Sign::U));
    }

    #[test]
    fn fde_plain_pairs_never_close_a_branch() {
        let s = FdeSignSystem;
        assert!(!s.contradictory(Sign::B, Sign::N));
        assert!(!s.contradictory(Sign::T, Sign::B));
        assert!(!s.contradictory(Sign::T, Sign::F));
    }

    #[test]
    fn fde_closes_only_once_all_four_signs_are_present() {
        let s = FdeSignSystem;
        let mut asserted = HashSet::new();
        assert_eq!(s.closing_pair(&asserted, Sign::T), None);
        asserted.insert(Sign::T);
        assert_eq!(s.closing_pair(&asserted, Sign::F), None);
        asserted.insert(Sign::F);
        assert_eq!(s.closing_pair(&asserted, Sign::B), None);
        asserted.insert(Sign::B);
        assert_eq!(s.closing_pair(&asserted, Sign::N), Some((Sign::T, Sign::F)));
    }

    #[test]
    fn wkrq_m_and_n_are_not_definite_opposites() {
        let s = WkrqSignSystem;
        assert!(!s.contradictory(Sign::M, Sign::N));
        assert!(!s.contradictory(Sign::M, Sign::F));
    }
}
