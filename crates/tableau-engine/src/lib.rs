//! Pluggable semantic-tableau reasoning engine.
//!
//! Decides satisfiability of signed formulas under classical, weak Kleene
//! (WK3), wKrQ, and FDE logics by building a refutation tree and either
//! closing every branch (unsatisfiable) or extracting a model from one
//! that survives (satisfiable). Logics are data, not code: adding one means
//! constructing a [`logic::LogicPlugin`] and registering it — the tableau
//! engine itself never special-cases a logic by name.

pub mod connective;
pub mod error;
pub mod formula;
pub mod logic;
pub mod parser;
pub mod rules;
pub mod sign;
pub mod tableau;
pub mod term;
pub mod truth;

pub use error::{Result, TableauError};
pub use formula::{Formula, FormulaRef};
pub use logic::{LogicPlugin, LogicRegistry};
pub use sign::{Sign, SignedFormula};
pub use tableau::{solve, Model, SolveOptions, SolveResult, Tableau};
pub use term::Term;

/// Parse `text` under `logic`'s connective table.
pub fn parse(text: &str, logic: &LogicPlugin) -> Result<FormulaRef> {
    parser::parse(text, &logic.connectives)
}

/// Decide satisfiability of a single signed formula under `logic`, using
/// default solve options (spec §4.3's convenience entry point).
pub fn satisfiable(sign: Sign, formula: FormulaRef, logic: &LogicPlugin) -> Result<bool> {
    let result = solve(vec![SignedFormula::new(sign, formula)], logic, &SolveOptions::default())?;
    Ok(result.satisfiable)
}

/// A formula is valid under `logic` iff its negation-in-sign (`F` for
/// classical/WK3/FDE's `T`-biased validity notion, i.e. "no counterexample
/// under `F`") has no model.
pub fn valid(formula: FormulaRef, logic: &LogicPlugin) -> Result<bool> {
    Ok(!satisfiable(Sign::F, formula, logic)?)
}

/// Premises entail `conclusion` iff asserting every premise `T` alongside
/// `conclusion` signed `F` has no model.
pub fn entails(premises: Vec<FormulaRef>, conclusion: FormulaRef, logic: &LogicPlugin) -> Result<bool> {
    let mut initial: Vec<SignedFormula> =
        premises.into_iter().map(|p| SignedFormula::new(Sign::T, p)).collect();
    initial.push(SignedFormula::new(Sign::F, conclusion));
    let result = solve(initial, logic, &SolveOptions::default())?;
    Ok(!result.satisfiable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classical() -> std::sync::Arc<LogicPlugin> {
        LogicRegistry::global().get("classical").unwrap()
    }

    #[test]
    fn valid_recognizes_a_tautology() {
        let plugin = classical();
        let formula = parse("p | ~p", &plugin).unwrap();
        assert!(valid(formula, &plugin).unwrap());
    }

    #[test]
    fn entails_recognizes_modus_ponens() {
        let plugin = classical();
        let p = parse("p", &plugin).unwrap();
        let p_implies_q = parse("p -> q", &plugin).unwrap();
        let q = parse("q", &plugin).unwrap();
        assert!(entails(vec![p, p_implies_q], q, &plugin).unwrap());
    }

    #[test]
    fn entails_rejects_affirming_the_consequent() {
        let plugin = classical();
        let q = parse("q", &plugin).unwrap();
        let p_implies_q = parse("p -> q", &plugin).unwrap();
        let p = parse("p", &plugin).unwrap();
        assert!(!entails(vec![q, p_implies_q], p, &plugin).unwrap());
    }
}
