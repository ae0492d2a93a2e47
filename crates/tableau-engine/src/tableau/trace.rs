//! Construction trace: one record per initial state, rule application,
//! closure event, and final verdict. Optional — the engine only builds this
//! when the caller asks for steps, since cloning formulas into trace
//! records is not free on large searches.

use crate::sign::SignedFormula;

#[derive(Debug, Clone, serde::Serialize)]
pub enum Step {
    Initial { branch: usize, formulas: Vec<SignedFormula> },
    RuleApplication {
        rule: &'static str,
        applied_to: SignedFormula,
        branch: usize,
        new_branches: Vec<usize>,
        new_formulas: Vec<Vec<SignedFormula>>,
    },
    Closure { branch: usize, witness: (SignedFormula, SignedFormula) },
    Subsumed { branch: usize, by: usize },
    Completion { satisfiable: bool },
}
