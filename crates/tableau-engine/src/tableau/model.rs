//! Model extraction from an open, saturated branch.

use crate::formula::Formula;
use crate::sign::SignSystem;
use crate::tableau::branch::Branch;
use crate::term::Term;
use crate::truth::{TruthValue, TruthValueSystem};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A satisfying valuation extracted from one open branch: an assignment of
/// truth values to every atom/predicate instance the branch constrains,
/// plus the first-order domain if any constants were involved.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Model {
    pub assignments: HashMap<String, TruthValue>,
    pub domain: Vec<Arc<str>>,
}

fn atomic_key(formula: &Formula) -> Option<String> {
    match formula {
        Formula::Atom(name) => Some(name.to_string()),
        Formula::Predicate(name, terms) => {
            let args: Vec<String> = terms.iter().map(Term::display_string).collect();
            Some(format!("{}({})", name, args.join(",")))
        }
        _ => None,
    }
}

/// Walk `branch`'s atomic signed formulas, intersecting truth-condition
/// sets per distinct atom/predicate instance. Returns `None` if some
/// instance's constraints have an empty intersection — which would mean
/// the branch should have been closed already (spec §4.5 model extraction
/// step 1).
pub fn extract(
    branch: &Branch,
    sign_system: &dyn SignSystem,
    truth_system: &dyn TruthValueSystem,
    known_atoms: &HashSet<Arc<str>>,
) -> Option<Model> {
    let mut constraints: HashMap<String, HashSet<TruthValue>> = HashMap::new();
    for sf in &branch.path {
        let Some(key) = atomic_key(&sf.formula) else { continue };
        let allowed: HashSet<TruthValue> = sign_system.truth_conditions(sf.sign).iter().copied().collect();
        let entry = constraints.entry(key).or_insert_with(|| allowed.clone());
        let narrowed: HashSet<TruthValue> = entry.intersection(&allowed).copied().collect();
        if narrowed.is_empty() {
            return None;
        }
        *entry = narrowed;
    }

    let default_value = if truth_system.name() == "wk3" {
        TruthValue::Undefined
    } else {
        *truth_system.designated().first().unwrap_or(&TruthValue::True)
    };

    let designated = truth_system.designated();
    let mut assignments: HashMap<String, TruthValue> = constraints
        .into_iter()
        .map(|(key, values)| {
            let chosen = designated
                .iter()
                .find(|v| values.contains(v))
                .copied()
                .or_else(|| truth_system.values().iter().find(|v| values.contains(v)).copied())
                .expect("checked non-empty above");
            (key, chosen)
        })
        .collect();

    for atom in known_atoms {
        assignments.entry(atom.to_string()).or_insert(default_value);
    }

    let mut domain: Vec<Arc<str>> = branch.constants.iter().cloned().collect();
    domain.sort();

    Some(Model { assignments, domain })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::sign::{ClassicalSignSystem, Sign, SignedFormula};
    use crate::truth::ClassicalTruthSystem;

    #[test]
    fn extracts_assignment_from_signed_atoms() {
        let sign_system = ClassicalSignSystem;
        let truth_system = ClassicalTruthSystem;
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let branch = Branch::root(
            0,
            vec![SignedFormula::new(Sign::T, p), SignedFormula::new(Sign::F, q)],
            &sign_system,
        );
        let known = HashSet::new();
        let model = extract(&branch, &sign_system, &truth_system, &known).unwrap();
        assert_eq!(model.assignments["p"], TruthValue::True);
        assert_eq!(model.assignments["q"], TruthValue::False);
    }

    #[test]
    fn unconstrained_atoms_get_a_default_value() {
        let sign_system = ClassicalSignSystem;
        let truth_system = ClassicalTruthSystem;
        let p = Formula::atom("p");
        let branch = Branch::root(0, vec![SignedFormula::new(Sign::T, p)], &sign_system);
        let mut known = HashSet::new();
        known.insert(Arc::from("r"));
        let model = extract(&branch, &sign_system, &truth_system, &known).unwrap();
        assert_eq!(model.assignments["r"], TruthValue::True);
    }

    #[test]
    fn multi_value_sign_constraints_pick_a_deterministic_value() {
        use crate::sign::WkrqSignSystem;
        use crate::truth::WkrqTruthSystem;
        let sign_system = WkrqSignSystem;
        let truth_system = WkrqTruthSystem::new();
        let p = Formula::atom("p");
        let branch = Branch::root(0, vec![SignedFormula::new(Sign::M, p)], &sign_system);
        let known = HashSet::new();
        for _ in 0..20 {
            let model = extract(&branch, &sign_system, &truth_system, &known).unwrap();
            assert_eq!(model.assignments["p"], TruthValue::True, "designated value must win over Undefined every run");
        }
    }

    #[test]
    fn fde_t_and_f_without_full_closure_resolve_to_both() {
        use crate::sign::FdeSignSystem;
        use crate::truth::FdeTruthSystem;
        let sign_system = FdeSignSystem;
        let truth_system = FdeTruthSystem;
        let p = Formula::atom("p");
        let branch = Branch::root(
            0,
            vec![SignedFormula::new(Sign::T, p.clone()), SignedFormula::new(Sign::F, p)],
            &sign_system,
        );
        assert!(!branch.closed);
        let known = HashSet::new();
        let model = extract(&branch, &sign_system, &truth_system, &known).unwrap();
        assert_eq!(model.assignments["p"], TruthValue::Both);
    }
}
