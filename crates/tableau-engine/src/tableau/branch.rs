//! A single path through the tableau from root to (so far) leaf.

use crate::formula::FormulaRef;
use crate::sign::{Sign, SignSystem, SignedFormula};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One path from the tableau's root. Branches own their `path` and
/// `processed` sets outright — forking clones rather than shares, so a
/// child never mutates a sibling's state (spec §5 resource ownership).
#[derive(Debug, Clone)]
pub struct Branch {
    pub id: usize,
    /// Every signed formula asserted on this branch, in insertion order.
    pub path: Vec<SignedFormula>,
    /// Indices into `path` whose rule has already fired.
    pub processed: HashSet<usize>,
    pub closed: bool,
    pub closure_witness: Option<(SignedFormula, SignedFormula)>,
    /// Formula identity -> signs already asserted, for O(1) contradiction
    /// detection on insertion.
    sign_index: HashMap<FormulaRef, HashSet<Sign>>,
    /// The first-order domain: constants mentioned in the initial formulas
    /// plus any generated by existential/universal instantiation.
    pub constants: HashSet<Arc<str>>,
    fresh_counter: usize,
    /// `(path index of a universal/existential formula, constant)` pairs
    /// already instantiated, so γ-reapplication never repeats a combination
    /// as the domain grows.
    pub gamma_applied: HashSet<(usize, Arc<str>)>,
    pub gamma_application_count: usize,
}

impl Branch {
    pub fn root(id: usize, initial: Vec<SignedFormula>, sign_system: &dyn SignSystem) -> Branch {
        let mut branch = Branch {
            id,
            path: Vec::new(),
            processed: HashSet::new(),
            closed: false,
            closure_witness: None,
            sign_index: HashMap::new(),
            constants: HashSet::new(),
            fresh_counter: 0,
            gamma_applied: HashSet::new(),
            gamma_application_count: 0,
        };
        for sf in initial {
            branch.seed_constants(&sf.formula);
            branch.add_formula(sf, sign_system);
        }
        branch
    }

    fn seed_constants(&mut self, formula: &FormulaRef) {
        for name in formula.constants() {
            self.constants.insert(name);
        }
    }

    /// Fork this branch for one β/γ/δ conclusion branch: deep-copy state,
    /// append `additions`, and re-check closure. The parent is left
    /// untouched — callers discard it once all children are created (spec:
    /// "the original branch is replaced by its children").
    pub fn fork(&self, new_id: usize, additions: Vec<SignedFormula>, sign_system: &dyn SignSystem) -> Branch {
        let mut child = self.clone();
        child.id = new_id;
        for sf in additions {
            child.seed_constants(&sf.formula);
            child.add_formula(sf, sign_system);
            if child.closed {
                break;
            }
        }
        child
    }

    /// Insert `sf`, updating the sign index and closing the branch if it
    /// now contradicts an existing signed formula. No-op if already closed
    /// or if this exact signed formula is already present.
    pub fn add_formula(&mut self, sf: SignedFormula, sign_system: &dyn SignSystem) {
        if self.closed {
            return;
        }
        if self.path.contains(&sf) {
            return;
        }
        self.seed_constants(&sf.formula);
        let signs = self.sign_index.entry(sf.formula.clone()).or_default();
        if let Some((sign_a, sign_b)) = sign_system.closing_pair(signs, sf.sign) {
            let witness = |sign: Sign| {
                self.path
                    .iter()
                    .find(|p| p.formula == sf.formula && p.sign == sign)
                    .cloned()
                    .unwrap_or_else(|| SignedFormula::new(sign, sf.formula.clone()))
            };
            self.closure_witness = Some((witness(sign_a), witness(sign_b)));
            self.closed = true;
        }
        signs.insert(sf.sign);
        self.path.push(sf);
    }

    pub fn is_unprocessed(&self, index: usize) -> bool {
        !self.processed.contains(&index)
    }

    pub fn mark_processed(&mut self, index: usize) {
        self.processed.insert(index);
    }

    /// A constant guaranteed not to already appear in this branch's domain.
    pub fn fresh_constant(&mut self) -> Arc<str> {
        loop {
            self.fresh_counter += 1;
            let candidate: Arc<str> = Arc::from(format!("sk{}", self.fresh_counter));
            if !self.constants.contains(&candidate) {
                self.constants.insert(candidate.clone());
                return candidate;
            }
        }
    }

    /// A canonical signature for subsumption: the sorted set of distinct
    /// signed-formula display strings on this branch.
    pub fn signature(&self, connectives: &[crate::connective::ConnectiveSpec]) -> Vec<String> {
        let mut sigs: Vec<String> = self
            .path
            .iter()
            .map(|sf| format!("{}:{}", sf.sign, sf.formula.display(connectives)))
            .collect();
        sigs.sort();
        sigs.dedup();
        sigs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::sign::ClassicalSignSystem;

    #[test]
    fn contradictory_signs_close_the_branch() {
        let sign_system = ClassicalSignSystem;
        let p = Formula::atom("p");
        let branch = Branch::root(
            0,
            vec![SignedFormula::new(Sign::T, p.clone()), SignedFormula::new(Sign::F, p)],
            &sign_system,
        );
        assert!(branch.closed);
        assert!(branch.closure_witness.is_some());
    }

    #[test]
    fn fork_does_not_mutate_parent() {
        let sign_system = ClassicalSignSystem;
        let p = Formula::atom("p");
        let parent = Branch::root(0, vec![SignedFormula::new(Sign::T, p.clone())], &sign_system);
        let q = Formula::atom("q");
        let child = parent.fork(1, vec![SignedFormula::new(Sign::T, q)], &sign_system);
        assert_eq!(parent.path.len(), 1);
        assert_eq!(child.path.len(), 2);
    }
}
