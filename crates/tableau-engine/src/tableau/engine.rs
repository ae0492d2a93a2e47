//! Tableau construction: α/β rule application, restricted-quantifier γ/δ
//! expansion, closure detection, subsumption elimination, and model
//! extraction.

use crate::error::TableauError;
use crate::formula::{Formula, FormulaRef};
use crate::logic::LogicPlugin;
use crate::sign::{Sign, SignedFormula};
use crate::tableau::branch::Branch;
use crate::tableau::model::{self, Model};
use crate::tableau::trace::Step;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// What drives a tableau's construction: a step budget on restricted
/// quantifiers (the only source of non-termination, spec §4.5), and
/// whether to keep a trace or stop at the first model.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub max_gamma_applications: usize,
    pub trace: bool,
    pub first_model_only: bool,
    pub max_models: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            max_gamma_applications: 50,
            trace: false,
            first_model_only: false,
            max_models: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tableau {
    pub branches: Vec<Branch>,
}

impl Tableau {
    pub fn is_closed(&self) -> bool {
        self.branches.iter().all(|b| b.closed)
    }
}

pub struct SolveResult {
    pub satisfiable: bool,
    pub models: Vec<Model>,
    pub tableau: Tableau,
    pub steps: Vec<Step>,
}

/// A candidate (branch, path index, rule) triple, ordered by the priority
/// key spec §4.5/§5 mandates: rule kind ordinal first (α < β < δ < γ),
/// then the rule's own priority, then insertion order (path index), then
/// registration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Priority(u8, u8, usize, usize);

enum Action<'a> {
    Declarative { rule: &'a crate::rules::Rule, branches: Vec<Vec<SignedFormula>> },
    Delta { branches: Vec<Vec<SignedFormula>>, name: &'static str },
    Gamma { branches: Vec<Vec<SignedFormula>>, name: &'static str, constant: Arc<str> },
}

pub fn solve(
    initial: Vec<SignedFormula>,
    plugin: &LogicPlugin,
    options: &SolveOptions,
) -> Result<SolveResult, TableauError> {
    let sign_system = plugin.sign_system.as_ref();
    let mut next_branch_id = 1usize;
    let root = Branch::root(0, initial.clone(), sign_system);

    let mut steps = Vec::new();
    if options.trace {
        steps.push(Step::Initial { branch: 0, formulas: initial });
    }
    if root.closed && options.trace {
        steps.push(Step::Closure {
            branch: 0,
            witness: root.closure_witness.clone().expect("closed branch has a witness"),
        });
    }

    let mut queue: VecDeque<Branch> = VecDeque::new();
    queue.push_back(root);
    let mut finished: Vec<Branch> = Vec::new();
    // Branches abandoned because `max_gamma_applications` was exceeded
    // before they saturated. Never a source of models — an unsaturated
    // open branch hasn't earned the "this is a countermodel" verdict yet.
    let mut capped: Vec<Branch> = Vec::new();
    let mut incomplete = false;

    while let Some(mut branch) = queue.pop_front() {
        if branch.closed {
            finished.push(branch);
            continue;
        }

        loop {
            let Some((priority, action)) = select_action(&branch, plugin) else {
                finished.push(branch);
                break;
            };
            let index = priority.2;
            // γ candidates are deliberately never marked processed: a
            // universal/existential formula under T/F stays eligible as
            // long as the branch's domain still has an uninstantiated
            // constant (tracked via `gamma_applied` instead).
            if !matches!(action, Action::Gamma { .. }) {
                branch.mark_processed(index);
            }

            match action {
                Action::Declarative { rule, branches } => {
                    if branches.len() == 1 {
                        let conclusions = branches.into_iter().next().unwrap();
                        if options.trace {
                            steps.push(Step::RuleApplication {
                                rule: rule.name,
                                applied_to: branch.path[index].clone(),
                                branch: branch.id,
                                new_branches: vec![branch.id],
                                new_formulas: vec![conclusions.clone()],
                            });
                        }
                        for sf in conclusions {
                            branch.add_formula(sf, sign_system);
                            if branch.closed {
                                break;
                            }
                        }
                        if branch.closed {
                            if options.trace {
                                steps.push(Step::Closure {
                                    branch: branch.id,
                                    witness: branch
                                        .closure_witness
                                        .clone()
                                        .expect("closed branch has a witness"),
                                });
                            }
                            finished.push(branch);
                            break;
                        }
                        continue;
                    }
                    let children = fork_children(&branch, branches, &mut next_branch_id, sign_system);
                    record_fork(&mut steps, options, rule.name, &branch, index, &children);
                    push_children(&mut queue, children);
                    break;
                }
                Action::Delta { branches, name } => {
                    let conclusions = branches.into_iter().next().expect("delta rule has one branch");
                    if options.trace {
                        steps.push(Step::RuleApplication {
                            rule: name,
                            applied_to: branch.path[index].clone(),
                            branch: branch.id,
                            new_branches: vec![branch.id],
                            new_formulas: vec![conclusions.clone()],
                        });
                    }
                    for sf in conclusions {
                        branch.add_formula(sf, sign_system);
                        if branch.closed {
                            break;
                        }
                    }
                    if branch.closed {
                        finished.push(branch);
                        break;
                    }
                    continue;
                }
                Action::Gamma { branches, name, constant } => {
                    branch.gamma_applied.insert((index, constant));
                    branch.gamma_application_count += 1;
                    if branch.gamma_application_count > options.max_gamma_applications {
                        incomplete = true;
                        capped.push(branch);
                        break;
                    }
                    let children = fork_children(&branch, branches, &mut next_branch_id, sign_system);
                    record_fork(&mut steps, options, name, &branch, index, &children);
                    push_children(&mut queue, children);
                    break;
                }
            }
        }
    }

    let connectives = &plugin.connectives;
    let kept = eliminate_subsumed(finished, connectives, options, &mut steps);

    let mut known_atoms: HashSet<Arc<str>> = HashSet::new();
    for branch in &kept {
        for sf in &branch.path {
            for a in sf.formula.atoms() {
                known_atoms.insert(a);
            }
        }
    }

    let mut models = Vec::new();
    for branch in &kept {
        if branch.closed {
            continue;
        }
        if let Some(m) = model::extract(branch, sign_system, plugin.truth_system.as_ref(), &known_atoms) {
            models.push(m);
            if options.first_model_only {
                break;
            }
            if let Some(max) = options.max_models {
                if models.len() >= max {
                    break;
                }
            }
        }
    }

    let satisfiable = !models.is_empty();
    if options.trace {
        steps.push(Step::Completion { satisfiable });
    }

    let mut all_branches = kept;
    all_branches.extend(capped);
    let tableau = Tableau { branches: all_branches };

    if incomplete && !satisfiable {
        return Err(TableauError::IncompleteSaturation {
            reason: format!(
                "exceeded max_gamma_applications ({}) before every branch saturated",
                options.max_gamma_applications
            ),
            partial: Box::new(tableau),
        });
    }

    Ok(SolveResult { satisfiable, models, tableau, steps })
}

fn fork_children(
    branch: &Branch,
    branches: Vec<Vec<SignedFormula>>,
    next_branch_id: &mut usize,
    sign_system: &dyn crate::sign::SignSystem,
) -> Vec<Branch> {
    branches
        .into_iter()
        .map(|additions| {
            let id = *next_branch_id;
            *next_branch_id += 1;
            branch.fork(id, additions, sign_system)
        })
        .collect()
}

fn record_fork(
    steps: &mut Vec<Step>,
    options: &SolveOptions,
    rule_name: &'static str,
    branch: &Branch,
    index: usize,
    children: &[Branch],
) {
    if !options.trace {
        return;
    }
    steps.push(Step::RuleApplication {
        rule: rule_name,
        applied_to: branch.path[index].clone(),
        branch: branch.id,
        new_branches: children.iter().map(|c| c.id).collect(),
        new_formulas: children
            .iter()
            .map(|c| c.path[branch.path.len()..].to_vec())
            .collect(),
    });
    for child in children {
        if child.closed {
            steps.push(Step::Closure {
                branch: child.id,
                witness: child.closure_witness.clone().expect("closed branch has a witness"),
            });
        }
    }
}

fn push_children(queue: &mut VecDeque<Branch>, children: Vec<Branch>) {
    for child in children {
        queue.push_back(child);
    }
}

/// Pick the single highest-priority (branch-index, rule) pair per spec
/// §4.5 step 2. `branch` is scanned front-to-back so path index doubles as
/// insertion-order tiebreaker.
fn select_action<'a>(branch: &Branch, plugin: &'a LogicPlugin) -> Option<(Priority, Action<'a>)> {
    let mut best: Option<(Priority, Action<'a>)> = None;

    for (index, sf) in branch.path.iter().enumerate() {
        if !branch.is_unprocessed(index) {
            continue;
        }
        for (rule_index, rule) in plugin.rules.iter().enumerate() {
            if let Some(branches) = rule.apply(sf, &plugin.connectives) {
                let priority = Priority(rule.kind_ordinal(), rule.priority, index, rule_index);
                if best.as_ref().map(|(p, _)| priority < *p).unwrap_or(true) {
                    best = Some((priority, Action::Declarative { rule, branches }));
                }
            }
        }

        if let Some((priority, action)) = quantifier_action(branch, index, sf) {
            if best.as_ref().map(|(p, _)| priority < *p).unwrap_or(true) {
                best = Some((priority, action));
            }
        }
    }

    best
}

const DELTA_ORDINAL: u8 = 2;
const GAMMA_ORDINAL: u8 = 3;

fn quantifier_action<'a>(branch: &Branch, index: usize, sf: &SignedFormula) -> Option<(Priority, Action<'a>)> {
    match (sf.sign, sf.formula.as_ref()) {
        (Sign::T, Formula::RestrictedExistential { var, restriction, matrix }) => {
            // δ: a witness exists; introduce exactly one fresh constant.
            // Fires at most once per formula — the outer loop marks `index`
            // processed for every non-γ action, including this one.
            let mut branch = branch.clone();
            let c = branch.fresh_constant();
            let r = instantiate(var, restriction, &c);
            let m = instantiate(var, matrix, &c);
            Some((
                Priority(DELTA_ORDINAL, 0, index, 0),
                Action::Delta {
                    branches: vec![vec![SignedFormula::new(Sign::T, r), SignedFormula::new(Sign::T, m)]],
                    name: "t-restricted-existential",
                },
            ))
        }
        (Sign::F, Formula::RestrictedUniversal { var, restriction, matrix }) => {
            // δ (counterexample form): same one-shot treatment as above.
            let mut branch = branch.clone();
            let c = branch.fresh_constant();
            let r = instantiate(var, restriction, &c);
            let m = instantiate(var, matrix, &c);
            Some((
                Priority(DELTA_ORDINAL, 0, index, 0),
                Action::Delta {
                    branches: vec![vec![SignedFormula::new(Sign::T, r), SignedFormula::new(Sign::F, m)]],
                    name: "f-restricted-universal",
                },
            ))
        }
        (Sign::T, Formula::RestrictedUniversal { var, restriction, matrix }) => {
            gamma_over_domain(branch, index, var, restriction, matrix, true, "t-restricted-universal")
        }
        (Sign::F, Formula::RestrictedExistential { var, restriction, matrix }) => {
            gamma_over_domain(branch, index, var, restriction, matrix, false, "f-restricted-existential")
        }
        _ => None,
    }
}

fn gamma_over_domain<'a>(
    branch: &Branch,
    index: usize,
    var: &Arc<str>,
    restriction: &FormulaRef,
    matrix: &FormulaRef,
    universal: bool,
    name: &'static str,
) -> Option<(Priority, Action<'a>)> {
    let candidate = branch
        .constants
        .iter()
        .find(|c| !branch.gamma_applied.contains(&(index, (*c).clone())))?
        .clone();
    let r = instantiate(var, restriction, &candidate);
    let m = instantiate(var, matrix, &candidate);
    let branches = if universal {
        vec![vec![SignedFormula::new(Sign::F, r)], vec![SignedFormula::new(Sign::T, m)]]
    } else {
        vec![vec![SignedFormula::new(Sign::F, r)], vec![SignedFormula::new(Sign::F, m)]]
    };
    Some((Priority(GAMMA_ORDINAL, 0, index, 0), Action::Gamma { branches, name, constant: candidate }))
}

fn instantiate(var: &Arc<str>, formula: &FormulaRef, constant: &Arc<str>) -> FormulaRef {
    formula.instantiate(var, constant)
}

/// Discard any branch whose signature is a subset of another open branch's
/// (spec §4.5 step 4 / §8 invariant 6). `O(n^2)` in the number of surviving
/// branches, which in practice is small relative to the number of rule
/// applications that produced them.
fn eliminate_subsumed(
    branches: Vec<Branch>,
    connectives: &[crate::connective::ConnectiveSpec],
    options: &SolveOptions,
    steps: &mut Vec<Step>,
) -> Vec<Branch> {
    let signatures: Vec<(HashSet<String>, bool)> = branches
        .iter()
        .map(|b| (b.signature(connectives).into_iter().collect(), b.closed))
        .collect();

    let mut keep = vec![true; branches.len()];
    let mut subsumed_by = vec![None; branches.len()];
    for i in 0..branches.len() {
        if branches[i].closed || !keep[i] {
            continue;
        }
        for j in 0..branches.len() {
            if i == j || branches[j].closed || !keep[j] {
                continue;
            }
            let (sig_i, _) = &signatures[i];
            let (sig_j, _) = &signatures[j];
            if sig_i.len() < sig_j.len() && sig_i.is_subset(sig_j) {
                keep[j] = false;
                subsumed_by[j] = Some(branches[i].id);
            }
        }
    }

    if options.trace {
        for (branch, by) in branches.iter().zip(&subsumed_by) {
            if let Some(by) = by {
                steps.push(Step::Subsumed { branch: branch.id, by: *by });
            }
        }
    }

    branches.into_iter().zip(keep).filter(|(_, k)| *k).map(|(b, _)| b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::LogicRegistry;
    use crate::parser;

    fn plugin(name: &str) -> std::sync::Arc<LogicPlugin> {
        LogicRegistry::global().get(name).unwrap()
    }

    fn solve_text(logic: &str, text: &str, sign: Sign) -> SolveResult {
        let plugin = plugin(logic);
        let formula = parser::parse(text, &plugin.connectives).unwrap();
        solve(vec![SignedFormula::new(sign, formula)], &plugin, &SolveOptions::default()).unwrap()
    }

    #[test]
    fn tautology_is_unsat_under_f_sign() {
        let result = solve_text("classical", "p | ~p", Sign::F);
        assert!(!result.satisfiable);
    }

    #[test]
    fn tautology_is_sat_under_t_sign() {
        let result = solve_text("classical", "p | ~p", Sign::T);
        assert!(result.satisfiable);
    }

    #[test]
    fn contradiction_is_unsat() {
        let result = solve_text("classical", "p & ~p", Sign::T);
        assert!(!result.satisfiable);
    }

    #[test]
    fn modus_ponens_entailment_closes() {
        let plugin = plugin("classical");
        let p = parser::parse("p", &plugin.connectives).unwrap();
        let p_implies_q = parser::parse("p -> q", &plugin.connectives).unwrap();
        let q = parser::parse("q", &plugin.connectives).unwrap();
        let initial = vec![
            SignedFormula::new(Sign::T, p),
            SignedFormula::new(Sign::T, p_implies_q),
            SignedFormula::new(Sign::F, q),
        ];
        let result = solve(initial, &plugin, &SolveOptions::default()).unwrap();
        assert!(!result.satisfiable);
    }

    #[test]
    fn wk3_excluded_middle_is_sat_under_u_sign() {
        let result = solve_text("wk3", "p | ~p", Sign::U);
        assert!(result.satisfiable);
        let model = &result.models[0];
        assert_eq!(model.assignments["p"], crate::truth::TruthValue::Undefined);
    }

    #[test]
    fn fde_contradiction_is_sat_under_b_sign_without_explosion() {
        let result = solve_text("fde", "p & ~p", Sign::B);
        assert!(result.satisfiable);

        // {p & ~p} |= q should NOT hold: the tableau for (p & ~p) & ~q,
        // signed T, must stay open.
        let plugin = plugin("fde");
        let entailment = parser::parse("(p & ~p) & ~q", &plugin.connectives).unwrap();
        let result = solve(
            vec![SignedFormula::new(Sign::T, entailment)],
            &plugin,
            &SolveOptions::default(),
        )
        .unwrap();
        assert!(result.satisfiable, "FDE must not explode from a glut");
    }

    #[test]
    fn wkrq_m_and_n_are_jointly_satisfiable() {
        let plugin = plugin("wkrq");
        let p1 = parser::parse("p", &plugin.connectives).unwrap();
        let p2 = parser::parse("p", &plugin.connectives).unwrap();
        let result = solve(
            vec![SignedFormula::new(Sign::M, p1), SignedFormula::new(Sign::N, p2)],
            &plugin,
            &SolveOptions::default(),
        )
        .unwrap();
        assert!(result.satisfiable);
    }

    #[test]
    fn ferguson_syllogism_is_unsat() {
        let plugin = plugin("wkrq");
        let universal = parser::parse("[∀X Bird(X)]Flies(X)", &plugin.connectives).unwrap();
        let bird_tweety = parser::parse("Bird(tweety)", &plugin.connectives).unwrap();
        let flies_tweety = parser::parse("Flies(tweety)", &plugin.connectives).unwrap();
        let initial = vec![
            SignedFormula::new(Sign::T, universal),
            SignedFormula::new(Sign::T, bird_tweety),
            SignedFormula::new(Sign::F, flies_tweety),
        ];
        let result = solve(initial, &plugin, &SolveOptions::default()).unwrap();
        assert!(!result.satisfiable);
    }
}
