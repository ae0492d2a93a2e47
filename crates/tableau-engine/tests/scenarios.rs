//! End-to-end tableau scenarios driven only through the public facade
//! (`tableau_engine::{parse, solve, satisfiable, valid, entails}`), covering
//! spec §8's concrete examples per logic.

use tableau_engine::logic::LogicRegistry;
use tableau_engine::sign::{Sign, SignedFormula};
use tableau_engine::tableau::SolveOptions;
use tableau_engine::truth::TruthValue;
use tableau_engine::{entails, parse, satisfiable, valid};

fn plugin(name: &str) -> std::sync::Arc<tableau_engine::LogicPlugin> {
    LogicRegistry::global().get(name).unwrap()
}

#[test]
fn classical_tautology_is_valid() {
    let logic = plugin("classical");
    let f = parse("p | ~p", &logic).unwrap();
    assert!(valid(f, &logic).unwrap());
}

#[test]
fn classical_tautology_is_satisfiable_under_t() {
    let logic = plugin("classical");
    let f = parse("p | ~p", &logic).unwrap();
    assert!(satisfiable(Sign::T, f, &logic).unwrap());
}

#[test]
fn classical_contradiction_is_unsatisfiable() {
    let logic = plugin("classical");
    let f = parse("p & ~p", &logic).unwrap();
    assert!(!satisfiable(Sign::T, f, &logic).unwrap());
}

#[test]
fn classical_modus_ponens_entails() {
    let logic = plugin("classical");
    let p = parse("p", &logic).unwrap();
    let p_implies_q = parse("p -> q", &logic).unwrap();
    let q = parse("q", &logic).unwrap();
    assert!(entails(vec![p, p_implies_q], q, &logic).unwrap());
}

#[test]
fn wk3_excluded_middle_is_satisfiable_under_u_with_e_model() {
    let logic = plugin("wk3");
    let f = parse("p | ~p", &logic).unwrap();
    let result = tableau_engine::tableau::solve(
        vec![SignedFormula::new(Sign::U, f)],
        &logic,
        &SolveOptions::default(),
    )
    .unwrap();
    assert!(result.satisfiable);
    assert!(result
        .models
        .iter()
        .any(|m| m.assignments.get("p") == Some(&TruthValue::Undefined)));
}

#[test]
fn fde_glut_is_satisfiable_without_explosion() {
    let logic = plugin("fde");
    let glut = parse("p & ~p", &logic).unwrap();
    let result = tableau_engine::tableau::solve(
        vec![SignedFormula::new(Sign::B, glut)],
        &logic,
        &SolveOptions::default(),
    )
    .unwrap();
    assert!(result.satisfiable);

    let p = parse("p & ~p", &logic).unwrap();
    let q = parse("q", &logic).unwrap();
    assert!(!entails(vec![p], q, &logic).unwrap(), "a glut must not entail an arbitrary conclusion");
}

#[test]
fn wkrq_m_and_n_signs_on_the_same_atom_are_jointly_satisfiable() {
    let logic = plugin("wkrq");
    let p1 = parse("p", &logic).unwrap();
    let p2 = parse("p", &logic).unwrap();
    let result = tableau_engine::tableau::solve(
        vec![SignedFormula::new(Sign::M, p1), SignedFormula::new(Sign::N, p2)],
        &logic,
        &SolveOptions::default(),
    )
    .unwrap();
    assert!(result.satisfiable);
}

#[test]
fn ferguson_syllogism_entails_via_restricted_quantifiers() {
    let logic = plugin("wkrq");
    let universal = parse("[∀X Bird(X)]Flies(X)", &logic).unwrap();
    let bird_tweety = parse("Bird(tweety)", &logic).unwrap();
    let flies_tweety = parse("Flies(tweety)", &logic).unwrap();
    assert!(entails(vec![universal, bird_tweety], flies_tweety, &logic).unwrap());
}

#[test]
fn parse_then_print_then_reparse_is_structurally_equal() {
    let logic = plugin("classical");
    for text in ["p", "~p", "(p & q) -> ~r", "p | q & ~r -> s"] {
        let f = parse(text, &logic).unwrap();
        let printed = f.display(&logic.connectives);
        let reparsed = parse(&printed, &logic).unwrap();
        assert_eq!(f, reparsed, "round-trip failed for {text:?}");
    }
}

#[test]
fn connective_aliases_parse_to_equal_ast_and_solve_identically() {
    let logic = plugin("classical");
    let ampersand = parse("p & q", &logic).unwrap();
    let apostrophe = parse("p ' q", &logic).unwrap();
    assert_eq!(ampersand, apostrophe, "`&` and `'` must parse to the same AST");
    assert!(satisfiable(Sign::T, ampersand, &logic).unwrap());
    assert!(satisfiable(Sign::T, apostrophe, &logic).unwrap());
}

#[test]
fn unknown_logic_name_is_reported() {
    let err = LogicRegistry::global().get("intuitionistic").unwrap_err();
    assert!(matches!(err, tableau_engine::TableauError::UnknownLogic(_)));
}

#[test]
fn model_faithfulness_holds_for_every_initial_signed_formula() {
    let logic = plugin("classical");
    let p = parse("p", &logic).unwrap();
    let q = parse("q", &logic).unwrap();
    let initial = vec![SignedFormula::new(Sign::T, p.clone()), SignedFormula::new(Sign::F, q.clone())];
    let result = tableau_engine::tableau::solve(initial.clone(), &logic, &SolveOptions::default()).unwrap();
    assert!(result.satisfiable);
    for model in &result.models {
        for sf in &initial {
            let allowed = logic.sign_system.truth_conditions(sf.sign);
            let value = match sf.formula.as_ref() {
                tableau_engine::Formula::Atom(name) => model.assignments[name.as_ref()],
                _ => continue,
            };
            assert!(allowed.contains(&value));
        }
    }
}
