//! Tableau construction: branches, the α/β/γ/δ engine, model extraction,
//! and optional construction traces.

pub mod branch;
pub mod engine;
pub mod model;
pub mod trace;

pub use branch::Branch;
pub use engine::{solve, SolveOptions, SolveResult, Tableau};
pub use model::Model;
pub use trace::Step;
