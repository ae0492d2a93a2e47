//! Error taxonomy for the tableau engine (see spec §7).

use crate::tableau::Tableau;

/// Errors produced while lexing, parsing, constructing, or solving formulas.
///
/// `RuleInapplicable` never escapes a `solve` call — it is caught internally
/// by the rule-probing loop in [`crate::tableau::engine`] and only exists so
/// that code can use `?` instead of threading `Option`s by hand.
#[derive(Debug, thiserror::Error)]
pub enum TableauError {
    #[error("lex error at position {position}: unexpected character '{found}'")]
    Lex { position: usize, found: char },

    #[error("parse error at position {position}: {message}")]
    Parse { message: String, position: usize },

    #[error("malformed formula: connective '{connective}' expects {expected} operand(s), got {got}")]
    MalformedFormula {
        connective: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown logic: '{0}'")]
    UnknownLogic(String),

    #[error("sign '{sign}' is not a member of logic '{logic}'")]
    UnsupportedSign { sign: String, logic: String },

    #[error("rule '{0}' is not applicable to the given premises")]
    RuleInapplicable(String),

    #[error("incomplete saturation: {reason}")]
    IncompleteSaturation {
        reason: String,
        partial: Box<Tableau>,
    },
}

pub type Result<T> = std::result::Result<T, TableauError>;
