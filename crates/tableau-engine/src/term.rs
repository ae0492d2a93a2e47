//! First-order terms used by predicates and restricted quantifiers.

use std::sync::Arc;

/// A first-order term.
///
/// Variables are upper-initial by convention (`X`, `Y`); constants and
/// function names are lower-initial (`tweety`, `f`). The parser enforces
/// this convention; [`Term`] itself does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Term {
    Constant(Arc<str>),
    Variable(Arc<str>),
    FunctionApplication(Arc<str>, Vec<Term>),
}

impl Term {
    pub fn constant(name: impl Into<Arc<str>>) -> Self {
        Term::Constant(name.into())
    }

    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Term::Variable(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Constant(n) | Term::Variable(n) => n,
            Term::FunctionApplication(n, _) => n,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Replace every occurrence of `var` with `replacement`.
    pub fn substitute(&self, var: &str, replacement: &Term) -> Term {
        match self {
            Term::Variable(name) if name.as_ref() == var => replacement.clone(),
            Term::Constant(_) | Term::Variable(_) => self.clone(),
            Term::FunctionApplication(name, args) => Term::FunctionApplication(
                name.clone(),
                args.iter().map(|a| a.substitute(var, replacement)).collect(),
            ),
        }
    }

    pub fn display_string(&self) -> String {
        match self {
            Term::Constant(n) | Term::Variable(n) => n.to_string(),
            Term::FunctionApplication(n, args) => {
                let inner: Vec<String> = args.iter().map(Term::display_string).collect();
                format!("{}({})", n, inner.join(","))
            }
        }
    }
}
