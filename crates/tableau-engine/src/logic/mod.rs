//! Logic plugins and the process-wide registry that looks them up by name.

use crate::connective::{Associativity, ConnectiveSpec, ConnectiveTable, Format};
use crate::error::TableauError;
use crate::rules::builtin;
use crate::rules::RuleSet;
use crate::sign::{ClassicalSignSystem, FdeSignSystem, SignSystem, Wk3SignSystem, WkrqSignSystem};
use crate::truth::{ClassicalTruthSystem, FdeTruthSystem, TruthValueSystem, Wk3TruthSystem, WkrqTruthSystem};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Binds a name to connectives + sign system + truth system + rule set —
/// everything the tableau engine needs to reason in one logic. Adding a new
/// logic means constructing one of these and registering it; no other
/// component changes (spec §4.7).
pub struct LogicPlugin {
    pub name: &'static str,
    pub connectives: ConnectiveTable,
    pub sign_system: Box<dyn SignSystem>,
    pub truth_system: Box<dyn TruthValueSystem>,
    pub rules: RuleSet,
}

fn default_connectives() -> ConnectiveTable {
    vec![
        ConnectiveSpec::new("~", "not", 1, 4, Associativity::None, Format::Prefix),
        ConnectiveSpec::new("&", "and", 2, 3, Associativity::Left, Format::Infix),
        ConnectiveSpec::new("'", "and", 2, 3, Associativity::Left, Format::Infix),
        ConnectiveSpec::new("|", "or", 2, 2, Associativity::Left, Format::Infix),
        ConnectiveSpec::new("->", "implies", 2, 1, Associativity::Right, Format::Infix),
    ]
}

fn classical_plugin() -> LogicPlugin {
    LogicPlugin {
        name: "classical",
        connectives: default_connectives(),
        sign_system: Box::new(ClassicalSignSystem),
        truth_system: Box::new(ClassicalTruthSystem),
        rules: builtin::classical::rules(),
    }
}

fn wk3_plugin() -> LogicPlugin {
    LogicPlugin {
        name: "wk3",
        connectives: default_connectives(),
        sign_system: Box::new(Wk3SignSystem),
        truth_system: Box::new(Wk3TruthSystem),
        rules: builtin::wk3::rules(),
    }
}

fn wkrq_plugin() -> LogicPlugin {
    LogicPlugin {
        name: "wkrq",
        connectives: default_connectives(),
        sign_system: Box::new(WkrqSignSystem),
        truth_system: Box::new(WkrqTruthSystem::new()),
        rules: builtin::wkrq::rules(),
    }
}

fn fde_plugin() -> LogicPlugin {
    LogicPlugin {
        name: "fde",
        connectives: default_connectives(),
        sign_system: Box::new(FdeSignSystem),
        truth_system: Box::new(FdeTruthSystem),
        rules: builtin::fde::rules(),
    }
}

/// Process-wide mapping from canonical names and aliases to plugins, lazily
/// initialized on first lookup. Registration is the only write path; reads
/// are lock-free in the sense that they only ever take a shared read lock
/// (spec §5: single-writer, consistent snapshot per read).
pub struct LogicRegistry {
    plugins: RwLock<HashMap<String, Arc<LogicPlugin>>>,
}

static REGISTRY: OnceLock<LogicRegistry> = OnceLock::new();

impl LogicRegistry {
    fn bootstrap() -> LogicRegistry {
        let registry = LogicRegistry { plugins: RwLock::new(HashMap::new()) };
        registry
            .register_with_aliases(classical_plugin(), &["cl", "classical-logic"])
            .expect("built-in classical registration cannot collide");
        registry
            .register_with_aliases(wk3_plugin(), &["weak-kleene", "weak_kleene"])
            .expect("built-in wk3 registration cannot collide");
        registry
            .register_with_aliases(wkrq_plugin(), &["wkrq-ferguson"])
            .expect("built-in wkrq registration cannot collide");
        registry
            .register_with_aliases(fde_plugin(), &["first-degree-entailment"])
            .expect("built-in fde registration cannot collide");
        registry
    }

    pub fn global() -> &'static LogicRegistry {
        REGISTRY.get_or_init(LogicRegistry::bootstrap)
    }

    /// Register `plugin` under its own name plus every alias in `aliases`.
    /// Fails without registering anything if any of those names already
    /// exist.
    pub fn register_with_aliases(
        &self,
        plugin: LogicPlugin,
        aliases: &[&str],
    ) -> Result<(), TableauError> {
        let mut names = vec![plugin.name.to_lowercase()];
        names.extend(aliases.iter().map(|a| a.to_lowercase()));

        let guard = self.plugins.read().expect("logic registry lock poisoned");
        if let Some(collision) = names.iter().find(|n| guard.contains_key(n.as_str())) {
            return Err(TableauError::UnknownLogic(format!(
                "cannot register '{}': name '{}' already registered",
                plugin.name, collision
            )));
        }
        drop(guard);

        let shared = Arc::new(plugin);
        let mut guard = self.plugins.write().expect("logic registry lock poisoned");
        for name in names {
            guard.insert(name, shared.clone());
        }
        Ok(())
    }

    pub fn get(&self, name_or_alias: &str) -> Result<Arc<LogicPlugin>, TableauError> {
        let key = name_or_alias.to_lowercase();
        self.plugins
            .read()
            .expect("logic registry lock poisoned")
            .get(&key)
            .cloned()
            .ok_or_else(|| TableauError::UnknownLogic(name_or_alias.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .plugins
            .read()
            .expect("logic registry lock poisoned")
            .values()
            .map(|p| p.name.to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_logics_resolve_by_name_and_alias() {
        let registry = LogicRegistry::global();
        assert_eq!(registry.get("classical").unwrap().name, "classical");
        assert_eq!(registry.get("CL").unwrap().name, "classical");
        assert_eq!(registry.get("weak-kleene").unwrap().name, "wk3");
    }

    #[test]
    fn unknown_logic_is_an_error() {
        let registry = LogicRegistry::global();
        assert!(matches!(registry.get("intuitionistic"), Err(TableauError::UnknownLogic(_))));
    }

    #[test]
    fn registering_a_colliding_name_fails_without_mutating() {
        let registry = LogicRegistry::global();
        let dup = LogicPlugin {
            name: "classical",
            connectives: default_connectives(),
            sign_system: Box::new(ClassicalSignSystem),
            truth_system: Box::new(ClassicalTruthSystem),
            rules: builtin::classical::rules(),
        };
        assert!(registry.register_with_aliases(dup, &[]).is_err());
    }
}
