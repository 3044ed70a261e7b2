//! Operation system for treelisp
//!
//! Operations are special forms: they receive their argument nodes
//! unevaluated and call back into the [`Evaluator`] for the nodes they need.

pub mod stdlib;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Evaluator, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Number of argument nodes an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many
    Exact(usize),
    /// This many or more
    AtLeast(usize),
}

impl Arity {
    /// Returns true if `count` argument nodes are acceptable
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// Fails with `InvalidArgument` if `count` is not acceptable
    pub fn check(&self, operation: &str, count: usize) -> Result<()> {
        if self.accepts(count) {
            return Ok(());
        }
        let (bound, n) = match *self {
            Arity::Exact(n) => ("exactly", n),
            Arity::AtLeast(n) => ("at least", n),
        };
        let noun = if n == 1 { "argument" } else { "arguments" };
        let expected = format!("{} {} {}", bound, n, noun);
        Err(Error::invalid_argument(
            operation,
            format!("expected {}, got {}", expected, count),
        ))
    }
}

/// Operation trait - every built-in implements this
pub trait Operation: Send + Sync {
    /// Canonical name
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Accepted number of argument nodes, checked before [`invoke`](Self::invoke)
    fn arity(&self) -> Arity;

    /// Run the operation on unevaluated argument nodes
    ///
    /// The evaluator checks [`arity`](Self::arity) before calling, but hosts may
    /// call this directly, so implementations that index `args` check it again.
    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator)
        -> Result<Value>;
}

/// Operation registry with alias table
///
/// Filled before it is handed to an [`Evaluator`]; read-only afterwards.
pub struct OperationRegistry {
    operations: HashMap<String, Arc<dyn Operation>>,
    aliases: HashMap<String, String>,
}

impl OperationRegistry {
    /// Create new registry with the built-in operations
    pub fn new() -> Self {
        let mut registry = OperationRegistry::empty();
        stdlib::register_all(&mut registry);

        tracing::debug!(
            operations = registry.count(),
            aliases = registry.aliases.len(),
            "operation registry ready"
        );

        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        OperationRegistry {
            operations: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register an operation under its canonical name
    pub fn register<T: Operation + 'static>(&mut self, operation: T) {
        let name = operation.name().to_string();
        self.operations.insert(name, Arc::new(operation));
    }

    /// Register an alternate name for a canonical operation name
    pub fn alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    /// Resolve a name to its canonical operation name, if either table knows it
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.operations.contains_key(name) {
            return Some(name);
        }
        self.aliases
            .get(name)
            .map(String::as_str)
            .filter(|canonical| self.operations.contains_key(*canonical))
    }

    /// Get operation by name, resolving aliases
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Operation>> {
        self.canonical_name(name)
            .and_then(|canonical| self.operations.get(canonical))
            .cloned()
            .ok_or_else(|| Error::UndefinedOperation {
                name: name.to_string(),
            })
    }

    /// Check if a name resolves directly or through an alias
    pub fn has(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// List canonical operation names
    pub fn list_operations(&self) -> Vec<String> {
        let mut names: Vec<_> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get operation count (aliases excluded)
    pub fn count(&self) -> usize {
        self.operations.len()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AnswerOperation;

    impl Operation for AnswerOperation {
        fn name(&self) -> &str {
            "answer"
        }

        fn description(&self) -> &str {
            "Always 42"
        }

        fn arity(&self) -> Arity {
            Arity::Exact(0)
        }

        fn invoke(&self, _args: &[Value], _env: &Arc<Environment>, _ev: &Evaluator) -> Result<Value> {
            Ok(Value::Number(42.0))
        }
    }

    #[test]
    fn test_registry_register_and_lookup() {
        let mut registry = OperationRegistry::empty();
        registry.register(AnswerOperation);

        assert!(registry.has("answer"));
        assert_eq!(registry.count(), 1);

        let op = registry.lookup("answer").unwrap();
        assert_eq!(op.name(), "answer");
        assert_eq!(op.description(), "Always 42");
    }

    #[test]
    fn test_alias_resolution() {
        let mut registry = OperationRegistry::empty();
        registry.register(AnswerOperation);
        registry.alias("ultimate", "answer");

        assert_eq!(registry.canonical_name("ultimate"), Some("answer"));
        assert_eq!(registry.lookup("ultimate").unwrap().name(), "answer");

        // Aliases are not listed as operations
        assert_eq!(registry.list_operations(), vec!["answer".to_string()]);
    }

    #[test]
    fn test_dangling_alias_is_undefined() {
        let mut registry = OperationRegistry::empty();
        registry.alias("ghost", "missing");

        assert!(!registry.has("ghost"));
        let err = registry.lookup("ghost").err().unwrap();
        assert_eq!(
            err,
            Error::UndefinedOperation {
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_builtins_registered() {
        let registry = OperationRegistry::new();
        assert_eq!(
            registry.list_operations(),
            vec!["+", "car", "cdr", "cons", "equal", "if", "lambda", "quote", "set"]
        );
        assert_eq!(registry.canonical_name("first"), Some("car"));
        assert_eq!(registry.canonical_name("'"), Some("quote"));
    }

    #[test]
    fn test_arity_check() {
        assert!(Arity::Exact(2).check("cons", 2).is_ok());
        assert!(Arity::AtLeast(0).check("+", 0).is_ok());
        assert!(Arity::AtLeast(1).accepts(3));

        let err = Arity::Exact(1).check("car", 2).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_argument("car", "expected exactly 1 argument, got 2")
        );

        let err = Arity::AtLeast(1).check("lambda", 0).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_argument("lambda", "expected at least 1 argument, got 0")
        );
    }
}
