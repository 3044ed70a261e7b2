use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::operations::OperationRegistry;
use crate::runtime::{Environment, Value};

/// Evaluator settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Record every `set` as `(name, value)` in the execution trace
    pub trace_assignments: bool,
}

/// Recursive-descent evaluator for program nodes
///
/// Dispatch rules:
/// - `nil`, numbers, `t` and closures evaluate to themselves
/// - a symbol evaluates to its binding, or to itself when unbound
/// - `()` evaluates to `nil`
/// - `(head args...)` invokes a closure if `head` yields one, otherwise the
///   registry operation named by `head` with the unevaluated `args`
///
/// Dropping the evaluator clears its root scope, which releases closures
/// stored there by `set` along with the scopes they captured.
pub struct Evaluator {
    /// Root scope; `set` always writes here
    globals: Arc<Environment>,
    /// Built-in operations, shared and read-only
    registry: Arc<OperationRegistry>,
    config: EvaluatorConfig,
    /// Assignments recorded when `trace_assignments` is on
    execution_trace: Mutex<Vec<(String, Value)>>,
}

impl Evaluator {
    /// Creates a new evaluator with the built-in operations
    pub fn new() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }

    /// Creates a new evaluator with custom settings
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Evaluator {
            globals: Arc::new(Environment::new()),
            registry: Arc::new(OperationRegistry::new()),
            config,
            execution_trace: Mutex::new(Vec::new()),
        }
    }

    /// Creates a new evaluator with a custom operation registry
    pub fn with_registry(registry: OperationRegistry) -> Self {
        Evaluator {
            globals: Arc::new(Environment::new()),
            registry: Arc::new(registry),
            config: EvaluatorConfig::default(),
            execution_trace: Mutex::new(Vec::new()),
        }
    }

    /// Root scope, for hosts that pre-bind values
    pub fn globals(&self) -> &Arc<Environment> {
        &self.globals
    }

    /// Operation registry in use
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Active settings
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Get the execution trace (variable assignments)
    pub fn execution_trace(&self) -> Vec<(String, Value)> {
        self.execution_trace.lock().clone()
    }

    /// Clear the execution trace
    pub fn clear_execution_trace(&self) {
        self.execution_trace.lock().clear();
    }

    /// Evaluate a sequence of top-level nodes, returning the last value
    pub fn execute(&self, program: &[Value]) -> Result<Value> {
        let mut last_val = Value::Nil;

        for node in program {
            last_val = self.evaluate(node)?;
        }

        Ok(last_val)
    }

    /// Evaluate a node in the root scope
    pub fn evaluate(&self, node: &Value) -> Result<Value> {
        self.evaluate_in(node, &self.globals)
    }

    /// Evaluate a node in an explicit scope
    pub fn evaluate_in(&self, node: &Value, env: &Arc<Environment>) -> Result<Value> {
        match node {
            Value::Nil => Ok(Value::Nil),

            // Unbound symbols are literals
            Value::Symbol(name) => Ok(env.lookup(name).unwrap_or_else(|| node.clone())),

            Value::True | Value::Number(_) | Value::Closure(_) => Ok(node.clone()),

            Value::List(items) => match items.split_first() {
                None => Ok(Value::Nil),
                Some((head, args)) => self.apply(head, args, env),
            },
        }
    }

    /// Dispatch `(head args...)`
    fn apply(&self, head: &Value, args: &[Value], env: &Arc<Environment>) -> Result<Value> {
        match head {
            Value::Symbol(name) => {
                if let Some(Value::Closure(closure)) = env.lookup(name) {
                    return closure.invoke(args, env, self);
                }
                self.invoke_operation(name, args, env)
            }

            Value::Closure(closure) => closure.invoke(args, env, self),

            // ((lambda (x) ...) 5)
            Value::List(_) => match self.evaluate_in(head, env)? {
                Value::Closure(closure) => closure.invoke(args, env, self),
                other => Err(Error::invalid_result(
                    "application",
                    "closure",
                    other.type_name(),
                )),
            },

            other => Err(Error::UndefinedOperation {
                name: other.to_string(),
            }),
        }
    }

    fn invoke_operation(&self, name: &str, args: &[Value], env: &Arc<Environment>) -> Result<Value> {
        let operation = self.registry.lookup(name)?;
        operation.arity().check(operation.name(), args.len())?;

        tracing::trace!(
            operation = operation.name(),
            args = args.len(),
            depth = env.depth(),
            "dispatch"
        );

        operation.invoke(args, env, self)
    }

    /// Root-scope assignment used by `set`
    pub fn assign(&self, env: &Environment, name: &str, value: Value) {
        tracing::debug!(variable = name, value = %value, "assign");

        if self.config.trace_assignments {
            self.execution_trace
                .lock()
                .push((name.to_string(), value.clone()));
        }

        env.set(name, value);
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Evaluator {
    fn drop(&mut self) {
        // A global closure holds the root scope that holds it
        self.globals.clear();
    }
}
