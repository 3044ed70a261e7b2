use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Evaluator, Value};

/// User-defined operation created by `lambda`
pub struct Closure {
    /// Parameter names, bound positionally on each call
    params: Vec<String>,
    /// Body node, evaluated in a fresh child frame per call
    body: Value,
    /// Frame active where the closure was created
    env: Arc<Environment>,
}

impl Closure {
    /// Creates a closure over `env`
    pub fn new(params: Vec<String>, body: Value, env: Arc<Environment>) -> Self {
        Closure { params, body, env }
    }

    /// Parameter names
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Body node
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Captured defining frame
    pub fn env(&self) -> &Arc<Environment> {
        &self.env
    }

    /// Calls the closure
    ///
    /// Argument nodes are evaluated left to right in `caller_env`, then bound
    /// in a new frame whose parent is the captured frame, not the caller's.
    pub fn invoke(
        &self,
        arg_nodes: &[Value],
        caller_env: &Arc<Environment>,
        evaluator: &Evaluator,
    ) -> Result<Value> {
        if arg_nodes.len() != self.params.len() {
            return Err(Error::invalid_argument(
                "lambda",
                format!(
                    "parameter count mismatch: expected {}, got {}",
                    self.params.len(),
                    arg_nodes.len()
                ),
            ));
        }

        let mut args = Vec::with_capacity(arg_nodes.len());
        for node in arg_nodes {
            args.push(evaluator.evaluate_in(node, caller_env)?);
        }

        // Parameters go straight into the new frame; `set` would redirect to the root
        let frame = Arc::new(Environment::with_parent(self.env.clone()));
        for (param, arg) in self.params.iter().zip(args) {
            frame.define(param.as_str(), arg);
        }

        tracing::trace!(
            params = ?self.params,
            depth = frame.depth(),
            "invoking closure"
        );

        evaluator.evaluate_in(&self.body, &frame)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
