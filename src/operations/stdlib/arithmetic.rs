//! Arithmetic operations

use crate::error::Result;
use crate::operations::{Arity, Operation, OperationRegistry};
use crate::runtime::{Environment, Evaluator, Value};
use std::sync::Arc;

/// Register arithmetic operations
pub fn register(registry: &mut OperationRegistry) {
    registry.register(SumOperation);
}

/// + - Sum of all evaluated arguments; `(+)` is 0
pub struct SumOperation;

impl Operation for SumOperation {
    fn name(&self) -> &str {
        "+"
    }

    fn description(&self) -> &str {
        "Sum of the evaluated arguments"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(0)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        let mut total = 0.0;
        for node in args {
            total += evaluator.evaluate_in(node, env)?.as_number("+")?;
        }
        Ok(Value::Number(total))
    }
}
