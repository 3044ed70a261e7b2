//! Control, binding and comparison operations - if, set, equal, lambda

use crate::error::{Error, Result};
use crate::operations::{Arity, Operation, OperationRegistry};
use crate::runtime::{Closure, Environment, Evaluator, Value};
use std::sync::Arc;

/// Register control operations
pub fn register(registry: &mut OperationRegistry) {
    registry.register(IfOperation);
    registry.register(SetOperation);
    registry.register(EqualOperation);
    registry.register(LambdaOperation);
}

/// IF - Evaluate the condition, then exactly one branch
pub struct IfOperation;

impl Operation for IfOperation {
    fn name(&self) -> &str {
        "if"
    }

    fn description(&self) -> &str {
        "Conditional: only nil selects the else-branch"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(3)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let condition = evaluator.evaluate_in(&args[0], env)?;
        let branch = if condition.is_nil() { &args[2] } else { &args[1] };
        evaluator.evaluate_in(branch, env)
    }
}

/// SET - Bind a value to a name in the root scope
///
/// Both arguments are evaluated, so the name node must evaluate to a symbol:
/// `(set x 1)` works while `x` is unbound, `(set (quote x) 2)` always works.
pub struct SetOperation;

impl Operation for SetOperation {
    fn name(&self) -> &str {
        "set"
    }

    fn description(&self) -> &str {
        "Assign a value to a variable in the global scope"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let name = evaluator.evaluate_in(&args[0], env)?;
        let value = evaluator.evaluate_in(&args[1], env)?;
        evaluator.assign(env, name.as_symbol("set")?, value.clone());
        Ok(value)
    }
}

/// EQUAL - Structural equality of both evaluated arguments
pub struct EqualOperation;

impl Operation for EqualOperation {
    fn name(&self) -> &str {
        "equal"
    }

    fn description(&self) -> &str {
        "Structural equality, t or nil"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let first = evaluator.evaluate_in(&args[0], env)?;
        let second = evaluator.evaluate_in(&args[1], env)?;
        Ok(Value::from_bool(first == second))
    }
}

/// LAMBDA - Closure over the current scope: `(lambda (params...) body)`
pub struct LambdaOperation;

impl Operation for LambdaOperation {
    fn name(&self) -> &str {
        "lambda"
    }

    fn description(&self) -> &str {
        "Create a closure over the current scope"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, _evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let params = match &args[0] {
            Value::List(items) => items
                .iter()
                .map(|param| match param {
                    Value::Symbol(name) => Ok(name.clone()),
                    other => Err(Error::invalid_argument(
                        "lambda",
                        format!("parameter must be a symbol, got {}", other.type_name()),
                    )),
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::invalid_argument(
                    "lambda",
                    format!("parameter list must be a list, got {}", other.type_name()),
                ))
            }
        };

        if args.len() > 2 {
            tracing::warn!(
                ignored = args.len() - 2,
                "lambda takes a single body node, extra nodes ignored"
            );
        }
        let body = args.get(1).cloned().unwrap_or(Value::Nil);

        Ok(Value::Closure(Arc::new(Closure::new(params, body, env.clone()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_direct_invoke_checks_arity() {
        let evaluator = Evaluator::new();
        let env = evaluator.globals();
        let one = [Value::Number(1.0)];

        let err = IfOperation.invoke(&one, env, &evaluator).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_argument("if", "expected exactly 3 arguments, got 1")
        );
        assert_eq!(
            SetOperation.invoke(&one, env, &evaluator).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            EqualOperation.invoke(&one, env, &evaluator).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            LambdaOperation.invoke(&[], env, &evaluator).unwrap_err(),
            Error::invalid_argument("lambda", "expected at least 1 argument, got 0")
        );
    }

    #[test]
    fn test_lambda_missing_body_is_nil() {
        let evaluator = Evaluator::new();
        let closure = LambdaOperation
            .invoke(&[Value::list(vec![])], evaluator.globals(), &evaluator)
            .unwrap();
        match closure {
            Value::Closure(closure) => assert_eq!(closure.body(), &Value::Nil),
            other => panic!("expected closure, got {}", other),
        }
    }
}
