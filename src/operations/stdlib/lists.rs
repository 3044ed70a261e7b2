//! List operations - car, cdr, cons, quote

use crate::error::Result;
use crate::operations::{Arity, Operation, OperationRegistry};
use crate::runtime::{Environment, Evaluator, Value};
use std::sync::Arc;

/// Register list operations
pub fn register(registry: &mut OperationRegistry) {
    registry.register(CarOperation);
    registry.register(CdrOperation);
    registry.register(ConsOperation);
    registry.register(QuoteOperation);

    registry.alias("first", "car");
    registry.alias("'", "quote");
}

/// CAR - First element of a list, `nil` for the empty list
pub struct CarOperation;

impl Operation for CarOperation {
    fn name(&self) -> &str {
        "car"
    }

    fn description(&self) -> &str {
        "First element of a list"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let list = evaluator.evaluate_in(&args[0], env)?;
        let items = list.as_list("car")?;
        Ok(items.first().cloned().unwrap_or(Value::Nil))
    }
}

/// CDR - List without its first element, `nil` when nothing remains
pub struct CdrOperation;

impl Operation for CdrOperation {
    fn name(&self) -> &str {
        "cdr"
    }

    fn description(&self) -> &str {
        "List without its first element"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let list = evaluator.evaluate_in(&args[0], env)?;
        let items = list.as_list("cdr")?;
        if items.len() <= 1 {
            return Ok(Value::Nil);
        }
        Ok(Value::list(items[1..].to_vec()))
    }
}

/// CONS - Two-element list of the first node (unevaluated) and the evaluated second
pub struct ConsOperation;

impl Operation for ConsOperation {
    fn name(&self) -> &str {
        "cons"
    }

    fn description(&self) -> &str {
        "Pair the first node verbatim with the evaluated second"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn invoke(&self, args: &[Value], env: &Arc<Environment>, evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        let tail = evaluator.evaluate_in(&args[1], env)?;
        Ok(Value::list(vec![args[0].clone(), tail]))
    }
}

/// QUOTE - Argument node, unevaluated
pub struct QuoteOperation;

impl Operation for QuoteOperation {
    fn name(&self) -> &str {
        "quote"
    }

    fn description(&self) -> &str {
        "Return the argument unevaluated"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn invoke(&self, args: &[Value], _env: &Arc<Environment>, _evaluator: &Evaluator) -> Result<Value> {
        self.arity().check(self.name(), args.len())?;
        Ok(args[0].clone())
    }
}
