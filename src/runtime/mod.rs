//! Runtime evaluation of program nodes

mod closure;
mod environment;
mod evaluator;
mod value;

pub use closure::Closure;
pub use environment::Environment;
pub use evaluator::{Evaluator, EvaluatorConfig};
pub use value::Value;
