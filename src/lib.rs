//! # treelisp - A minimal LISP evaluator for pre-structured programs
//!
//! treelisp interprets programs that are already structured: nested lists of
//! numbers, symbols and booleans, typically supplied as JSON. There is no
//! textual reader. The host builds a [`Value`], hands it to the [`Evaluator`]
//! and receives a [`Value`] or an [`Error`] back.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use treelisp::{Evaluator, Value};
//!
//! # fn main() -> treelisp::Result<()> {
//! let evaluator = Evaluator::new();
//!
//! // ((lambda (x) (+ x x)) 5)
//! let program = Value::from_json(json!([["lambda", ["x"], ["+", "x", "x"]], 5]))?;
//! assert_eq!(evaluator.evaluate(&program)?, Value::Number(10.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ### Values
//!
//! - `nil` (JSON `null` or `false`) is the empty value and the only false value
//! - `t` (JSON `true`), numbers, symbols (JSON strings), lists (JSON arrays)
//! - closures, created by `lambda`
//!
//! Atoms evaluate to themselves, except symbols bound to a variable. A list is
//! an invocation: its head names an operation or yields a closure.
//!
//! ### Built-in Operations
//!
//! Operations are special forms; each decides which argument nodes it evaluates.
//!
//! - `(+ a b ...)` - sum
//! - `(car l)` / `(first l)`, `(cdr l)` - list head and tail
//! - `(quote x)` / `(' x)` - `x` unevaluated
//! - `(cons a b)` - `(a <value of b>)`, `a` left unevaluated
//! - `(if c then else)` - only `nil` selects `else`
//! - `(set name value)` - assign in the global scope
//! - `(equal a b)` - structural equality
//! - `(lambda (params...) body)` - closure over the current scope
//!
//! ### Scoping
//!
//! Every closure call gets a fresh scope whose parent is the scope where the
//! closure was created. Parameters live in that scope. `set` always writes the
//! global (root) scope, even from inside a closure:
//!
//! ```rust
//! use serde_json::json;
//! use treelisp::{Evaluator, Value};
//!
//! # fn main() -> treelisp::Result<()> {
//! let evaluator = Evaluator::new();
//! let program = [
//!     Value::from_json(json!([["lambda", ["v"], ["set", ["quote", "seen"], "v"]], 3]))?,
//!     Value::from_json(json!("seen"))?,
//! ];
//! assert_eq!(evaluator.execute(&program)?, Value::Number(3.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Evaluation stops at the first error:
//!
//! ```rust
//! use serde_json::json;
//! use treelisp::{Error, Evaluator, Value};
//!
//! let evaluator = Evaluator::new();
//! let program = Value::from_json(json!(["car", 1, 2])).unwrap();
//!
//! match evaluator.evaluate(&program) {
//!     Err(Error::InvalidArgument { operation, .. }) => assert_eq!(operation, "car"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Host → Value (program node) → Evaluator ⇄ OperationRegistry
//!                                   ⇅
//!                      Environment chain ← Closure calls
//! ```
//!
//! - [`Evaluator`] - dispatch of atoms and invocations
//! - [`Environment`] - scope chain with root-scope assignment
//! - [`OperationRegistry`] - built-in operations and aliases
//! - [`Closure`] - user-defined operations

// Module declarations
/// Version of the treelisp evaluator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod operations;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorKind, Result};
pub use operations::{Arity, Operation, OperationRegistry};
pub use runtime::{Closure, Environment, Evaluator, EvaluatorConfig, Value};
