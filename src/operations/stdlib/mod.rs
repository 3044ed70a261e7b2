//! Built-in operations

pub mod arithmetic;
pub mod control;
pub mod lists;

use crate::operations::OperationRegistry;

/// Register all built-in operations and their aliases
pub fn register_all(registry: &mut OperationRegistry) {
    arithmetic::register(registry);
    lists::register(registry);
    control::register(registry);
}
