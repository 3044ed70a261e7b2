use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::runtime::Value;

/// Single binding frame in a scope chain
///
/// One root frame exists per evaluator; every closure call adds a child frame
/// parented to the frame the closure captured. Frames are reference counted,
/// so a frame outlives its call only while a reachable closure holds it.
pub struct Environment {
    /// Variables bound in this frame
    variables: RwLock<HashMap<String, Value>>,
    /// Enclosing frame (None for the root)
    parent: Option<Arc<Environment>>,
}

impl Environment {
    /// Creates a new root frame
    pub fn new() -> Self {
        Environment {
            variables: RwLock::new(HashMap::new()),
            parent: None,
        }
    }

    /// Creates an empty frame nested inside `parent`
    pub fn with_parent(parent: Arc<Environment>) -> Self {
        Environment {
            variables: RwLock::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Returns the enclosing frame, if any
    pub fn parent(&self) -> Option<&Arc<Environment>> {
        self.parent.as_ref()
    }

    /// Returns true if this frame has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the terminal ancestor of this chain
    pub fn root(&self) -> &Environment {
        let mut env = self;
        while let Some(parent) = env.parent.as_deref() {
            env = parent;
        }
        env
    }

    /// Number of frames from here to the root (1 for the root)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self;
        while let Some(parent) = env.parent.as_deref() {
            depth += 1;
            env = parent;
        }
        depth
    }

    /// Binds a variable directly in this frame
    ///
    /// Only closure parameter binding uses this; assignments go through [`set`](Self::set).
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.variables.write().insert(name.into(), value);
    }

    /// Binds a variable in the root frame, regardless of nesting depth
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.root().define(name, value);
    }

    /// Finds the nearest binding, walking outward
    ///
    /// Distinguishes an unbound name (`None`) from one bound to `Nil`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut env = self;
        loop {
            if let Some(val) = env.variables.read().get(name) {
                return Some(val.clone());
            }
            env = env.parent.as_deref()?;
        }
    }

    /// Gets the value of a variable, or `Nil` if it is unbound anywhere in the chain
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).unwrap_or(Value::Nil)
    }

    /// Checks if a variable is bound in this frame or any ancestor
    pub fn has(&self, name: &str) -> bool {
        let mut env = self;
        loop {
            if env.variables.read().contains_key(name) {
                return true;
            }
            match env.parent.as_deref() {
                Some(parent) => env = parent,
                None => return false,
            }
        }
    }

    /// Removes every binding in this frame
    ///
    /// Bindings are dropped after the lock is released, since dropping a
    /// closure may drop frames that hold their own locks.
    pub(crate) fn clear(&self) {
        let bindings = std::mem::take(&mut *self.variables.write());
        drop(bindings);
    }

    /// Names bound in this frame only, sorted
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.variables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns every visible binding, inner frames shadowing outer ones
    pub fn snapshot(&self) -> HashMap<String, Value> {
        let mut frames = vec![self];
        let mut env = self;
        while let Some(parent) = env.parent.as_deref() {
            frames.push(parent);
            env = parent;
        }

        let mut result = HashMap::new();
        for frame in frames.into_iter().rev() {
            for (k, v) in frame.variables.read().iter() {
                result.insert(k.clone(), v.clone());
            }
        }
        result
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Bindings may hold closures that capture this very frame, so only names are printed
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_basic_define_and_get() {
        let env = Environment::new();
        env.define("x", num(42.0));

        assert_eq!(env.get("x"), num(42.0));
        assert!(env.has("x"));
    }

    #[test]
    fn test_unbound_variable_is_nil() {
        let env = Environment::new();
        assert_eq!(env.get("undefined"), Value::Nil);
        assert_eq!(env.lookup("undefined"), None);
        assert!(!env.has("undefined"));
    }

    #[test]
    fn test_bound_to_nil_is_distinct_from_unbound() {
        let env = Environment::new();
        env.define("x", Value::Nil);

        assert!(env.has("x"));
        assert_eq!(env.lookup("x"), Some(Value::Nil));
    }

    #[test]
    fn test_nested_scopes() {
        let root = Arc::new(Environment::new());
        root.define("x", num(1.0));

        let middle = Arc::new(Environment::with_parent(root.clone()));
        middle.define("y", num(2.0));

        let inner = Environment::with_parent(middle.clone());
        inner.define("z", num(3.0));

        // All variables accessible from the innermost frame
        assert_eq!(inner.get("x"), num(1.0));
        assert_eq!(inner.get("y"), num(2.0));
        assert_eq!(inner.get("z"), num(3.0));

        // Outer frames never see inner bindings
        assert!(!middle.has("z"));
        assert!(!root.has("y"));
    }

    #[test]
    fn test_variable_shadowing() {
        let root = Arc::new(Environment::new());
        root.define("x", num(10.0));

        let child = Environment::with_parent(root.clone());
        child.define("x", Value::symbol("shadowed"));

        assert_eq!(child.get("x"), Value::symbol("shadowed"));
        assert_eq!(root.get("x"), num(10.0));
    }

    #[test]
    fn test_set_writes_root_frame() {
        let root = Arc::new(Environment::new());
        let child = Arc::new(Environment::with_parent(root.clone()));
        let grandchild = Environment::with_parent(child.clone());

        grandchild.set("counter", num(7.0));

        assert_eq!(root.get("counter"), num(7.0));
        assert!(grandchild.local_names().is_empty());
        assert!(child.local_names().is_empty());
    }

    #[test]
    fn test_set_does_not_update_shadowing_local() {
        let root = Arc::new(Environment::new());
        let child = Environment::with_parent(root.clone());
        child.define("x", num(1.0));

        child.set("x", num(2.0));

        // The local parameter still shadows the root assignment
        assert_eq!(child.get("x"), num(1.0));
        assert_eq!(root.get("x"), num(2.0));
    }

    #[test]
    fn test_root_and_depth() {
        let root = Arc::new(Environment::new());
        assert!(root.is_root());
        assert_eq!(root.depth(), 1);

        let child = Arc::new(Environment::with_parent(root.clone()));
        let grandchild = Environment::with_parent(child.clone());
        assert!(!grandchild.is_root());
        assert_eq!(grandchild.depth(), 3);
        assert!(std::ptr::eq(grandchild.root(), root.as_ref()));
    }

    #[test]
    fn test_snapshot() {
        let root = Arc::new(Environment::new());
        root.define("x", num(10.0));
        root.define("y", num(20.0));

        let child = Environment::with_parent(root.clone());
        child.define("y", num(21.0));

        let snapshot = child.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("x"), Some(&num(10.0)));
        assert_eq!(snapshot.get("y"), Some(&num(21.0)));
    }

    #[test]
    fn test_clear_only_touches_this_frame() {
        let root = Arc::new(Environment::new());
        root.define("x", num(1.0));
        let child = Environment::with_parent(root.clone());
        child.define("y", num(2.0));

        child.clear();
        assert!(!child.has("y"));
        assert!(child.has("x"));

        root.clear();
        assert!(root.local_names().is_empty());
    }
}
