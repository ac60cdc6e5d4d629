use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::Value;

/// A single scope: a name→value map with an optional enclosing scope.
///
/// Environments are heap-allocated and shared through `Rc<RefCell<_>>`
/// because closures keep their defining scope alive past the block that
/// created it, and sibling closures observe each other's mutations through
/// the shared node.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use quill::interpreter::{evaluator::environment::Environment, value::Value};
///
/// let globals = Rc::new(RefCell::new(Environment::new()));
/// globals.borrow_mut().define("x", Value::Number(1.0));
///
/// let mut inner = Environment::with_enclosing(Rc::clone(&globals));
/// assert_eq!(inner.get("x"), Some(Value::Number(1.0)));
///
/// inner.define("x", Value::Number(2.0));
/// assert_eq!(inner.get("x"), Some(Value::Number(2.0)));
/// assert_eq!(globals.borrow().get("x"), Some(Value::Number(1.0)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a scope with no parent, as used for the globals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope chained to an enclosing one.
    #[must_use]
    pub fn with_enclosing(enclosing: Rc<RefCell<Self>>) -> Self {
        Self { values:    HashMap::new(),
               enclosing: Some(enclosing), }
    }

    /// Installs `name` in this scope unconditionally.
    ///
    /// An existing binding of the same name in this scope is overwritten; a
    /// binding in an enclosing scope is shadowed, not touched.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks up `name`, walking outward through the chain.
    ///
    /// Returns `None` when no scope binds the name; the evaluator turns that
    /// into an `UndefinedVariable` error carrying the use site's line.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }

        self.enclosing
            .as_ref()
            .and_then(|enclosing| enclosing.borrow().get(name))
    }

    /// Updates the nearest existing binding of `name`.
    ///
    /// Returns `false` when the name was never declared in any scope of the
    /// chain; assignment does not create implicit globals.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Rc<RefCell<Environment>>, Environment) {
        let outer = Rc::new(RefCell::new(Environment::new()));
        let inner = Environment::with_enclosing(Rc::clone(&outer));
        (outer, inner)
    }

    #[test]
    fn define_then_get_in_same_scope() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get("a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn get_walks_the_chain_outward() {
        let (outer, inner) = chain();
        outer.borrow_mut().define("a", Value::Number(1.0));

        assert_eq!(inner.get("a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn inner_define_shadows_without_touching_outer() {
        let (outer, mut inner) = chain();
        outer.borrow_mut().define("a", Value::Number(1.0));
        inner.define("a", Value::Number(2.0));

        assert_eq!(inner.get("a"), Some(Value::Number(2.0)));
        assert_eq!(outer.borrow().get("a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn inner_define_is_invisible_to_the_outer_scope() {
        let (outer, mut inner) = chain();
        inner.define("local", Value::Bool(true));

        assert_eq!(outer.borrow().get("local"), None);
    }

    #[test]
    fn assign_updates_the_nearest_binding() {
        let (outer, mut inner) = chain();
        outer.borrow_mut().define("a", Value::Number(1.0));

        assert!(inner.assign("a", Value::Number(5.0)));
        assert_eq!(outer.borrow().get("a"), Some(Value::Number(5.0)));
    }

    #[test]
    fn assign_prefers_the_innermost_binding() {
        let (outer, mut inner) = chain();
        outer.borrow_mut().define("a", Value::Number(1.0));
        inner.define("a", Value::Number(2.0));

        assert!(inner.assign("a", Value::Number(3.0)));
        assert_eq!(inner.get("a"), Some(Value::Number(3.0)));
        assert_eq!(outer.borrow().get("a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_to_undeclared_name_fails() {
        let (_outer, mut inner) = chain();
        assert!(!inner.assign("ghost", Value::Nil));
    }

    #[test]
    fn get_of_unknown_name_is_none() {
        let (_outer, inner) = chain();
        assert_eq!(inner.get("missing"), None);
    }
}
