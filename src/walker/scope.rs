//! Name scopes for CTE and alias visibility.
//!
//! Scopes form an explicit parent-pointer chain whose lifetime is tied
//! to the recursive walk: the statement owns the root scope, each CTE
//! body or parenthesized subquery gets a child, and a child is dropped
//! when the walker returns to its parent. A binding shadows an
//! identically named real table only for references inside its scope.

use std::collections::HashMap;

/// What a name is bound to within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Cte,
    Alias,
}

/// One scope record in the chain. Lookups are case-insensitive.
#[derive(Debug)]
pub struct NameScope<'a> {
    parent: Option<&'a NameScope<'a>>,
    bindings: HashMap<String, Binding>,
}

impl<'a> NameScope<'a> {
    /// The statement-level scope.
    pub fn root() -> Self {
        Self {
            parent: None,
            bindings: HashMap::new(),
        }
    }

    /// A child scope for a CTE body or subquery.
    pub fn child(parent: &'a NameScope<'a>) -> Self {
        Self {
            parent: Some(parent),
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, name: &str, binding: Binding) {
        self.bindings.insert(name.to_ascii_lowercase(), binding);
    }

    /// Resolve a name through the chain, innermost scope first.
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        let key = name.to_ascii_lowercase();
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Some(binding) = s.bindings.get(&key) {
                return Some(*binding);
            }
            scope = s.parent;
        }
        None
    }
}
