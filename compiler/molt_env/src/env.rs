// Variable environment for evaluating molt programs.
// Function calls evaluate in a copy of the caller's bindings, so nothing a
// call binds leaks back out.

use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct EvaluationVariables<V> {
    symbols: HashMap<String, V>,
    /// Number of function calls this environment is nested in
    depth: usize,
}

impl<V> Default for EvaluationVariables<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EvaluationVariables<V> {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            depth: 0,
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Binds `name`, replacing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: V) {
        self.symbols.insert(name.into(), value);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The same bindings, counted as nested `depth` calls deep.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.symbols.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<V: Clone> EvaluationVariables<V> {
    /// An independent copy at the same call depth.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// A copy for evaluating a function body one call deeper.
    pub fn enter_call(&self) -> Self {
        Self {
            symbols: self.symbols.clone(),
            depth: self.depth + 1,
        }
    }

    /// A copy holding only the bindings for `names` that exist here.
    pub fn restrict(&self, names: &BTreeSet<String>) -> Self {
        let symbols = names
            .iter()
            .filter_map(|name| {
                self.symbols
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();
        Self {
            symbols,
            depth: self.depth,
        }
    }

    /// All bindings sorted by name.
    pub fn collect_symbols(&self) -> Vec<(String, V)> {
        let mut out: Vec<(String, V)> = self
            .symbols
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
