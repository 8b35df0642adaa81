//! Shared storage for the names and lexemes the lexer produces.
//!
//! A molt program mentions the same handful of names over and over (`x`,
//! `y`, the functions it defines), so every lexeme is stored once and tokens
//! carry a cheap handle to it.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

lazy_static! {
    static ref NAMES: Mutex<HashSet<Arc<str>>> = Mutex::new(HashSet::new());
}

/// A lexeme stored in the shared name table.
///
/// Two handles to the same text share one allocation, so equality is a
/// pointer comparison. Ordering follows the text.
#[derive(Debug, Clone)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// Looks `text` up in the name table, adding it on first sight.
    pub fn new(text: &str) -> Self {
        // entries are inserted whole, so a poisoned table is still usable
        let mut names = NAMES.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = names.get(text) {
            return InternedString(Arc::clone(existing));
        }
        let stored: Arc<str> = Arc::from(text);
        names.insert(Arc::clone(&stored));
        InternedString(stored)
    }

    /// The stored text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for InternedString {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for InternedString {}

impl Hash for InternedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for InternedString {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            Ordering::Equal
        } else {
            self.as_str().cmp(other.as_str())
        }
    }
}

impl PartialOrd for InternedString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for InternedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for InternedString {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for InternedString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for InternedString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
