//! Shared table of element and attribute names
//!
//! Pages repeat a small vocabulary (`td`, `tr`, `class`, ...). Every name
//! that enters a document goes through a [`NameInterner`] so repeats share
//! one allocation. A document and its clones share the same interner.

use parking_lot::RwLock;
use std::{borrow::Borrow, collections::HashSet, fmt, ops::Deref, sync::Arc};

#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct InternedName(Arc<str>);

impl InternedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether two names share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for InternedName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InternedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names created outside any document, e.g. by the attribute builder
impl From<&str> for InternedName {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl PartialEq<str> for InternedName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for InternedName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[derive(Debug)]
pub struct NameInterner {
    names: RwLock<HashSet<Arc<str>>>,
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl NameInterner {
    pub fn new() -> Self {
        Self {
            names: RwLock::new(HashSet::new()),
        }
    }

    pub fn intern(&self, name: &str) -> InternedName {
        if let Some(interned) = self.names.read().get(name) {
            return InternedName(Arc::clone(interned));
        }

        let mut write_guard = self.names.write();
        if let Some(interned) = write_guard.get(name) {
            return InternedName(Arc::clone(interned));
        }
        let interned: Arc<str> = Arc::from(name);
        write_guard.insert(Arc::clone(&interned));
        InternedName(interned)
    }

    /// Number of distinct names seen
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
