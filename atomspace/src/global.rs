//! Process-wide default atomspace
//!
//! Components that are not handed a store explicitly (the command
//! interpreter, the CLI) fall back to the store registered here.

use crate::store::AtomSpace;
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

static DEFAULT_SPACE: Lazy<RwLock<Option<Arc<AtomSpace>>>> = Lazy::new(|| RwLock::new(None));

/// Register `space` as the default store, returning the one it replaces
pub fn initialize(space: Arc<AtomSpace>) -> Option<Arc<AtomSpace>> {
    debug!(space = %space.id(), "Registering default atomspace");
    DEFAULT_SPACE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(space)
}

/// Unregister the default store. Holders of a handle keep it alive.
pub fn finalize() -> Option<Arc<AtomSpace>> {
    let previous = DEFAULT_SPACE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(space) = &previous {
        debug!(space = %space.id(), "Released default atomspace");
    }
    previous
}

pub fn default_space() -> Option<Arc<AtomSpace>> {
    DEFAULT_SPACE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn is_initialized() -> bool {
    default_space().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the registry is shared across the test binary's threads.
    #[test]
    fn test_default_space_lifecycle() {
        finalize();
        assert!(!is_initialized());

        let first = Arc::new(AtomSpace::new());
        assert!(initialize(first.clone()).is_none());
        assert!(Arc::ptr_eq(&default_space().unwrap(), &first));

        let second = Arc::new(AtomSpace::new());
        let replaced = initialize(second.clone()).unwrap();
        assert!(Arc::ptr_eq(&replaced, &first));

        let released = finalize().unwrap();
        assert!(Arc::ptr_eq(&released, &second));
        assert!(default_space().is_none());
        assert!(finalize().is_none());
    }
}
