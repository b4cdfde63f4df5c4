use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// CacheInvalidator
///
/// Marks cached data stale after a mutation, either by resource tag
/// (e.g. `users`) or by page path (e.g. `/users`).
pub trait CacheInvalidator: Send + Sync {
    fn revalidate_tag(&self, tag: &str);
    fn revalidate_path(&self, path: &str);

    /// Current generation of `path`. Zero until first revalidated.
    fn path_generation(&self, path: &str) -> u64;
    fn tag_generation(&self, tag: &str) -> u64;
}

/// CacheState
///
/// The shared handle stored in `AppState`.
pub type CacheState = Arc<dyn CacheInvalidator>;

/// RevalidationRegistry
///
/// In-process generation counters. Each revalidation bumps the counter for
/// its key; readers compare generations to detect staleness.
#[derive(Debug, Default)]
pub struct RevalidationRegistry {
    tags: RwLock<HashMap<String, u64>>,
    paths: RwLock<HashMap<String, u64>>,
}

impl RevalidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bump(map: &RwLock<HashMap<String, u64>>, key: &str) -> u64 {
    let mut map = map.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    let generation = map.entry(key.to_string()).or_insert(0);
    *generation += 1;
    *generation
}

fn read(map: &RwLock<HashMap<String, u64>>, key: &str) -> u64 {
    map.read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(key)
        .copied()
        .unwrap_or(0)
}

impl CacheInvalidator for RevalidationRegistry {
    fn revalidate_tag(&self, tag: &str) {
        let generation = bump(&self.tags, tag);
        tracing::debug!(tag, generation, "revalidated tag");
    }

    fn revalidate_path(&self, path: &str) {
        let generation = bump(&self.paths, path);
        tracing::debug!(path, generation, "revalidated path");
    }

    fn path_generation(&self, path: &str) -> u64 {
        read(&self.paths, path)
    }

    fn tag_generation(&self, tag: &str) -> u64 {
        read(&self.tags, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_independent_per_key() {
        let registry = RevalidationRegistry::new();
        registry.revalidate_path("/users");
        registry.revalidate_path("/users");
        registry.revalidate_tag("users");

        assert_eq!(registry.path_generation("/users"), 2);
        assert_eq!(registry.path_generation("/calendar"), 0);
        assert_eq!(registry.tag_generation("users"), 1);
    }
}
