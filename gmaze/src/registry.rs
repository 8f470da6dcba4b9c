use std::{hash::Hash, sync::Arc};

use hashbrown::{Equivalent, HashMap};

/// Named collection of shared items with an optional fallback.
pub struct Registry<T: ?Sized, K = String> {
    items: HashMap<K, Arc<T>>,
    default: Option<Arc<T>>,
}

impl<T: ?Sized, K> Registry<T, K> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            default: None,
        }
    }

    pub fn with_default(default: Arc<T>) -> Self {
        Self {
            items: HashMap::new(),
            default: Some(default),
        }
    }

    pub fn get_default(&self) -> Option<Arc<T>> {
        self.default.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ?Sized, K> Default for Registry<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, K> Registry<T, K>
where
    K: Hash + Eq,
{
    pub fn register(&mut self, key: K, item: Arc<T>) {
        self.items.insert(key, item);
    }

    pub fn get<Q>(&self, k: &Q) -> Option<Arc<T>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.items.get(k).cloned()
    }
}
