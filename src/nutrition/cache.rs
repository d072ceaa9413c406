use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use tracing::trace;

use super::category::MealCategory;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    description: String,
    quantity_bits: Option<u64>,
    category: Option<MealCategory>,
}

impl CacheKey {
    pub fn new(description: &str, quantity_g: Option<f64>, category: Option<MealCategory>) -> Self {
        Self {
            description: description.to_string(),
            quantity_bits: quantity_g.map(f64::to_bits),
            category,
        }
    }
}

struct Slots<V> {
    values: HashMap<CacheKey, Arc<V>>,
    order: VecDeque<CacheKey>,
}

/// Count-bounded memo of finished predictions. The oldest insertion is
/// evicted first; a stored value is never replaced.
pub struct PredictionCache<V> {
    capacity: usize,
    slots: Mutex<Slots<V>>,
}

impl<V> PredictionCache<V> {
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(1024);
        Self {
            capacity,
            slots: Mutex::new(Slots {
                values: HashMap::with_capacity(prealloc),
                order: VecDeque::with_capacity(prealloc),
            }),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let hit = slots.values.get(key).cloned();
        if hit.is_some() {
            trace!(description = %key.description, "prediction cache hit");
        }
        hit
    }

    /// Store `value` unless the key is already present, in which case the
    /// existing value is kept and returned.
    pub fn insert(&self, key: CacheKey, value: V) -> Arc<V> {
        let value = Arc::new(value);
        if self.capacity == 0 {
            return value;
        }
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = slots.values.get(&key) {
            return Arc::clone(existing);
        }
        while slots.order.len() >= self.capacity {
            if let Some(oldest) = slots.order.pop_front() {
                trace!(description = %oldest.description, "prediction cache eviction");
                slots.values.remove(&oldest);
            }
        }
        slots.order.push_back(key.clone());
        slots.values.insert(key, Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).values.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
