use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::model::VisitRecord;

struct Entry {
    record: VisitRecord,
    stored_at: Instant,
}

/// Bounded, time-windowed store joining the two capture phases by client IP.
///
/// Entries expire after the configured TTL and the store never holds more
/// than `capacity` live entries; when full, the oldest entry is evicted.
/// Last write wins per IP key.
pub struct VisitStore {
    inner: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
    capacity: usize,
}

impl VisitStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    /// Store the first-phase record for an IP, replacing any prior one.
    pub fn insert(&self, ip: &str, record: VisitRecord) {
        let mut map = self.inner.lock().unwrap();
        map.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);

        if map.len() >= self.capacity && !map.contains_key(ip) {
            let oldest = map
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                map.remove(&key);
            }
        }

        map.insert(
            ip.to_string(),
            Entry {
                record,
                stored_at: Instant::now(),
            },
        );
    }

    /// Fetch the live record for an IP, if any. The record stays in the
    /// store so a duplicate second phase correlates again.
    pub fn get(&self, ip: &str) -> Option<VisitRecord> {
        let mut map = self.inner.lock().unwrap();
        match map.get(ip) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.record.clone()),
            Some(_) => {
                map.remove(ip);
                None
            }
            None => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}
