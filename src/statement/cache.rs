use crate::*;
use moka::sync::Cache;
use std::{
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

#[derive(Debug)]
struct Entry {
    text: Box<str>,
    scanned: Arc<ScannedBuffer>,
}

/// Memoized scans, keyed by the exact buffer contents.
///
/// Moving the cursor re-resolves against the same buffer many times between
/// edits; this skips re-scanning in that case. A lookup only hits when the
/// stored text equals the requested text, so a hash collision costs a
/// recomputation, never a wrong answer.
#[derive(Clone)]
pub struct SplitCache {
    entries: Cache<u64, Arc<Entry>>,
}

impl SplitCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::new(capacity),
        }
    }

    pub fn scan(&self, sql: &str) -> Arc<ScannedBuffer> {
        let key = fingerprint(sql);
        if let Some(entry) = self.entries.get(&key).filter(|e| &*e.text == sql) {
            trace!("Scan cache hit for {key:016x}");
            return entry.scanned.clone();
        }

        let scanned = Arc::new(ScannedBuffer::scan(sql));
        self.entries.insert(
            key,
            Arc::new(Entry {
                text: sql.into(),
                scanned: scanned.clone(),
            }),
        );
        scanned
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl std::fmt::Debug for SplitCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

fn fingerprint(sql: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    sql.hash(&mut hasher);
    hasher.finish()
}
