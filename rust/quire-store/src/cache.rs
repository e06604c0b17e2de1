//! Bounded cache of decompressed blocks.
//!
//! Decompressing a block costs far more than slicing a verse out of it,
//! and verse access patterns are strongly local, so the module keeps the
//! last few decompressed blocks around. The cache is bounded (FIFO
//! eviction) and deduplicates loads: at most one decompression per block
//! number is in flight, and concurrent requesters for that block wait on
//! a condition variable instead of duplicating the work. A failed load is
//! never cached; the pending slot clears and the next requester retries.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

use ahash::{HashMap, HashSet};
use quire_common::Result;

/// Default number of decompressed blocks kept per module.
pub const DEFAULT_CACHE_BLOCKS: usize = 16;

pub struct BlockCache {
    capacity: usize,
    state: Mutex<CacheState>,
    loaded: Condvar,
}

#[derive(Default)]
struct CacheState {
    blocks: HashMap<u32, Arc<Vec<u8>>>,
    order: VecDeque<u32>,
    pending: HashSet<u32>,
}

impl BlockCache {
    /// A cache holding at most `capacity` decompressed blocks (at least
    /// one).
    pub fn new(capacity: usize) -> BlockCache {
        BlockCache {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
            loaded: Condvar::new(),
        }
    }

    pub fn with_default_capacity() -> BlockCache {
        BlockCache::new(DEFAULT_CACHE_BLOCKS)
    }

    /// Returns the cached content of `block`, running `load` if it is not
    /// resident. Concurrent callers for one block share a single load.
    pub fn get_or_load(
        &self,
        block: u32,
        load: impl FnOnce() -> Result<Vec<u8>>,
    ) -> Result<Arc<Vec<u8>>> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(data) = state.blocks.get(&block) {
                return Ok(Arc::clone(data));
            }
            if !state.pending.contains(&block) {
                break;
            }
            state = self
                .loaded
                .wait_while(state, |s| s.pending.contains(&block))
                .unwrap();
            // The loader finished: either the block is resident now, or
            // the load failed and this caller takes over.
        }
        state.pending.insert(block);
        drop(state);

        let outcome = load();

        let mut state = self.state.lock().unwrap();
        state.pending.remove(&block);
        let result = match outcome {
            Ok(data) => {
                let data = Arc::new(data);
                state.insert(block, Arc::clone(&data), self.capacity);
                Ok(data)
            }
            Err(e) => Err(e),
        };
        drop(state);
        self.loaded.notify_all();
        result
    }

    /// Number of resident blocks.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, block: u32) -> bool {
        self.state.lock().unwrap().blocks.contains_key(&block)
    }

    /// Drops all resident blocks. In-flight loads are unaffected.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.blocks.clear();
        state.order.clear();
    }
}

impl CacheState {
    fn insert(&mut self, block: u32, data: Arc<Vec<u8>>, capacity: usize) {
        if self.blocks.insert(block, data).is_none() {
            self.order.push_back(block);
        }
        while self.blocks.len() > capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.blocks.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_common::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn caches_loaded_blocks() {
        let cache = BlockCache::new(4);
        let loads = AtomicUsize::new(0);
        for _ in 0..3 {
            let data = cache
                .get_or_load(7, || {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(b"block seven".to_vec())
                })
                .unwrap();
            assert_eq!(*data, b"block seven");
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_oldest_first() {
        let cache = BlockCache::new(2);
        for block in 0..3 {
            cache
                .get_or_load(block, || Ok(vec![block as u8]))
                .unwrap();
        }
        assert!(!cache.contains(0));
        assert!(cache.contains(1));
        assert!(cache.contains(2));

        // Reloading the evicted block runs the loader again.
        let loads = AtomicUsize::new(0);
        cache
            .get_or_load(0, || {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(vec![0])
            })
            .unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = BlockCache::new(2);
        let err = cache
            .get_or_load(3, || Err(Error::corrupt_data("block", "broken")))
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert!(!cache.contains(3));

        let data = cache.get_or_load(3, || Ok(b"fine".to_vec())).unwrap();
        assert_eq!(*data, b"fine");
    }

    #[test]
    fn concurrent_requests_share_one_load() {
        let cache = BlockCache::new(4);
        let loads = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let data = cache
                        .get_or_load(11, || {
                            loads.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(20));
                            Ok(b"shared".to_vec())
                        })
                        .unwrap();
                    assert_eq!(*data, b"shared");
                });
            }
        });
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_drops_resident_blocks() {
        let cache = BlockCache::new(4);
        cache.get_or_load(1, || Ok(vec![1])).unwrap();
        cache.get_or_load(2, || Ok(vec![2])).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
