//! In-memory thumbnail cache with bounded size.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use cs_core::config::ThumbnailCacheConfig;
use cs_core::ports::Thumbnail;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    file_name: String,
    max_dimension: u32,
}

impl ThumbnailKey {
    pub fn new(file_name: impl Into<String>, max_dimension: u32) -> Self {
        Self {
            file_name: file_name.into(),
            max_dimension,
        }
    }
}

/// Bounded FIFO cache for generated thumbnails.
///
/// Both limits are enforced on every insert by evicting the oldest entries.
/// A miss is never an error: callers regenerate and put the result back.
pub struct ThumbnailCache {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<ThumbnailKey, Arc<Thumbnail>>,
    queue: VecDeque<ThumbnailKey>,
    max_entries: usize,
    max_bytes: usize,
    current_bytes: usize,
}

impl ThumbnailCache {
    /// Create a new cache with entry and byte limits.
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                queue: VecDeque::new(),
                max_entries,
                max_bytes,
                current_bytes: 0,
            }),
        }
    }

    pub fn from_config(config: &ThumbnailCacheConfig) -> Self {
        Self::new(config.max_entries, config.max_bytes)
    }

    /// Put a thumbnail into the cache, evicting oldest entries if needed.
    pub async fn put(&self, key: ThumbnailKey, thumbnail: Arc<Thumbnail>) {
        let mut inner = self.inner.lock().await;

        inner.remove_entry(&key);
        inner.queue.retain(|k| k != &key);

        inner.current_bytes = inner.current_bytes.saturating_add(thumbnail.bytes.len());
        inner.entries.insert(key.clone(), thumbnail);
        inner.queue.push_back(key);

        inner.evict_if_needed();
    }

    pub async fn get(&self, key: &ThumbnailKey) -> Option<Arc<Thumbnail>> {
        let inner = self.inner.lock().await;
        inner.entries.get(key).cloned()
    }

    /// Drop every cached size of one image.
    pub async fn remove_file(&self, file_name: &str) {
        let mut inner = self.inner.lock().await;
        let keys: Vec<ThumbnailKey> = inner
            .queue
            .iter()
            .filter(|k| k.file_name == file_name)
            .cloned()
            .collect();
        for key in &keys {
            inner.remove_entry(key);
        }
        inner.queue.retain(|k| k.file_name != file_name);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn total_bytes(&self) -> usize {
        self.inner.lock().await.current_bytes
    }
}

impl Inner {
    fn remove_entry(&mut self, key: &ThumbnailKey) {
        if let Some(thumbnail) = self.entries.remove(key) {
            self.current_bytes = self.current_bytes.saturating_sub(thumbnail.bytes.len());
        }
    }

    fn evict_if_needed(&mut self) {
        while self.entries.len() > self.max_entries || self.current_bytes > self.max_bytes {
            match self.queue.pop_front() {
                Some(evicted) => self.remove_entry(&evicted),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(size: usize) -> Arc<Thumbnail> {
        Arc::new(Thumbnail {
            bytes: vec![0; size],
            mime_type: "image/webp".to_string(),
            width: 1,
            height: 1,
        })
    }

    #[tokio::test]
    async fn test_cache_put_get() {
        let cache = ThumbnailCache::new(10, 1_000);
        let key = ThumbnailKey::new("a.png", 64);
        cache.put(key.clone(), thumb(3)).await;

        assert_eq!(cache.get(&key).await.map(|t| t.bytes.len()), Some(3));
        assert!(cache.get(&ThumbnailKey::new("a.png", 128)).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_evicts_oldest_by_count() {
        let cache = ThumbnailCache::new(2, 1_000);
        let first = ThumbnailKey::new("1.png", 64);
        let second = ThumbnailKey::new("2.png", 64);
        let third = ThumbnailKey::new("3.png", 64);

        cache.put(first.clone(), thumb(1)).await;
        cache.put(second.clone(), thumb(1)).await;
        cache.put(third.clone(), thumb(1)).await;

        assert!(cache.get(&first).await.is_none());
        assert!(cache.get(&second).await.is_some());
        assert!(cache.get(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_cache_evicts_by_bytes() {
        let cache = ThumbnailCache::new(10, 10);
        cache.put(ThumbnailKey::new("1.png", 64), thumb(6)).await;
        cache.put(ThumbnailKey::new("2.png", 64), thumb(6)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.total_bytes().await, 6);
    }

    #[tokio::test]
    async fn test_replacing_key_does_not_double_count() {
        let cache = ThumbnailCache::new(10, 100);
        let key = ThumbnailKey::new("1.png", 64);
        cache.put(key.clone(), thumb(10)).await;
        cache.put(key.clone(), thumb(20)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.total_bytes().await, 20);
    }

    #[tokio::test]
    async fn test_remove_file_drops_all_sizes() {
        let cache = ThumbnailCache::new(10, 1_000);
        cache.put(ThumbnailKey::new("1.png", 64), thumb(1)).await;
        cache.put(ThumbnailKey::new("1.png", 256), thumb(1)).await;
        cache.put(ThumbnailKey::new("2.png", 64), thumb(1)).await;

        cache.remove_file("1.png").await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&ThumbnailKey::new("2.png", 64)).await.is_some());
    }
}
