use arsenalcore::geo::TileCoord;
use iced::widget::image;
use log::warn;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Decoded raster tiles plus in-flight and failed bookkeeping.
pub struct TileCache {
    tiles: LruCache<TileCoord, image::Handle>,
    pending: HashSet<TileCoord>,
    failed: HashSet<TileCoord>,
}

impl TileCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tiles: LruCache::new(capacity),
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    pub fn get(&self, coord: &TileCoord) -> Option<&image::Handle> {
        self.tiles.peek(coord)
    }

    /// Marks wanted tiles that are neither cached, in flight nor failed as
    /// pending and returns them. Cached tiles are promoted in the LRU.
    pub fn claim_missing(&mut self, wanted: &[TileCoord]) -> Vec<TileCoord> {
        let mut missing = Vec::new();
        for coord in wanted {
            if self.tiles.get(coord).is_some()
                || self.pending.contains(coord)
                || self.failed.contains(coord)
            {
                continue;
            }
            self.pending.insert(*coord);
            missing.push(*coord);
        }
        missing
    }

    pub fn complete(&mut self, coord: TileCoord, result: Result<Vec<u8>, String>) {
        self.pending.remove(&coord);
        match result {
            Ok(bytes) => {
                self.tiles.put(coord, image::Handle::from_bytes(bytes));
            }
            Err(err) => {
                warn!("tile {}/{}/{} unavailable: {}", coord.z, coord.x, coord.y, err);
                self.failed.insert(coord);
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: u32) -> TileCoord {
        TileCoord { x, y: 0, z: 3 }
    }

    #[test]
    fn claim_skips_pending_and_failed() {
        let mut cache = TileCache::new(8);
        assert_eq!(cache.claim_missing(&[coord(1), coord(2)]).len(), 2);
        assert!(cache.claim_missing(&[coord(1), coord(2)]).is_empty());
        assert_eq!(cache.pending(), 2);

        cache.complete(coord(1), Err("timeout".into()));
        cache.complete(coord(2), Ok(vec![0u8; 4]));
        assert_eq!(cache.pending(), 0);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&coord(2)).is_some());
        assert!(cache.claim_missing(&[coord(1), coord(2), coord(3)]) == vec![coord(3)]);
    }

    #[test]
    fn capacity_bounds_cache() {
        let mut cache = TileCache::new(2);
        for x in 0..4 {
            cache.claim_missing(&[coord(x)]);
            cache.complete(coord(x), Ok(vec![1, 2, 3]));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&coord(0)).is_none());
        assert!(cache.get(&coord(3)).is_some());
    }
}
