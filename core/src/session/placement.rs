use crate::catalog::CatalogRecord;
use crate::geo::GeoPoint;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues `marker-<millis>-<sequence>-<random>` ids.
///
/// The sequence alone guarantees uniqueness within a session; the clock and
/// random parts keep ids distinct across sessions.
pub struct MarkerIdGenerator {
    sequence: u64,
    rng: StdRng,
}

impl MarkerIdGenerator {
    pub fn new() -> Self {
        Self {
            sequence: 0,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            sequence: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> MarkerId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        self.sequence += 1;
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        MarkerId(format!("marker-{}-{}-{}", millis, self.sequence, suffix))
    }
}

impl Default for MarkerIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A record snapshot pinned to a map position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub position: GeoPoint,
    pub record: CatalogRecord,
}

/// Ordered marker collection; insertion order is draw order.
#[derive(Default)]
pub struct Placements {
    markers: Vec<PlacedMarker>,
    ids: MarkerIdGenerator,
}

impl Placements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(ids: MarkerIdGenerator) -> Self {
        Self {
            markers: Vec::new(),
            ids,
        }
    }

    /// Appends a snapshot of `record` at `position` and returns the new id.
    pub fn place(&mut self, position: GeoPoint, record: &CatalogRecord) -> MarkerId {
        let id = self.ids.next_id();
        self.markers.push(PlacedMarker {
            id: id.clone(),
            position,
            record: record.clone(),
        });
        id
    }

    pub fn remove(&mut self, id: &MarkerId) -> Option<PlacedMarker> {
        let index = self.markers.iter().position(|marker| &marker.id == id)?;
        Some(self.markers.remove(index))
    }

    /// Empties the collection and returns how many markers were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.markers.len();
        self.markers.clear();
        count
    }

    pub fn get(&self, id: &MarkerId) -> Option<&PlacedMarker> {
        self.markers.iter().find(|marker| &marker.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedMarker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record() -> CatalogRecord {
        CatalogRecord::new("Astra", "Air-to-Air", 110.0)
    }

    #[test]
    fn ids_are_unique_and_well_formed() {
        let mut ids = MarkerIdGenerator::with_seed(7);
        let generated: Vec<MarkerId> = (0..500).map(|_| ids.next_id()).collect();
        let unique: HashSet<&MarkerId> = generated.iter().collect();
        assert_eq!(unique.len(), generated.len());

        let parts: Vec<&str> = generated[0].as_str().split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "marker");
        assert_eq!(parts[2], "1");
        assert_eq!(parts[3].len(), SUFFIX_LEN);
        assert!(parts[3].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn place_appends_snapshot() {
        let mut placements = Placements::with_generator(MarkerIdGenerator::with_seed(1));
        let id = placements.place(GeoPoint::new(20.0, 78.0), &record());
        assert_eq!(placements.len(), 1);
        let marker = placements.get(&id).unwrap();
        assert_eq!(marker.position, GeoPoint::new(20.0, 78.0));
        assert_eq!(marker.record, record());
    }

    #[test]
    fn remove_deletes_only_the_given_marker() {
        let mut placements = Placements::new();
        let first = placements.place(GeoPoint::new(1.0, 1.0), &record());
        let second = placements.place(GeoPoint::new(2.0, 2.0), &record());

        assert!(placements.remove(&first).is_some());
        assert!(placements.get(&first).is_none());
        assert!(placements.get(&second).is_some());
        assert!(placements.remove(&first).is_none());
        assert!(placements.remove(&MarkerId::from("marker-0-0-none")).is_none());
        assert_eq!(placements.len(), 1);
    }

    #[test]
    fn clear_empties_any_size() {
        let mut placements = Placements::new();
        assert_eq!(placements.clear(), 0);
        for i in 0..5 {
            placements.place(GeoPoint::new(i as f64, 0.0), &record());
        }
        assert_eq!(placements.clear(), 5);
        assert!(placements.is_empty());
    }
}
