use std::collections::HashSet;

use super::{squared_l2, ChunkId, Neighbor, StoreError, VectorStore};

#[derive(Debug, Clone)]
struct IndexEntry {
    id: ChunkId,
    vector: Vec<f32>,
}

/// Exhaustive L2 index: every query is compared against every vector.
#[derive(Debug, Clone)]
pub struct FlatStore {
    dimensions: usize,
    entries: Vec<IndexEntry>,
    ids: HashSet<ChunkId>,
}

impl FlatStore {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
            ids: HashSet::new(),
        }
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<(), StoreError> {
        if vector.len() != self.dimensions {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl VectorStore for FlatStore {
    fn insert(&mut self, id: ChunkId, vector: Vec<f32>) -> Result<(), StoreError> {
        self.check_dimensions(&vector)?;
        if !self.ids.insert(id) {
            return Err(StoreError::DuplicateId(id));
        }
        self.entries.push(IndexEntry { id, vector });
        Ok(())
    }

    fn search(&self, query: &[f32], limit: usize) -> Result<Vec<Neighbor>, StoreError> {
        if self.entries.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        self.check_dimensions(query)?;

        let mut results: Vec<Neighbor> = self
            .entries
            .iter()
            .map(|entry| Neighbor {
                id: entry.id,
                distance: squared_l2(query, &entry.vector),
            })
            .collect();

        // equal distances fall back to ascending id
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        results.truncate(limit);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
