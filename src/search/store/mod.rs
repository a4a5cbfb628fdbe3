mod flat;
mod types;

pub use flat::FlatStore;
pub use types::{Chunk, ChunkId, IndexStats, Neighbor, SearchResult};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("vector has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("chunk {0} is already indexed")]
    DuplicateId(ChunkId),
}

/// Nearest-neighbour storage for chunk embeddings.
pub trait VectorStore: Send + Sync {
    fn insert(&mut self, id: ChunkId, vector: Vec<f32>) -> Result<(), StoreError>;
    /// Up to `limit` neighbours, closest first.
    fn search(&self, query: &[f32], limit: usize) -> Result<Vec<Neighbor>, StoreError>;
    fn len(&self) -> usize;
    fn dimensions(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Squared Euclidean distance. Callers guarantee equal lengths.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
