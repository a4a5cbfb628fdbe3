use std::collections::HashMap;

use super::store::{Chunk, ChunkId, FlatStore, IndexStats, Neighbor, SearchResult, VectorStore};

/// A search hit whose id has no chunk behind it.
#[derive(Debug, thiserror::Error)]
#[error("index returned chunk {0}, which is not in the corpus")]
pub struct RetrievalDrift(pub ChunkId);

/// The immutable result of one corpus build: chunk texts by id and the
/// vector index over their embeddings.
#[derive(Debug)]
pub struct Corpus {
    chunks: HashMap<ChunkId, Chunk>,
    store: FlatStore,
    stats: IndexStats,
}

impl Corpus {
    pub(crate) fn new(chunks: Vec<Chunk>, store: FlatStore, stats: IndexStats) -> Self {
        let chunks = chunks.into_iter().map(|c| (c.id, c)).collect();
        Self {
            chunks,
            store,
            stats,
        }
    }

    pub fn store(&self) -> &FlatStore {
        &self.store
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    /// Attach chunk text to raw index hits, keeping their order.
    pub fn resolve(&self, neighbors: &[Neighbor]) -> Result<Vec<SearchResult>, RetrievalDrift> {
        neighbors
            .iter()
            .map(|n| {
                self.get(n.id)
                    .cloned()
                    .map(|chunk| SearchResult::new(chunk, n.distance))
                    .ok_or(RetrievalDrift(n.id))
            })
            .collect()
    }

    pub fn dimensions(&self) -> usize {
        self.store.dimensions()
    }

    pub fn vector_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn chunk(id: usize, content: &str) -> Chunk {
        Chunk {
            id: ChunkId(id),
            source: PathBuf::from("a.pdf"),
            page: 1,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_resolve_keeps_search_order() {
        let corpus = Corpus::new(
            vec![chunk(0, "zero"), chunk(1, "one")],
            FlatStore::new(2),
            IndexStats::default(),
        );

        let hits = vec![
            Neighbor {
                id: ChunkId(1),
                distance: 0.1,
            },
            Neighbor {
                id: ChunkId(0),
                distance: 0.4,
            },
        ];
        let results = corpus.resolve(&hits).unwrap();

        assert_eq!(results[0].chunk.content, "one");
        assert_eq!(results[1].chunk.content, "zero");
        assert_eq!(results[1].distance, 0.4);
    }

    #[test]
    fn test_resolve_unknown_id() {
        let corpus = Corpus::new(vec![chunk(0, "zero")], FlatStore::new(2), IndexStats::default());
        let hits = vec![Neighbor {
            id: ChunkId(9),
            distance: 0.0,
        }];

        let err = corpus.resolve(&hits).unwrap_err();
        assert_eq!(err.0, ChunkId(9));
    }
}
