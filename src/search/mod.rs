pub mod chunker;
pub mod corpus;
pub mod embedder;
pub mod indexer;
pub mod searcher;
pub mod store;

pub use chunker::Chunker;
pub use corpus::{Corpus, RetrievalDrift};
pub use embedder::{create_embedder, Embedder, EmbedderConfig};
pub use indexer::Indexer;
pub use searcher::Searcher;
pub use store::{
    Chunk, ChunkId, FlatStore, IndexStats, Neighbor, SearchResult, StoreError, VectorStore,
};
