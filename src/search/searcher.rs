use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use super::corpus::Corpus;
use super::embedder::Embedder;
use super::store::{SearchResult, VectorStore};

pub struct Searcher {
    corpus: Arc<Corpus>,
    embedder: Arc<dyn Embedder>,
}

impl Searcher {
    pub fn new(corpus: Arc<Corpus>, embedder: Arc<dyn Embedder>) -> Self {
        Self { corpus, embedder }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Top-`limit` chunks for `query` by L2 distance, closest first.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let query_vector = self.embedder.embed(query).await?;
        let neighbors = self.corpus.store().search(&query_vector, limit)?;
        debug!(hits = neighbors.len(), limit, "vector search");

        Ok(self.corpus.resolve(&neighbors)?)
    }
}
