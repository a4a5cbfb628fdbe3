use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::ChunkingConfig;
use crate::scan::{list_pdf_files, load_files, PageExtractor};

use super::chunker::Chunker;
use super::corpus::Corpus;
use super::embedder::Embedder;
use super::store::{Chunk, FlatStore, IndexStats, VectorStore};

const BATCH_SIZE: usize = 32;

/// Builds a [`Corpus`] from a folder of PDFs: load, chunk, embed, index.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn PageExtractor>,
    chunker: Chunker,
}

impl Indexer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn PageExtractor>,
        config: &ChunkingConfig,
    ) -> Result<Self> {
        let chunker = Chunker::from_config(config)?;
        Ok(Self {
            embedder,
            extractor,
            chunker,
        })
    }

    pub async fn build(&self, folder: &Path) -> Result<Corpus> {
        let started = Instant::now();

        info!(folder = %folder.display(), "loading PDFs");
        let files = list_pdf_files(folder)?;
        let pages = load_files(&files, self.extractor.as_ref())?;
        let files_processed = files.len();

        let chunks = self.chunker.chunk_pages(&pages, 0);
        info!(pages = pages.len(), chunks = chunks.len(), "chunked text");

        let store = self.embed_chunks(&chunks).await?;

        let stats = IndexStats {
            files_processed,
            pages_loaded: pages.len(),
            chunks_created: chunks.len(),
            dimensions: store.dimensions(),
            built_at: Some(Utc::now()),
            build_millis: started.elapsed().as_millis(),
        };
        info!(
            chunks = stats.chunks_created,
            millis = stats.build_millis,
            "vector index ready"
        );

        Ok(Corpus::new(chunks, store, stats))
    }

    /// Embed chunks in batches and index each vector under its chunk id.
    async fn embed_chunks(&self, chunks: &[Chunk]) -> Result<FlatStore> {
        let mut store = FlatStore::new(self.embedder.dimensions());

        for batch in chunks.chunks(BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;

            if embeddings.len() != batch.len() {
                anyhow::bail!(
                    "Embedder returned {} vectors for {} chunks",
                    embeddings.len(),
                    batch.len()
                );
            }

            for (chunk, vector) in batch.iter().zip(embeddings) {
                store
                    .insert(chunk.id, vector)
                    .with_context(|| format!("Failed to index chunk {}", chunk.id))?;
            }
            debug!(indexed = store.len(), total = chunks.len(), "embedded batch");
        }

        Ok(store)
    }
}
