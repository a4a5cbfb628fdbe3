//! Startup wiring. Order matters: the credential is validated before any
//! document is read, and the corpus is complete before the answering
//! service exists.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::answer::{AnsweringService, GeminiClient, Generator};
use crate::config::Config;
use crate::scan::{PageExtractor, PdfExtractor};
use crate::search::{create_embedder, Corpus, Embedder, EmbedderConfig, Indexer, Searcher};

/// Load the configured embedder off the async runtime.
pub async fn load_embedder(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>> {
    let config = config.clone();
    let embedder = tokio::task::spawn_blocking(move || create_embedder(&config))
        .await
        .context("Embedding model loader panicked")??;

    info!(dimensions = embedder.dimensions(), "embedder ready");
    Ok(embedder)
}

pub async fn build_corpus(
    config: &Config,
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn PageExtractor>,
) -> Result<Corpus> {
    let indexer = Indexer::new(embedder, extractor, &config.chunking)?;
    indexer.build(&config.documents_dir).await.with_context(|| {
        format!(
            "Failed to build index from {}",
            config.documents_dir.display()
        )
    })
}

/// Assemble an answering service from already constructed parts.
pub async fn assemble(
    config: &Config,
    embedder: Arc<dyn Embedder>,
    extractor: Arc<dyn PageExtractor>,
    generator: Arc<dyn Generator>,
) -> Result<AnsweringService> {
    let corpus = build_corpus(config, Arc::clone(&embedder), extractor).await?;
    info!(chunks = corpus.len(), "corpus ready");

    let searcher = Searcher::new(Arc::new(corpus), embedder);
    Ok(AnsweringService::new(
        searcher,
        generator,
        config.search.top_k,
    ))
}

/// Production startup: Gemini client, local embedder, PDF corpus.
pub async fn bootstrap(config: &Config) -> Result<AnsweringService> {
    let generator: Arc<dyn Generator> = Arc::new(GeminiClient::from_config(&config.generation)?);
    let embedder = load_embedder(&config.embedder).await?;

    assemble(config, embedder, Arc::new(PdfExtractor), generator).await
}
