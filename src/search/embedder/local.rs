use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::ConfigError;

use super::Embedder;

/// Sentence embeddings computed in-process with an ONNX model.
pub struct LocalEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    dimensions: usize,
}

fn resolve_model(name: &str) -> Result<EmbeddingModel, ConfigError> {
    match name {
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            Ok(EmbeddingModel::AllMiniLML6V2)
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            Ok(EmbeddingModel::AllMiniLML12V2)
        }
        "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        other => Err(ConfigError::UnknownEmbeddingModel(other.to_string())),
    }
}

impl LocalEmbedder {
    pub fn new(model_name: &str) -> Result<Self> {
        let model = resolve_model(model_name)?;

        info!(model = model_name, "loading local embedding model");
        let mut text_model =
            TextEmbedding::try_new(TextInitOptions::new(model).with_show_download_progress(true))
                .map_err(|e| anyhow!("Failed to load embedding model {}: {}", model_name, e))?;

        // Probe once to learn the output dimension
        let probe = text_model
            .embed(vec!["dimension probe"], None)
            .map_err(|e| anyhow!("Failed to run embedding model: {}", e))?;
        let dimensions = probe
            .first()
            .map(Vec::len)
            .ok_or_else(|| anyhow!("Embedding model returned no vector"))?;

        debug!(dimensions, "embedding model ready");

        Ok(Self {
            model: Arc::new(Mutex::new(text_model)),
            dimensions,
        })
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let inputs = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|e| anyhow!("Embedding model lock poisoned: {}", e))?;
            model
                .embed(inputs, None)
                .map_err(|e| anyhow!("Embedding failed: {}", e))
        })
        .await?
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        assert!(matches!(
            resolve_model("all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("BAAI/bge-small-en-v1.5"),
            Ok(EmbeddingModel::BGESmallENV15)
        ));
    }

    #[test]
    fn test_resolve_unknown_model() {
        assert!(matches!(
            resolve_model("text-embedding-3-small"),
            Err(ConfigError::UnknownEmbeddingModel(_))
        ));
    }

    #[test]
    fn test_unknown_model_fails_before_download() {
        let err = LocalEmbedder::new("nope").err().unwrap();
        assert!(err.to_string().contains("unknown embedding model"));
    }
}
