use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::search::Searcher;

use super::prompt::{build_context, build_prompt};
use super::Generator;

/// Answers questions from a fully built corpus.
///
/// Constructing the service requires the [`Searcher`], and therefore the
/// corpus, to exist already; there is no partially indexed state to query.
pub struct AnsweringService {
    searcher: Searcher,
    generator: Arc<dyn Generator>,
    top_k: usize,
}

impl AnsweringService {
    pub fn new(searcher: Searcher, generator: Arc<dyn Generator>, top_k: usize) -> Self {
        Self {
            searcher,
            generator,
            top_k,
        }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieve context for `question` and build the model prompt.
    pub async fn prompt_for(&self, question: &str) -> Result<String> {
        let results = self.searcher.search(question, self.top_k).await?;
        debug!(retrieved = results.len(), "retrieved context");

        let context = build_context(&results);
        Ok(build_prompt(&context, question))
    }

    /// Answer `question` using only retrieved context. The model output is
    /// returned verbatim.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let prompt = self.prompt_for(question).await?;

        info!(model = self.generator.model(), "generating answer");
        let answer = self.generator.generate(&prompt).await?;
        Ok(answer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::answer::GenerationError;
    use crate::config::ChunkingConfig;
    use crate::search::indexer::tests::{LetterEmbedder, TextPages};
    use crate::search::{Embedder, Indexer};
    use async_trait::async_trait;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every prompt and answers with a fixed string.
    #[derive(Default)]
    pub(crate) struct RecordingGenerator {
        pub prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Generator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Compound interest.".to_string())
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::RetriesExhausted {
                attempts: 3,
                last_error: "HTTP 503".to_string(),
            })
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    pub(crate) async fn service_over(
        folder: &Path,
        generator: Arc<dyn Generator>,
    ) -> AnsweringService {
        let embedder: Arc<dyn Embedder> = Arc::new(LetterEmbedder);
        let indexer = Indexer::new(
            Arc::clone(&embedder),
            Arc::new(TextPages),
            &ChunkingConfig::default(),
        )
        .unwrap();
        let corpus = indexer.build(folder).await.unwrap();
        AnsweringService::new(Searcher::new(Arc::new(corpus), embedder), generator, 3)
    }

    #[tokio::test]
    async fn test_single_page_question() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("savings.pdf"),
            "Compound interest grows savings over time.",
        )
        .unwrap();
        let generator = Arc::new(RecordingGenerator::default());
        let service = service_over(dir.path(), generator.clone()).await;

        assert_eq!(service.searcher().corpus().len(), 1);

        let answer = service.ask("What grows savings?").await.unwrap();
        assert_eq!(answer, "Compound interest.");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Compound interest grows savings over time."));
        assert!(prompts[0].contains("What grows savings?"));
    }

    #[tokio::test]
    async fn test_context_limited_to_top_k() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("notes.pdf"),
            "alpha\x0cbravo\x0ccharlie\x0cdelta\x0cecho",
        )
        .unwrap();
        let generator = Arc::new(RecordingGenerator::default());
        let service = service_over(dir.path(), generator.clone()).await;

        let prompt = service.prompt_for("bravo").await.unwrap();
        let context = prompt
            .split("Context:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\nQuestion:").next())
            .unwrap();

        assert_eq!(context.lines().count(), 3);
        assert_eq!(context.lines().next(), Some("bravo"));
    }

    #[tokio::test]
    async fn test_empty_corpus_still_calls_model() {
        let dir = TempDir::new().unwrap();
        let generator = Arc::new(RecordingGenerator::default());
        let service = service_over(dir.path(), generator.clone()).await;

        let answer = service.ask("What is an index fund?").await.unwrap();
        assert_eq!(answer, "Compound interest.");

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Context:\n\n\nQuestion:\nWhat is an index fund?"));
    }

    #[tokio::test]
    async fn test_generation_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let service = service_over(dir.path(), Arc::new(FailingGenerator)).await;

        let err = service.ask("anything").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerationError>(),
            Some(GenerationError::RetriesExhausted { .. })
        ));
    }
}
