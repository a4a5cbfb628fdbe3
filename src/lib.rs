pub mod answer;
pub mod app;
pub mod cli;
pub mod config;
pub mod emit;
pub mod logging;
pub mod scan;
pub mod search;

pub use answer::{AnsweringService, GenerationError, Generator};
pub use config::{Config, ConfigError};
pub use search::{Chunk, ChunkId, Corpus, Embedder, Searcher};
