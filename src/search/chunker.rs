use crate::config::{ChunkingConfig, ConfigError};
use crate::scan::PageText;

use super::store::{Chunk, ChunkId};

/// Fixed-size, character-offset chunking with overlap.
///
/// A text of at most `max_chars` characters is a single chunk. Longer text
/// is windowed: chunk `i + 1` starts `max_chars - overlap_chars` characters
/// after chunk `i`, until the start offset reaches the end of the text.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chars: usize,
    overlap_chars: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            max_chars: 1500,
            overlap_chars: 100,
        }
    }
}

impl Chunker {
    pub fn new(max_chars: usize, overlap_chars: usize) -> Result<Self, ConfigError> {
        if max_chars == 0 || overlap_chars >= max_chars {
            return Err(ConfigError::InvalidChunking {
                chunk_size: max_chars,
                overlap: overlap_chars,
            });
        }
        Ok(Self {
            max_chars,
            overlap_chars,
        })
    }

    pub fn from_config(config: &ChunkingConfig) -> Result<Self, ConfigError> {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Split `text` into overlapping windows of at most `max_chars` characters.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // byte offset of every char boundary, including the end
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;
        if char_count == 0 {
            return Vec::new();
        }
        if char_count <= self.max_chars {
            return vec![text];
        }
        let step = self.max_chars - self.overlap_chars;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < char_count {
            let end = (start + self.max_chars).min(char_count);
            chunks.push(&text[bounds[start]..bounds[end]]);
            start += step;
        }

        chunks
    }

    /// Chunk every page in order, numbering chunks from `first_id` upward.
    pub fn chunk_pages(&self, pages: &[PageText], first_id: usize) -> Vec<Chunk> {
        let mut next_id = first_id;
        let mut chunks = Vec::new();

        for page in pages {
            for content in self.split(&page.text) {
                chunks.push(Chunk {
                    id: ChunkId(next_id),
                    source: page.source.clone(),
                    page: page.page,
                    content: content.to_string(),
                });
                next_id += 1;
            }
        }

        chunks
    }
}
