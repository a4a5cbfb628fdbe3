use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::search::SearchResult;

#[derive(Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<HitOutput>,
}

#[derive(Serialize)]
pub struct HitOutput {
    pub rank: usize,
    pub chunk_id: usize,
    pub source: String,
    pub page: usize,
    pub distance: f32,
    pub content: String,
}

impl SearchOutput {
    pub fn new(query: &str, results: &[SearchResult]) -> Self {
        let results = results
            .iter()
            .enumerate()
            .map(|(i, r)| HitOutput {
                rank: i + 1,
                chunk_id: r.chunk.id.0,
                source: r.chunk.source.display().to_string(),
                page: r.chunk.page,
                distance: r.distance,
                content: r.chunk.content.clone(),
            })
            .collect();

        Self {
            query: query.to_string(),
            generated_at: Utc::now(),
            results,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Chunk, ChunkId};
    use std::path::PathBuf;

    #[test]
    fn test_search_output_shape() {
        let results = vec![SearchResult::new(
            Chunk {
                id: ChunkId(4),
                source: PathBuf::from("documents/taxes.pdf"),
                page: 2,
                content: "Standard deduction".to_string(),
            },
            0.25,
        )];

        let json: serde_json::Value =
            serde_json::from_str(&SearchOutput::new("deduction", &results).to_json()).unwrap();

        assert_eq!(json["query"], "deduction");
        assert_eq!(json["results"][0]["rank"], 1);
        assert_eq!(json["results"][0]["chunk_id"], 4);
        assert_eq!(json["results"][0]["page"], 2);
        assert_eq!(json["results"][0]["source"], "documents/taxes.pdf");
        assert_eq!(json["results"][0]["distance"], 0.25);
    }
}
