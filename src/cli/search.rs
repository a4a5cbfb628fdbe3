use anyhow::Result;
use console::{style, Emoji};
use std::sync::Arc;

use crate::app;
use crate::config::Config;
use crate::emit::SearchOutput;
use crate::scan::PdfExtractor;
use crate::search::{SearchResult, Searcher};

use super::theme::spinner;

static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

pub async fn run_search(config: &Config, query: &str, limit: usize, json: bool) -> Result<()> {
    let pb = spinner(format!(
        "Building index from {}...",
        config.documents_dir.display()
    ));
    let built = async {
        let embedder = app::load_embedder(&config.embedder).await?;
        let corpus =
            app::build_corpus(config, Arc::clone(&embedder), Arc::new(PdfExtractor)).await?;
        anyhow::Ok(Searcher::new(Arc::new(corpus), embedder))
    }
    .await;
    pb.finish_and_clear();
    let searcher = built?;

    let results = searcher.search(query, limit).await?;

    if json {
        println!("{}", SearchOutput::new(query, &results).to_json());
    } else {
        print_results(query, &results);
    }

    Ok(())
}

fn print_results(query: &str, results: &[SearchResult]) {
    if results.is_empty() {
        println!("No results found for: {}", style(query).italic());
        return;
    }

    println!(
        "\n{}Found {} results for: {}\n",
        SEARCH,
        style(results.len()).cyan(),
        style(query).yellow().bold()
    );

    for (i, result) in results.iter().enumerate() {
        let chunk = &result.chunk;
        println!(
            "{} {}. {} {}",
            FILE,
            style(i + 1).dim(),
            style(chunk.source.display()).green(),
            style(format!("(page {}, chunk {})", chunk.page, chunk.id)).dim()
        );
        println!(
            "   Distance: {}",
            style(format!("{:.4}", result.distance)).cyan()
        );
        println!("   {}", style(preview(&chunk.content, 200)).dim());
        println!();
    }
}

/// First `max_chars` characters on one line, with an ellipsis when cut.
fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
