use anyhow::Result;
use console::{style, Emoji};
use std::sync::Arc;

use crate::app;
use crate::config::Config;
use crate::scan::PdfExtractor;
use crate::search::IndexStats;

use super::theme::spinner;

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

/// Build the in-memory index once and report what went into it.
pub async fn run_index(config: &Config) -> Result<()> {
    let pb = spinner(format!(
        "Indexing {}...",
        config.documents_dir.display()
    ));
    let built = async {
        let embedder = app::load_embedder(&config.embedder).await?;
        app::build_corpus(config, embedder, Arc::new(PdfExtractor)).await
    }
    .await;
    pb.finish_and_clear();
    let corpus = built?;

    println!("\n{}Indexing complete!\n", SUCCESS);
    print_stats(corpus.stats());

    if corpus.is_empty() {
        println!(
            "\n{}No text found. Put PDF files in {}",
            INFO,
            style(config.documents_dir.display()).yellow()
        );
    }

    Ok(())
}

fn print_stats(stats: &IndexStats) {
    println!("  Files processed: {}", style(stats.files_processed).green());
    println!("  Pages loaded:    {}", style(stats.pages_loaded).green());
    println!("  Chunks created:  {}", style(stats.chunks_created).cyan());
    println!("  Dimensions:      {}", stats.dimensions);
    println!("  Build time:      {} ms", style(stats.build_millis).dim());
    if let Some(built) = stats.built_at {
        println!("  Built at:        {}", built.format("%Y-%m-%d %H:%M:%S"));
    }
}
