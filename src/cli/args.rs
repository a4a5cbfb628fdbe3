use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "finrag", version, about = "Ask questions about your personal-finance PDFs")]
pub struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folder containing the PDF documents
    #[arg(long, global = true)]
    pub documents: Option<PathBuf>,

    /// Number of chunks retrieved per question
    #[arg(long, global = true)]
    pub top_k: Option<usize>,

    /// Gemini model identifier
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer questions interactively (default)
    Ask {
        /// Answer a single question and exit
        #[arg(short, long)]
        question: Option<String>,
    },
    /// Serve a one-page question form over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },
    /// Show the chunks retrieved for a query without calling the model
    Search {
        query: String,

        #[arg(short, long, default_value_t = 3)]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the index and print statistics
    Index,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.documents {
            config.documents_dir = dir.clone();
        }
        if let Some(top_k) = self.top_k {
            config.search.top_k = top_k;
        }
        if let Some(model) = &self.model {
            config.generation.model = model.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let args = Args::parse_from(["finrag"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "finrag",
            "--documents",
            "statements",
            "--top-k",
            "5",
            "ask",
            "--question",
            "What is APR?",
        ]);
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.documents_dir, PathBuf::from("statements"));
        assert_eq!(config.search.top_k, 5);
        assert!(matches!(
            args.command,
            Some(Command::Ask { question: Some(ref q) }) if q == "What is APR?"
        ));
    }

    #[test]
    fn test_search_args() {
        let args = Args::parse_from(["finrag", "search", "roth ira", "--limit", "2", "--json"]);
        match args.command {
            Some(Command::Search { query, limit, json }) => {
                assert_eq!(query, "roth ira");
                assert_eq!(limit, 2);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_default_bind() {
        let args = Args::parse_from(["finrag", "serve"]);
        match args.command {
            Some(Command::Serve { bind }) => assert_eq!(bind.port(), 8501),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
