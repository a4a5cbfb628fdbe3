use anyhow::Result;
use console::style;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::answer::AnsweringService;
use crate::app;
use crate::config::Config;

use super::theme::{print_banner, spinner};

const PROMPT: &str = "Ask a question (type 'exit' to quit): ";

pub async fn run_ask(config: &Config, question: Option<&str>) -> Result<()> {
    let pb = spinner(format!(
        "Building index from {}...",
        config.documents_dir.display()
    ));
    let service = app::bootstrap(config).await;
    pb.finish_and_clear();
    let service = service?;

    if let Some(question) = question {
        let answer = service.ask(question).await?;
        println!("{}", answer);
        return Ok(());
    }

    print_banner();
    println!(
        "  Indexed {} chunks from {}\n",
        style(service.searcher().corpus().len()).cyan(),
        style(config.documents_dir.display()).green()
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_loop(&service, stdin, &mut stdout).await
}

fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Read questions line by line until `exit` or end of input.
pub async fn run_loop<R, W>(service: &AnsweringService, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if is_exit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let answer = service.ask(&line).await?;
        writeln!(out, "\nAnswer:\n{}", answer)?;
    }

    Ok(())
}
