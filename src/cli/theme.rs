use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn print_banner() {
    println!();
    println!(
        "  {}  {}",
        style("📊").cyan(),
        style("Personal Finance RAG Assistant").cyan().bold()
    );
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("  {} {}", style("✗").red(), message);
}

/// Spinner on stderr for long startup steps.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(template);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
