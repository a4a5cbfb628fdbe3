use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use console::style;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::answer::AnsweringService;
use crate::app;
use crate::config::Config;

use super::theme::spinner;

#[derive(Deserialize)]
struct AskForm {
    #[serde(default)]
    question: String,
}

pub async fn run_serve(config: &Config, bind: SocketAddr) -> Result<()> {
    let pb = spinner(format!(
        "Building index from {}...",
        config.documents_dir.display()
    ));
    let service = app::bootstrap(config).await;
    pb.finish_and_clear();
    let service = Arc::new(service?);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    println!(
        "Serving on {}",
        style(format!("http://{}", bind)).cyan().bold()
    );
    info!(%bind, "web form listening");

    axum::serve(listener, router(service))
        .await
        .context("Web server failed")
}

pub fn router(service: Arc<AnsweringService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .with_state(service)
}

async fn index() -> Html<String> {
    Html(render_page("", None))
}

async fn ask(
    State(service): State<Arc<AnsweringService>>,
    Form(form): Form<AskForm>,
) -> (StatusCode, Html<String>) {
    let question = form.question.as_str();
    if question.trim().is_empty() {
        return (StatusCode::OK, Html(render_page("", None)));
    }

    match service.ask(question).await {
        Ok(answer) => (
            StatusCode::OK,
            Html(render_page(question, Some(&answer))),
        ),
        Err(e) => {
            error!("question failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(question, Some(&format!("Error: {:#}", e)))),
            )
        }
    }
}

fn render_page(question: &str, answer: Option<&str>) -> String {
    let answer_section = answer
        .map(|a| {
            format!(
                "<h3>Answer:</h3>\n<div class=\"answer\">{}</div>\n",
                html_escape::encode_text(a)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Personal Finance RAG Assistant</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
input[type=text] {{ width: 100%; padding: 0.5rem; }}
.answer {{ white-space: pre-wrap; }}
</style>
</head>
<body>
<h1>📊 Personal Finance RAG Assistant</h1>
<form method="post" action="/ask">
<label for="question">Ask a question about personal finance:</label>
<input type="text" id="question" name="question" value="{question}">
<button type="submit">Ask !</button>
</form>
{answer_section}</body>
</html>
"#,
        question = html_escape::encode_double_quoted_attribute(question),
        answer_section = answer_section,
    )
}
