use crate::search::SearchResult;

/// Retrieved chunk texts joined by newlines, in retrieval order.
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction prompt restricting the model to `context`.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a financial assistant.\n\
         Answer the question using ONLY the context below.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question:\n\
         {question}\n"
    )
}
