//! Prompt templates for answer generation.
//!
//! Templates use `format!()` interpolation so a missing variable is a
//! compile-time error.

/// Build the question-answering prompt from the selected context and the
/// user's question. The model is told to stay within the context.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the following question based only on the context provided. \
         Be clear and concise.\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}\n\nAnswer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = answer_prompt("Hello world", "what does the page say?");
        assert!(prompt.contains("Context:\nHello world"));
        assert!(prompt.contains("Question:\nwhat does the page say?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn prompt_keeps_instruction_header() {
        let prompt = answer_prompt("ctx", "q");
        assert!(prompt.starts_with(
            "Answer the following question based only on the context provided."
        ));
    }
}
