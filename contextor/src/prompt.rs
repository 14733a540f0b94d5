//! Prompt builder: grounding instruction + context block + question.

/// Builds the final prompt.
///
/// The instruction restricting the model to the supplied context is the
/// factual-grounding guarantee of the whole system and must stay intact.
/// Context and question are embedded verbatim.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Use ONLY the following context to answer.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer:\n"
    )
}
