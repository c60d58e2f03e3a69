// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt text sent to the answer generator.

/// System message for every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful business analyst assistant. \
Analyze goal and project data to provide actionable insights.";

/// Wrap the assembled context and the user's question in the instruction template.
pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "Based on the following goals and milestones data, please answer the user's question.\n\n\
         CONTEXT DATA:\n{context}\n\n\
         USER QUESTION: {query}\n\n\
         Please provide a concise answer that:\n\
         1. References goals by their actual titles and owners\n\
         2. Summarizes key issues and current status\n\
         3. Identifies patterns across the data\n\
         4. Suggests actionable next steps\n\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_then_question() {
        let prompt = build_prompt("Who owns billing?", "**Billing** (owned by Tom):");
        let context_at = prompt.find("CONTEXT DATA:\n**Billing**").unwrap();
        let question_at = prompt.find("USER QUESTION: Who owns billing?").unwrap();
        assert!(context_at < question_at);
        assert!(prompt.ends_with("Answer:"));
        assert!(prompt.contains("4. Suggests actionable next steps"));
    }
}
