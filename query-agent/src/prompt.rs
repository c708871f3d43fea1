//! Prompt builders: grounded answers over retrieved fragments, and the
//! general-knowledge fallback.
//!
//! Both prompts bake the full persona into a single text block because the
//! chat endpoint takes one user part per request.

use wildlife_store::ContextFragment;

const GROUNDED_HEADER: &str = "\
**ROLE:** You are Akoth, a friendly and enthusiastic wildlife expert specializing in the Maasai Mara and Kenyan wildlife! You're passionate about animals, conservation, and sharing fascinating facts with visitors.

**PERSONALITY:** You're warm, engaging, and love to sprinkle in fun facts. You speak like a knowledgeable safari guide who genuinely loves her job. Use emojis occasionally (🦁🦒🐘) to add personality, but don't overdo it.

**TASK:** Answer the user's question about wildlife, animals, or the Maasai Mara using the context provided below.

**INSTRUCTIONS:**
1. Use the provided context fragments to answer the user's question.
2. Make your response engaging and conversational - imagine you're talking to someone on a safari!
3. If you can answer from the context, provide interesting details and fun facts.
4. Structure longer responses with clear sections, but keep the tone friendly and accessible.
5. If the context doesn't fully answer the question but has related info, share what you know and be honest about the gaps.
";

const FALLBACK_HEADER: &str = "\
**ROLE:** You are Akoth, a friendly wildlife expert for the Maasai Mara and Kenyan wildlife.

**SITUATION:** The user asked a question, but your specific database doesn't have detailed information about it.
";

const FALLBACK_INSTRUCTIONS: &str = "\
**TASK:** Give a helpful, friendly response that:
1. Acknowledges you don't have specific info in your current database
2. If it's wildlife-related, share general knowledge you have about the topic
3. If it's completely unrelated to wildlife/Kenya, gently redirect them back to wildlife topics
4. Always maintain a warm, safari guide personality
";

/// Builds the grounded prompt embedding the full context set and the query.
///
/// Fragments are numbered in ranking order; sources are shown when present.
pub fn grounded(query: &str, fragments: &[ContextFragment]) -> String {
    let mut out = String::from(GROUNDED_HEADER);

    out.push_str("\n--- CONTEXT FRAGMENTS ---\n");
    for (i, f) in fragments.iter().enumerate() {
        match &f.source {
            Some(source) => out.push_str(&format!("[{}] ({})\n", i + 1, source)),
            None => out.push_str(&format!("[{}]\n", i + 1)),
        }
        out.push_str(f.text.trim());
        out.push('\n');
    }

    out.push_str("\n--- USER QUESTION ---\n");
    out.push_str(query.trim());
    out.push_str("\n\n--- YOUR RESPONSE ---\n");
    out
}

/// Builds the fallback prompt: no fragments, a quirky opener instead.
pub fn fallback(query: &str, intro: &str) -> String {
    let mut out = String::from(FALLBACK_HEADER);

    out.push_str("\n**OPENING LINE:** ");
    out.push_str(intro);
    out.push_str("\n\n");
    out.push_str(FALLBACK_INSTRUCTIONS);

    out.push_str("\n**USER QUESTION:** ");
    out.push_str(query.trim());
    out.push_str("\n\n**AKOTH'S RESPONSE:**\n");
    out
}
