//! Fixed prompt template and sampling parameters for article generation.

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Upper bound on generated tokens per article.
pub const MAX_TOKENS: u32 = 2000;

/// Sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.7;

/// System role framing sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are a professional blog writer who creates engaging, \
    well-structured, and informative blog posts.";

/// Build the user prompt asking for a full article about `topic`.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Write a comprehensive, engaging blog post about \"{topic}\".\n\
         The blog post should be:\n\
         - Well-structured with clear sections\n\
         - Informative and engaging\n\
         - Around 800-1200 words\n\
         - Include an introduction, main content sections, and a conclusion\n\
         - Use a professional but accessible tone\n\
         \n\
         Topic: {topic}"
    )
}
