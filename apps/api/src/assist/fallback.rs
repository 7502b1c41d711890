//! Canned replies for the public chat endpoint when the model is
//! unreachable. The chat contract is that callers never see a raw error,
//! so every provider failure lands here.

use rand::seq::SliceRandom;

/// Ordered (keywords, reply) rules evaluated top-to-bottom against the
/// normalized message; the first keyword hit wins. More specific intents
/// sit above the broader ones.
const FALLBACK_RULES: &[(&[&str], &str)] = &[
    (
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
        "Hello! I'm the portfolio assistant. Ask me about the projects, work \
         experience, or skills showcased on this site.",
    ),
    (
        &["contact", "email", "reach", "hire", "hiring", "phone"],
        "You can reach the site owner through the contact form on this site. \
         Messages land straight in their inbox.",
    ),
    (
        &["project", "portfolio", "built", "build", "shipped"],
        "The projects section lists everything the owner has built, along \
         with the tech stack behind each one. Open any card for the details.",
    ),
    (
        &["skill", "tech", "stack", "language", "framework", "tool"],
        "The owner's core stack is tagged on every project and experience \
         entry. The tech tags give the full picture.",
    ),
    (
        &["experience", "job", "career", "company", "role", "work"],
        "The experience section walks through each role, the company, and \
         what was accomplished there.",
    ),
];

/// Default apologies when no rule matches.
const DEFAULT_REPLIES: &[&str] = &[
    "Sorry, I'm having trouble generating a proper reply right now. Please \
     browse the site or try again in a moment.",
    "I can't reach my language model at the moment. The projects and \
     experience sections cover most questions, or use the contact form.",
    "Something went wrong on my side. Feel free to look around the portfolio \
     or leave a message through the contact form.",
];

/// Picks a canned reply for the message. Always returns a non-empty string.
pub fn fallback_reply(message: &str) -> String {
    let normalized = message.to_lowercase();
    for (keywords, reply) in FALLBACK_RULES {
        if keywords.iter().any(|k| keyword_matches(&normalized, k)) {
            return (*reply).to_string();
        }
    }
    DEFAULT_REPLIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_REPLIES[0])
        .to_string()
}

/// Multi-word keywords match as substrings. Single words match whole
/// tokens, with a prefix allowance for stems of 4+ characters so "skill"
/// also catches "skills" and "tech" catches "technologies". Short words
/// stay exact: "hi" must not fire inside "architecture".
fn keyword_matches(normalized: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return normalized.contains(keyword);
    }
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword || (keyword.len() >= 4 && word.starts_with(keyword)))
}
