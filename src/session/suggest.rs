//! Canned replies used when the suggestion service is unavailable

use rand::Rng;

pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Thank you for bringing this to our attention. We're looking into it.",
    "I understand your concern. Let me help you resolve this issue.",
    "Thanks for reaching out. Our team will address this promptly.",
];

/// Sample one fallback uniformly
pub fn pick_fallback<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FALLBACK_SUGGESTIONS[rng.random_range(0..FALLBACK_SUGGESTIONS.len())]
}
