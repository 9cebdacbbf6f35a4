pub const EDUCATIONAL_KEYWORDS: &[&str] = &[
    "education",
    "learning",
    "tutorial",
    "course",
    "lesson",
    "study",
    "research",
    "academic",
    "science",
    "university",
    "college",
    "school",
    "knowledge",
    "teach",
    "learn",
    "student",
    "professor",
    "lecture",
    "documentation",
    "guide",
    "how-to",
    "explanation",
    "theory",
    "analysis",
    "methodology",
    "experiment",
    "data",
    "statistics",
];

pub const NON_EDUCATIONAL_PATTERNS: &[&str] = &[
    "entertainment",
    "celebrity",
    "gossip",
    "gaming",
    "meme",
    "viral",
    "prank",
    "horoscope",
    "giveaway",
    "clickbait",
    "shopping deals",
];

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Sum of per-keyword occurrence counts. Expects lowercased text.
pub fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| count_occurrences(text, keyword))
        .sum()
}
