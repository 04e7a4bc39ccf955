// Tokenization shared by the lemmatizer and the lexical metrics

/// Characters replaced by a space before splitting
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '«', '»', '“', '”',
    '‘', '’', '/', '\\', '*', '#', '%', '&', '+', '=', '<', '>', '|', '~', '`', '^', '$', '@',
];

/// Characters removed outright, so hyphenated compounds join ("fat-lagret" → "fatlagret")
const JOINERS: &[char] = &['-', '_', '–', '—'];

/// Closed list of function words dropped before any lookup
pub const STOPWORDS: &[&str] = &[
    "og", "i", "på", "med", "av", "en", "et", "ei", "er", "som", "til", "det", "den", "de",
    "litt", "noe", "noen", "men", "for", "at", "har", "ikke", "fra", "om", "så", "eller", "mot",
    "ved", "var", "blir", "være", "jeg", "vi", "du", "seg", "sin", "sitt", "sine", "dette",
    "denne", "disse", "hint", "også", "mer", "mye", "veldig", "ganske", "meget", "inn", "ut",
    "over", "under", "etter", "bak", "the", "and", "of", "a",
];

#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lowercase and strip the fixed punctuation set
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !JOINERS.contains(c))
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect()
}

/// Normalize, split on whitespace, drop stopwords. Token order is kept.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Like [`tokenize`] but also drops tokens of `max_short_len` characters or fewer
pub fn content_tokens(text: &str, max_short_len: usize) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > max_short_len)
        .collect()
}
