use super::lexicon::STOPWORDS;

/// Non-blank sentences, split on `.`, `!` and `?`.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase whitespace-separated tokens, punctuation included.
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Lowercase purely alphabetic words, with surrounding punctuation stripped.
///
/// Tokens with inner punctuation or digits (`don't`, `mp3`) are dropped.
pub(crate) fn clean_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}

/// Tokens containing any of `needles` as a substring.
pub(crate) fn count_matching(tokens: &[String], needles: &[&str]) -> usize {
    tokens
        .iter()
        .filter(|token| needles.iter().any(|needle| token.contains(needle)))
        .count()
}

pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Vowel-group syllable estimate: groups of `aeiouy`, a trailing `e` is silent when the
/// word has more than one group, never less than one.
pub(crate) fn syllables(word: &str) -> usize {
    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars().flat_map(char::to_lowercase) {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if count > 1 && word.to_lowercase().ends_with('e') {
        count -= 1;
    }
    count.max(1)
}
