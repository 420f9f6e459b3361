//! Word lists used by the heuristic text metrics. Matching is by substring on lowercase
//! whitespace tokens, so `"can"` also counts `"cannot"`.

pub(crate) const CONFIDENT_WORDS: &[&str] = &[
    "definitely", "certainly", "absolutely", "clearly", "obviously", "undoubtedly",
    "confident", "sure", "positive", "convinced", "believe", "know", "understand", "achieve",
    "succeed", "will", "can", "able", "capable", "strong", "excellent", "outstanding",
];

pub(crate) const UNCERTAIN_WORDS: &[&str] = &[
    "maybe", "perhaps", "possibly", "might", "could", "uncertain", "unsure", "think", "guess",
    "suppose", "probably", "hopefully", "seems", "appears", "try", "attempt", "difficult",
    "challenging",
];

pub(crate) const ENGAGING_WORDS: &[&str] = &[
    "exciting", "amazing", "fantastic", "incredible", "wonderful", "outstanding", "excellent",
    "brilliant", "impressive", "remarkable", "you", "we", "us", "together", "join",
    "participate", "discover", "explore", "experience", "imagine", "picture", "consider",
];

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "like", "enjoy",
    "happy", "pleased", "excited", "thrilled",
];

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "dislike", "sad", "angry", "frustrated",
    "disappointed", "worried", "concerned", "problem",
];

/// Standard English stopword list.
pub(crate) const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn",
    "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Prefixes that speech-to-text front ends put in place of a transcript when they fail.
pub(crate) const ERROR_SENTINEL_PREFIXES: &[&str] = &[
    "Transcription failed",
    "Transcription error",
    "Transcription system error",
    "No speech detected",
    "Audio loading error",
    "Audio too short",
    "Empty audio",
];

/// Whole-transcript placeholders emitted when a speech-to-text engine is missing.
pub(crate) const ERROR_SENTINELS: &[&str] = &[
    "Whisper model not available",
    "SpeechRecognition not available",
];
