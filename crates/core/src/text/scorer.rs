use super::backends::{GrammarChecker, SentimentAnalyzer, TextBackendError};
use super::lexicon::{
    CONFIDENT_WORDS, ENGAGING_WORDS, ERROR_SENTINELS, ERROR_SENTINEL_PREFIXES,
    NEGATIVE_WORDS, POSITIVE_WORDS, UNCERTAIN_WORDS,
};
use super::tokenize::{self, count_matching};
use super::{Dimension, TextScoreSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

const LOG_TARGET: &str = "text::scorer";

const EMPTY_INPUT_FEEDBACK: &str = "No text provided for analysis. Please record or upload audio.";
const RECORD_AGAIN_FEEDBACK: &str =
    "Speech could not be transcribed. Please record again in a quieter setting, closer to the microphone.";
const CONGRATULATIONS: &str = "Excellent performance across all areas! Keep up the great work!";
const MAX_ERROR_CHARS: usize = 100;
const MAX_FOCUS_AREAS: usize = 3;
const FEEDBACK_THRESHOLD: f64 = 70.0;
const FOCUS_THRESHOLD: f64 = 65.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("{dimension} score {value} is outside [0, 100]")]
    OutOfRange { dimension: Dimension, value: f64 },
}

struct Measured {
    score: f64,
    explanation: &'static str,
}

impl Measured {
    fn new(score: f64, explanation: &'static str) -> Self {
        Self { score, explanation }
    }
}

/// Scores a transcript on fourteen dimensions.
///
/// Grammar and sentiment can be delegated to injected backends; without them (or when they
/// fail) lexical heuristics are used and the dimension is listed in
/// [`TextScoreSet::fallbacks`]. Scoring is synchronous and the scorer can be shared across
/// threads.
pub struct TextQualityScorer {
    grammar: Option<Arc<dyn GrammarChecker>>,
    sentiment: Option<Arc<dyn SentimentAnalyzer>>,
    rng: Mutex<StdRng>,
}

impl Default for TextQualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextQualityScorer {
    pub fn new() -> Self {
        Self {
            grammar: None,
            sentiment: None,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_grammar_checker(mut self, checker: Arc<dyn GrammarChecker>) -> Self {
        self.grammar = Some(checker);
        self
    }

    pub fn with_sentiment_analyzer(mut self, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        self.sentiment = Some(analyzer);
        self
    }

    /// Makes degraded-mode scores reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn score(&self, transcript: &str) -> TextScoreSet {
        if transcript.trim().is_empty() {
            return placeholder(EMPTY_INPUT_FEEDBACK);
        }
        if is_error_sentinel(transcript) {
            tracing::debug!(target: LOG_TARGET, "transcript is a speech-to-text error message");
            return placeholder(RECORD_AGAIN_FEEDBACK);
        }

        match self.try_score(transcript) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(target: LOG_TARGET, error = %e, "text scoring failed, using basic scores");
                self.degraded(transcript, &e)
            }
        }
    }

    fn try_score(&self, text: &str) -> Result<TextScoreSet, ScoreError> {
        let tokens = tokenize::tokens(text);
        let word_count = tokens.len();
        let mut fallbacks = Vec::new();

        let clarity = clarity(text);
        let vocabulary = vocabulary(text);
        let grammar = match self.grammar_from_backend(text, word_count) {
            Some(measured) => measured,
            None => {
                fallbacks.push(Dimension::Grammar);
                grammar_heuristic(text)
            }
        };
        let confidence = confidence(&tokens);
        let engagement = engagement(text, &tokens);
        let positivity = match self.positivity_from_backend(text) {
            Some(measured) => measured,
            None => {
                fallbacks.push(Dimension::Positivity);
                positivity_heuristic(&tokens)
            }
        };

        let (cl, vo, gr, co, en, po) = (
            clarity.score,
            vocabulary.score,
            grammar.score,
            confidence.score,
            engagement.score,
            positivity.score,
        );

        let mut fluency = (cl + vo) / 2.0;
        if word_count < 10 {
            fluency *= 0.7;
        }
        let coherence = (cl + gr) / 2.0;
        let pace = pace_score(text, word_count);
        let energy = (en + po) / 2.0;
        let tone = po;
        let authenticity = co * 0.8 + 20.0;
        let persuasiveness = (co + en) / 2.0;
        let overall_impact = cl * 0.15
            + vo * 0.10
            + gr * 0.10
            + co * 0.15
            + en * 0.20
            + po * 0.10
            + fluency * 0.10
            + coherence * 0.10;

        let raw: [(Dimension, f64); 14] = [
            (Dimension::Clarity, cl),
            (Dimension::Vocabulary, vo),
            (Dimension::Grammar, gr),
            (Dimension::Confidence, co),
            (Dimension::Engagement, en),
            (Dimension::Positivity, po),
            (Dimension::Fluency, fluency),
            (Dimension::Coherence, coherence),
            (Dimension::Pace, pace),
            (Dimension::Energy, energy),
            (Dimension::Tone, tone),
            (Dimension::Authenticity, authenticity),
            (Dimension::Persuasiveness, persuasiveness),
            (Dimension::OverallImpact, overall_impact),
        ];
        for (dimension, value) in raw {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ScoreError::OutOfRange { dimension, value });
            }
        }

        let measured = [
            (Dimension::Clarity, &clarity),
            (Dimension::Vocabulary, &vocabulary),
            (Dimension::Grammar, &grammar),
            (Dimension::Confidence, &confidence),
            (Dimension::Engagement, &engagement),
            (Dimension::Positivity, &positivity),
        ];

        let scores: BTreeMap<Dimension, f64> =
            raw.iter().map(|&(d, v)| (d, v.round())).collect();
        let explanations = measured
            .iter()
            .map(|(d, m)| (*d, m.explanation.to_string()))
            .collect();

        let mut feedback = Vec::new();
        for (dimension, m) in &measured {
            if m.score < FEEDBACK_THRESHOLD {
                // Positivity is presented to speakers as tone.
                let label = match dimension {
                    Dimension::Positivity => Dimension::Tone.label(),
                    other => other.label(),
                };
                feedback.push(format!("{label}: {}", m.explanation));
            }
        }

        if word_count < 15 {
            feedback.push("Try speaking a bit longer for richer analysis and better scoring.".to_string());
        } else if word_count > 200 {
            feedback.push("Great detail! For presentations, consider being more concise.".to_string());
        }

        let average = scores.values().sum::<f64>() / scores.len() as f64;
        feedback.push(
            if average >= 85.0 {
                "Outstanding performance! Your communication skills are excellent."
            } else if average >= 75.0 {
                "Very good communication! Keep up the strong performance."
            } else if average >= 65.0 {
                "Good foundation. Focus on areas marked for improvement."
            } else {
                "Keep practicing! Every expert was once a beginner."
            }
            .to_string(),
        );

        let mut low: Vec<(Dimension, f64)> = Dimension::ALL
            .iter()
            .map(|d| (*d, scores[d]))
            .filter(|(_, score)| *score < FOCUS_THRESHOLD)
            .collect();
        low.sort_by(|a, b| a.1.total_cmp(&b.1));
        if !low.is_empty() {
            let areas: Vec<&str> = low
                .iter()
                .take(MAX_FOCUS_AREAS)
                .map(|(d, _)| d.label())
                .collect();
            feedback.push(format!("Focus on improving: {}", areas.join(", ")));
        }

        if feedback.is_empty() {
            feedback.push(CONGRATULATIONS.to_string());
        }

        Ok(TextScoreSet {
            scores,
            explanations,
            feedback,
            degraded: false,
            fallbacks,
            word_count,
        })
    }

    fn grammar_from_backend(&self, text: &str, word_count: usize) -> Option<Measured> {
        let checker = self.grammar.as_ref()?;
        match checker.count_errors(text) {
            Ok(_) if word_count == 0 => Some(Measured::new(50.0, "No words to analyze")),
            Ok(errors) => Some(grammar_from_error_rate(errors as f64 / word_count as f64)),
            Err(e) => {
                log_backend_error("grammar", &e);
                None
            }
        }
    }

    fn positivity_from_backend(&self, text: &str) -> Option<Measured> {
        let analyzer = self.sentiment.as_ref()?;
        match analyzer.compound(text) {
            Ok(compound) => Some(positivity_from_compound(compound)),
            Err(e) => {
                log_backend_error("sentiment", &e);
                None
            }
        }
    }

    fn degraded(&self, text: &str, error: &ScoreError) -> TextScoreSet {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let scores = Dimension::ALL
            .iter()
            .map(|d| {
                let (center, spread) = degraded_band(*d);
                let score = (center + rng.random_range(-spread..=spread)).clamp(40, 100);
                (*d, f64::from(score))
            })
            .collect();

        let message = error.to_string();
        let message = if message.chars().count() > MAX_ERROR_CHARS {
            format!("{}...", message.chars().take(MAX_ERROR_CHARS).collect::<String>())
        } else {
            message
        };

        TextScoreSet {
            scores,
            explanations: BTreeMap::new(),
            feedback: vec![
                "Analysis completed with basic algorithms.".to_string(),
                "For enhanced analysis, make sure the grammar and sentiment backends are available."
                    .to_string(),
                format!("Analysis error: {message}"),
            ],
            degraded: true,
            fallbacks: Vec::new(),
            word_count: tokenize::tokens(text).len(),
        }
    }
}

fn log_backend_error(backend: &str, error: &TextBackendError) {
    match error {
        TextBackendError::Unavailable => {
            tracing::debug!(target: LOG_TARGET, backend, "backend unavailable, using heuristic")
        }
        TextBackendError::Failed(_) => {
            tracing::warn!(target: LOG_TARGET, backend, error = %error, "backend failed, using heuristic")
        }
    }
}

fn is_error_sentinel(transcript: &str) -> bool {
    let trimmed = transcript.trim();
    ERROR_SENTINELS.contains(&trimmed)
        || ERROR_SENTINEL_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

fn placeholder(feedback: &str) -> TextScoreSet {
    let scores = Dimension::ALL
        .iter()
        .map(|d| {
            let score = match d {
                d if d.is_measured() => 0.0,
                Dimension::OverallImpact => 25.0,
                _ => 50.0,
            };
            (*d, score)
        })
        .collect();
    TextScoreSet {
        scores,
        explanations: Dimension::MEASURED
            .iter()
            .map(|d| (*d, "No text to analyze".to_string()))
            .collect(),
        feedback: vec![feedback.to_string()],
        degraded: false,
        fallbacks: Vec::new(),
        word_count: 0,
    }
}

fn degraded_band(dimension: Dimension) -> (i32, i32) {
    match dimension {
        Dimension::Clarity => (75, 15),
        Dimension::Vocabulary => (70, 15),
        Dimension::Grammar => (80, 10),
        Dimension::Confidence => (75, 15),
        Dimension::Engagement => (70, 20),
        Dimension::Positivity => (75, 15),
        Dimension::Fluency => (70, 20),
        Dimension::Coherence => (75, 15),
        Dimension::Pace => (70, 15),
        Dimension::Energy => (70, 20),
        Dimension::Tone => (73, 15),
        Dimension::Authenticity => (75, 15),
        Dimension::Persuasiveness => (70, 15),
        Dimension::OverallImpact => (75, 15),
    }
}

/// Flesch reading ease mapped onto `[30, 100]`, with penalties for extreme sentence lengths.
fn clarity(text: &str) -> Measured {
    let sentences = tokenize::sentences(text);
    let words = tokenize::clean_words(text);
    if words.is_empty() {
        return Measured::new(30.0, "Very few meaningful words detected");
    }

    let avg_sentence_length = words.len() as f64 / sentences.len().max(1) as f64;
    let syllables: usize = words.iter().map(|w| tokenize::syllables(w)).sum();
    let avg_syllables = syllables as f64 / words.len() as f64;

    let flesch = if sentences.is_empty() {
        50.0
    } else {
        (206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables).clamp(0.0, 100.0)
    };

    let mut score = flesch * 0.7 + 30.0;
    let explanation = if avg_sentence_length > 25.0 {
        score *= 0.8;
        "Consider shortening sentences for better clarity"
    } else if avg_sentence_length < 8.0 {
        score *= 0.9;
        "Sentences are quite short - consider varying length"
    } else {
        "Good sentence length variation"
    };
    Measured::new(score.min(100.0), explanation)
}

fn vocabulary(text: &str) -> Measured {
    let words: Vec<String> = tokenize::clean_words(text)
        .into_iter()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if words.len() < 5 {
        return Measured::new(40.0, "Text too short for vocabulary analysis");
    }

    let content: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !tokenize::is_stopword(w))
        .collect();
    if content.is_empty() {
        return Measured::new(45.0, "Mostly common words detected");
    }

    let unique = content.iter().collect::<HashSet<_>>().len();
    let diversity = unique as f64 / content.len() as f64;
    let avg_len =
        content.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / content.len() as f64;

    let score = (diversity * 80.0 + ((avg_len - 3.0) * 10.0).min(20.0) + 20.0).min(100.0);
    let explanation = if diversity > 0.7 {
        "Excellent vocabulary diversity"
    } else if diversity > 0.5 {
        "Good vocabulary range"
    } else {
        "Consider using more varied vocabulary"
    };
    Measured::new(score, explanation)
}

fn grammar_from_error_rate(error_rate: f64) -> Measured {
    if error_rate == 0.0 {
        Measured::new(95.0, "No grammar errors detected")
    } else if error_rate < 0.05 {
        Measured::new(85.0, "Very few grammar issues")
    } else if error_rate < 0.1 {
        Measured::new(75.0, "Some minor grammar issues")
    } else if error_rate < 0.2 {
        Measured::new(65.0, "Several grammar issues detected")
    } else {
        Measured::new(50.0, "Many grammar issues - consider revision")
    }
}

/// Share of sentences that look complete: more than three characters, capitalized.
fn grammar_heuristic(text: &str) -> Measured {
    let sentences = tokenize::sentences(text);
    if sentences.is_empty() {
        return Measured::new(70.0, "Basic grammar analysis completed");
    }
    let complete = sentences
        .iter()
        .filter(|s| s.chars().count() > 3 && s.chars().next().is_some_and(char::is_uppercase))
        .count();
    let completeness = complete as f64 / sentences.len() as f64;
    let explanation = if completeness > 0.8 {
        "Good sentence structure"
    } else {
        "Some sentences may need improvement"
    };
    Measured::new((60.0 + completeness * 30.0).min(100.0), explanation)
}

fn confidence(tokens: &[String]) -> Measured {
    if tokens.is_empty() {
        return Measured::new(50.0, "No words to analyze");
    }
    let confident = count_matching(tokens, CONFIDENT_WORDS) as f64;
    let uncertain = count_matching(tokens, UNCERTAIN_WORDS) as f64;
    let score = (70.0 + (confident - uncertain) / tokens.len() as f64 * 100.0).clamp(40.0, 100.0);
    let explanation = if score >= 80.0 {
        "Strong, confident language detected"
    } else if score >= 60.0 {
        "Moderately confident expression"
    } else {
        "Consider using more assertive language"
    };
    Measured::new(score, explanation)
}

fn engagement(text: &str, tokens: &[String]) -> Measured {
    if tokens.is_empty() {
        return Measured::new(50.0, "No words to analyze");
    }
    let engaging = count_matching(tokens, ENGAGING_WORDS) as f64;
    let marks = text.chars().filter(|c| matches!(c, '?' | '!')).count() as f64;
    let pieces = text.split('.').count().max(1) as f64;
    let punctuation = (marks / pieces * 20.0).min(20.0);

    let score = (60.0 + engaging / tokens.len() as f64 * 100.0 + punctuation).min(100.0);
    let explanation = if score >= 80.0 {
        "Highly engaging and interactive language"
    } else if score >= 65.0 {
        "Good engagement with audience"
    } else {
        "Consider adding more engaging elements"
    };
    Measured::new(score, explanation)
}

fn positivity_from_compound(compound: f64) -> Measured {
    let explanation = if compound >= 0.3 {
        "Very positive tone detected"
    } else if compound >= 0.1 {
        "Positive tone with good energy"
    } else if compound >= -0.1 {
        "Neutral tone - consider adding positivity"
    } else {
        "Consider using more positive language"
    };
    Measured::new((compound + 1.0) * 50.0, explanation)
}

fn positivity_heuristic(tokens: &[String]) -> Measured {
    if tokens.is_empty() {
        return Measured::new(70.0, "No words to analyze");
    }
    let positive = count_matching(tokens, POSITIVE_WORDS) as f64;
    let negative = count_matching(tokens, NEGATIVE_WORDS) as f64;
    let score = (70.0 + (positive - negative) / tokens.len() as f64 * 60.0).clamp(40.0, 100.0);
    let explanation = if score >= 80.0 {
        "Very positive and uplifting tone"
    } else if score >= 60.0 {
        "Generally positive tone"
    } else {
        "Consider adding more positive language"
    };
    Measured::new(score, explanation)
}

fn pace_score(text: &str, word_count: usize) -> f64 {
    let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();
    if word_count < 20 {
        60.0
    } else if sentence_count == 0 {
        50.0
    } else {
        let words_per_sentence = word_count as f64 / sentence_count as f64;
        if (10.0..=20.0).contains(&words_per_sentence) {
            85.0
        } else if (8.0..=25.0).contains(&words_per_sentence) {
            75.0
        } else {
            65.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = "We are so happy you are here today. This is a great team and we love \
        the work we do. You will see how our new plan can help each of us grow. We know the \
        path is clear and the goal is strong. Our team will build a good tool that people \
        enjoy. We can do this together, and we will win! Thank you all for your time and \
        your trust.";

    struct FixedGrammar(Result<usize, TextBackendError>);

    impl GrammarChecker for FixedGrammar {
        fn count_errors(&self, _text: &str) -> Result<usize, TextBackendError> {
            self.0.clone()
        }
    }

    struct FixedSentiment(Result<f64, TextBackendError>);

    impl SentimentAnalyzer for FixedSentiment {
        fn compound(&self, _text: &str) -> Result<f64, TextBackendError> {
            self.0.clone()
        }
    }

    #[test]
    fn blank_transcript_gets_placeholder_scores() {
        let set = TextQualityScorer::new().score("   \n ");
        for d in Dimension::MEASURED {
            assert_eq!(set.score(d), 0.0, "{d}");
        }
        assert_eq!(set.score(Dimension::Fluency), 50.0);
        assert_eq!(set.score(Dimension::Persuasiveness), 50.0);
        assert_eq!(set.score(Dimension::OverallImpact), 25.0);
        assert_eq!(set.feedback, vec![EMPTY_INPUT_FEEDBACK.to_string()]);
        assert!(!set.degraded);
    }

    #[test]
    fn error_sentinels_ask_to_record_again() {
        let scorer = TextQualityScorer::new();
        for sentinel in [
            "Transcription failed: No working speech recognition engines available",
            "No speech detected in audio",
            "Whisper model not available",
        ] {
            let set = scorer.score(sentinel);
            assert_eq!(set.feedback, vec![RECORD_AGAIN_FEEDBACK.to_string()], "{sentinel}");
            assert_eq!(set.score(Dimension::OverallImpact), 25.0);
            assert_eq!(set.score(Dimension::Clarity), 0.0);
        }
    }

    #[test]
    fn speech_ending_in_not_available_is_scored() {
        let transcript = "Thank you all for coming today and I want to be honest with you \
                          because the new dashboard we promised last quarter is currently not available";
        let set = TextQualityScorer::new().score(transcript);
        assert!(!set.feedback.contains(&RECORD_AGAIN_FEEDBACK.to_string()));
        assert!(set.score(Dimension::Clarity) > 0.0);
        assert!(set.score(Dimension::OverallImpact) > 25.0);
        assert!(set.word_count > 20);
    }

    #[test]
    fn clean_transcript_scores_well() {
        let set = TextQualityScorer::new().score(CLEAN);
        assert!(!set.degraded);
        assert!(set.score(Dimension::OverallImpact) >= 70.0, "{:?}", set.scores);
        for callout in ["Clarity:", "Grammar:", "Tone:"] {
            assert!(
                !set.feedback.iter().any(|f| f.starts_with(callout)),
                "unexpected {callout} in {:?}",
                set.feedback
            );
        }
        assert_eq!(set.fallbacks, vec![Dimension::Grammar, Dimension::Positivity]);
        assert!(set.scores.values().all(|v| (0.0..=100.0).contains(v) && v.fract() == 0.0));
    }

    #[test]
    fn grammar_backend_error_rate_bands() {
        let text = "one two three four five six seven eight nine ten";
        let score_with = |errors| {
            TextQualityScorer::new()
                .with_grammar_checker(Arc::new(FixedGrammar(Ok(errors))))
                .score(text)
        };
        assert_eq!(score_with(0).score(Dimension::Grammar), 95.0);
        assert_eq!(score_with(1).score(Dimension::Grammar), 65.0);
        assert_eq!(score_with(5).score(Dimension::Grammar), 50.0);
        assert!(!score_with(0).fallbacks.contains(&Dimension::Grammar));
    }

    #[test]
    fn failed_backends_fall_back_to_heuristics() {
        let set = TextQualityScorer::new()
            .with_grammar_checker(Arc::new(FixedGrammar(Err(TextBackendError::Failed(
                "server down".into(),
            )))))
            .with_sentiment_analyzer(Arc::new(FixedSentiment(Err(TextBackendError::Unavailable))))
            .score(CLEAN);
        assert!(!set.degraded);
        assert_eq!(set.fallbacks, vec![Dimension::Grammar, Dimension::Positivity]);
    }

    #[test]
    fn sentiment_backend_maps_compound() {
        let set = TextQualityScorer::new()
            .with_sentiment_analyzer(Arc::new(FixedSentiment(Ok(0.5))))
            .score(CLEAN);
        assert_eq!(set.score(Dimension::Positivity), 75.0);
        assert_eq!(set.score(Dimension::Tone), 75.0);
        assert_eq!(set.explanations[&Dimension::Positivity], "Very positive tone detected");
        assert_eq!(set.fallbacks, vec![Dimension::Grammar]);
    }

    #[test]
    fn invalid_backend_output_degrades() {
        let scorer = TextQualityScorer::new()
            .with_seed(11)
            .with_sentiment_analyzer(Arc::new(FixedSentiment(Ok(f64::NAN))));
        let set = scorer.score(CLEAN);
        assert!(set.degraded);
        assert_eq!(set.scores.len(), Dimension::ALL.len());
        for d in Dimension::ALL {
            let (center, spread) = degraded_band(d);
            let score = set.score(d);
            assert!(score >= f64::from((center - spread).max(40)), "{d} = {score}");
            assert!(score <= f64::from((center + spread).min(100)), "{d} = {score}");
        }
        assert_eq!(set.feedback.len(), 3);
        assert!(set.feedback[2].starts_with("Analysis error: Positivity score NaN"));
    }

    #[test]
    fn out_of_range_compound_degrades() {
        let set = TextQualityScorer::new()
            .with_sentiment_analyzer(Arc::new(FixedSentiment(Ok(1.5))))
            .score(CLEAN);
        assert!(set.degraded);
    }

    #[test]
    fn short_and_uncertain_text_gets_focus_areas() {
        let set = TextQualityScorer::new().score("maybe i think perhaps");
        assert_eq!(set.word_count, 4);
        // 70 + (0 - 3) / 4 * 100, clamped.
        assert_eq!(set.score(Dimension::Confidence), 40.0);
        assert!(set
            .feedback
            .contains(&"Confidence: Consider using more assertive language".to_string()));
        assert!(set.feedback.contains(
            &"Try speaking a bit longer for richer analysis and better scoring.".to_string()
        ));
        let focus = set
            .feedback
            .iter()
            .find(|f| f.starts_with("Focus on improving: "))
            .unwrap();
        assert_eq!(focus, "Focus on improving: Vocabulary, Confidence, Fluency");
    }

    #[test]
    fn positivity_feedback_is_labelled_tone() {
        let set = TextQualityScorer::new()
            .with_sentiment_analyzer(Arc::new(FixedSentiment(Ok(-0.6))))
            .score(CLEAN);
        assert!(set
            .feedback
            .contains(&"Tone: Consider using more positive language".to_string()));
    }

    #[test]
    fn pace_bands() {
        assert_eq!(pace_score("a b c", 3), 60.0);
        let fifteen_per_sentence = format!("{}.", vec!["word"; 15].join(" ")).repeat(2);
        assert_eq!(pace_score(&fifteen_per_sentence, 30), 85.0);
        assert_eq!(pace_score(&"word ".repeat(30), 30), 65.0);
    }

    #[test]
    fn clarity_short_circuits_without_words() {
        assert_eq!(clarity("123 456 !!!").score, 30.0);
    }

    #[test]
    fn scorer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextQualityScorer>();
    }
}
