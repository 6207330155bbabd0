/// One timed word as read from an interval tier. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WordInterval {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl WordInterval {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedWord {
    pub start: f64,
    pub end: f64,
    /// Display text with every phrase-marker occurrence replaced by a space, then trimmed.
    pub text: String,
    /// Whether the raw interval text contained the phrase marker.
    pub has_marker: bool,
}

impl AnnotatedWord {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One displayed subtitle line before encoding.
///
/// `start` equals the first word's start and `end` the last word's end; `words`
/// is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub start: f64,
    pub end: f64,
    pub words: Vec<AnnotatedWord>,
}

impl Phrase {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Plain text of the phrase without highlight tags.
    pub fn plain_text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KaraokeLine {
    /// Displayed start, already shifted and clamped at zero.
    pub start: f64,
    pub end: f64,
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KaraokeTrack {
    pub phrases: Vec<Phrase>,
    pub lines: Vec<KaraokeLine>,
}

impl KaraokeTrack {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.phrases.iter().map(|phrase| phrase.words.len()).sum()
    }
}
