use crate::config::SegmentationParams;
use crate::types::{AnnotatedWord, Phrase, WordInterval};

/// Interval text the aligner emits for a silent pause.
pub const SILENCE_TOKEN: &str = "<p:>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseTrigger {
    Marker,
    Duration,
}

impl CloseTrigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Duration => "duration",
        }
    }
}

/// Phrase under construction. Never empty once opened.
struct OpenPhrase {
    start: f64,
    end: f64,
    words: Vec<AnnotatedWord>,
}

impl OpenPhrase {
    fn open(word: AnnotatedWord) -> Self {
        Self {
            start: word.start,
            end: word.end,
            words: vec![word],
        }
    }

    fn push(&mut self, word: AnnotatedWord) {
        self.end = word.end;
        self.words.push(word);
    }

    fn close(self) -> Phrase {
        Phrase {
            start: self.start,
            end: self.end,
            words: self.words,
        }
    }
}

/// Drops silence and empty intervals, then marks and strips the phrase marker.
pub(crate) fn annotate(words: &[WordInterval], marker: &str) -> Vec<AnnotatedWord> {
    words
        .iter()
        .filter(|interval| {
            let trimmed = interval.text.trim();
            !trimmed.is_empty() && trimmed != SILENCE_TOKEN
        })
        .map(|interval| {
            // Detect on the raw text before stripping, so adjacent or repeated markers
            // never change the outcome.
            let has_marker = interval.text.contains(marker);
            let text = interval.text.replace(marker, " ").trim().to_string();
            AnnotatedWord {
                start: interval.start,
                end: interval.end,
                text,
                has_marker,
            }
        })
        .collect()
}

/// Greedy single-pass grouping of timed words into display phrases.
///
/// A phrase closes before a word when that word carries the marker and at least
/// `min_gap` seconds separate its start from the end of the previous phrase, or when
/// appending it would stretch the phrase past `target_duration`. The gap is measured
/// from the previous *phrase* end, starting at 0.0 for the first phrase.
pub fn segment_phrases(words: &[WordInterval], params: &SegmentationParams) -> Vec<Phrase> {
    let annotated = annotate(words, &params.marker);
    let retained = annotated.len();

    let mut phrases = Vec::new();
    let mut current: Option<OpenPhrase> = None;
    let mut last_phrase_end = 0.0f64;

    for word in annotated {
        let Some(open) = current.as_mut() else {
            current = Some(OpenPhrase::open(word));
            continue;
        };

        let trigger = if word.has_marker && word.start - last_phrase_end >= params.min_gap {
            Some(CloseTrigger::Marker)
        } else if word.end - open.start > params.target_duration {
            Some(CloseTrigger::Duration)
        } else {
            None
        };

        match trigger {
            Some(trigger) => {
                let next = OpenPhrase::open(word);
                if let Some(closed) = current.replace(next).map(OpenPhrase::close) {
                    tracing::debug!(
                        trigger = trigger.as_str(),
                        start = closed.start,
                        end = closed.end,
                        word_count = closed.words.len(),
                        "segmenter: closed phrase"
                    );
                    last_phrase_end = closed.end;
                    phrases.push(closed);
                }
            }
            None => open.push(word),
        }
    }

    if let Some(open) = current {
        phrases.push(open.close());
    }

    tracing::debug!(
        input_intervals = words.len(),
        retained_words = retained,
        dropped_intervals = words.len() - retained,
        phrases = phrases.len(),
        "segmenter: grouping complete"
    );

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min_gap: f64, target_duration: f64) -> SegmentationParams {
        SegmentationParams {
            marker: "<eps>".to_string(),
            min_gap,
            target_duration,
        }
    }

    fn w(start: f64, end: f64, text: &str) -> WordInterval {
        WordInterval::new(start, end, text)
    }

    #[test]
    fn annotate_drops_silence_and_blank_intervals() {
        let words = vec![
            w(0.0, 0.5, ""),
            w(0.5, 1.0, "  "),
            w(1.0, 1.5, "<p:>"),
            w(1.5, 2.0, " <p:> "),
            w(2.0, 2.5, "sing"),
        ];
        let annotated = annotate(&words, "<eps>");
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].text, "sing");
    }

    #[test]
    fn annotate_detects_then_strips_marker() {
        let words = vec![w(0.0, 1.0, "<eps>along<eps>"), w(1.0, 2.0, "plain")];
        let annotated = annotate(&words, "<eps>");
        assert!(annotated[0].has_marker);
        assert_eq!(annotated[0].text, "along");
        assert!(!annotated[1].has_marker);
        assert_eq!(annotated[1].text, "plain");
    }

    #[test]
    fn annotate_keeps_inner_marker_as_space() {
        let words = vec![w(0.0, 1.0, "rock<eps>roll")];
        let annotated = annotate(&words, "<eps>");
        assert_eq!(annotated[0].text, "rock roll");
    }

    #[test]
    fn marker_only_word_is_retained_with_empty_text() {
        let words = vec![w(0.0, 1.0, "<eps>")];
        let annotated = annotate(&words, "<eps>");
        assert_eq!(annotated.len(), 1);
        assert!(annotated[0].has_marker);
        assert!(annotated[0].text.is_empty());
    }

    #[test]
    fn empty_input_produces_no_phrases() {
        assert!(segment_phrases(&[], &params(2.0, 5.0)).is_empty());
    }

    #[test]
    fn single_word_forms_single_phrase() {
        let phrases = segment_phrases(&[w(3.0, 3.4, "<eps>solo")], &params(2.0, 5.0));
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].start, 3.0);
        assert_eq!(phrases[0].end, 3.4);
        assert_eq!(phrases[0].words[0].text, "solo");
    }

    #[test]
    fn first_word_never_closes_even_with_marker() {
        let words = vec![w(10.0, 11.0, "<eps>first"), w(11.0, 12.0, "second")];
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].words.len(), 2);
    }

    #[test]
    fn marker_closes_once_gap_since_previous_phrase_elapsed() {
        let words = vec![
            w(0.0, 1.0, "one"),
            w(1.0, 2.0, "two"),
            w(2.5, 3.0, "<eps>three"),
            w(3.0, 3.5, "four"),
        ];
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].end, 2.0);
        assert_eq!(phrases[1].start, 2.5);
        assert_eq!(phrases[1].words[0].text, "three");
    }

    #[test]
    fn marker_gap_is_measured_from_phrase_end_not_previous_word() {
        let words = vec![
            w(0.0, 1.0, "a"),
            w(1.0, 2.0, "b"),
            w(4.0, 4.5, "<eps>c"),
            w(4.5, 4.8, "d"),
            w(4.8, 5.0, "<eps>e"),
            w(5.1, 5.3, "<eps>f"),
        ];
        let phrases = segment_phrases(&words, &params(3.0, 10.0));
        // e sits 2.8s after the first phrase ended at 2.0; f sits 3.1s after it,
        // even though f follows e by only 0.1s.
        assert_eq!(phrases.len(), 3);
        assert_eq!(phrases[0].end, 2.0);
        assert_eq!(
            phrases[1].words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
            vec!["c", "d", "e"]
        );
        assert_eq!(phrases[2].words[0].text, "f");
    }

    #[test]
    fn marker_before_gap_elapsed_does_not_close() {
        let words = vec![w(0.0, 0.5, "a"), w(0.6, 1.0, "<eps>b")];
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 1);
        assert!(phrases[0].words[1].has_marker);
    }

    #[test]
    fn duration_trigger_splits_when_span_first_exceeds_target() {
        let words = (0..6)
            .map(|i| w(i as f64, i as f64 + 1.0, &format!("w{i}")))
            .collect::<Vec<_>>();
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].words.len(), 5);
        assert_eq!(phrases[0].end, 5.0);
        assert_eq!(phrases[1].start, 5.0);
        assert_eq!(phrases[1].words[0].text, "w5");
    }

    #[test]
    fn span_exactly_at_target_does_not_split() {
        let words = vec![w(0.0, 2.5, "a"), w(2.5, 5.0, "b")];
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 1);
    }

    #[test]
    fn every_stored_word_is_stripped_of_marker() {
        let words = vec![
            w(0.0, 1.0, "<eps>a"),
            w(1.0, 2.0, "<eps>b"),
            w(3.0, 4.0, "<eps>c"),
        ];
        let phrases = segment_phrases(&words, &params(2.0, 5.0));
        assert_eq!(phrases.len(), 2);
        for phrase in &phrases {
            for word in &phrase.words {
                assert!(!word.text.contains("<eps>"));
                assert!(word.has_marker);
            }
        }
    }
}
