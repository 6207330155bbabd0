use crate::config::{KaraokeConfig, SegmentationParams};
use crate::karaoke::{finalize_line, timing};
use crate::pipeline::traits::{LineEncoder, PhraseSegmenter};
use crate::types::{KaraokeLine, KaraokeTrack, WordInterval};

pub struct KaraokeConverter {
    config: KaraokeConfig,
    params: SegmentationParams,
    segmenter: Box<dyn PhraseSegmenter>,
    encoder: Box<dyn LineEncoder>,
}

pub(crate) struct KaraokeConverterParts {
    pub config: KaraokeConfig,
    pub segmenter: Box<dyn PhraseSegmenter>,
    pub encoder: Box<dyn LineEncoder>,
}

impl KaraokeConverter {
    pub(crate) fn from_parts(parts: KaraokeConverterParts) -> Self {
        Self {
            params: parts.config.segmentation_params(),
            config: parts.config,
            segmenter: parts.segmenter,
            encoder: parts.encoder,
        }
    }

    pub fn config(&self) -> &KaraokeConfig {
        &self.config
    }

    /// Groups `words` into phrases and encodes each one as a karaoke line.
    ///
    /// Input is expected in start-time order. Out-of-order input is logged and
    /// processed as given.
    pub fn convert(&self, words: &[WordInterval]) -> KaraokeTrack {
        if let Some(idx) = first_out_of_order(words) {
            tracing::warn!(
                index = idx,
                start = words[idx].start,
                previous_start = words[idx - 1].start,
                "converter: interval start times are not monotonic; phrasing may be wrong"
            );
        }

        let phrases = self.segmenter.segment(words, &self.params);
        let shift_time = self.config.shift_time;
        let lines = phrases
            .iter()
            .map(|phrase| KaraokeLine {
                start: timing::shifted_start(phrase.start, shift_time),
                end: phrase.end,
                markup: finalize_line(&self.encoder.encode(&phrase.words), shift_time),
            })
            .collect::<Vec<_>>();

        tracing::info!(
            intervals = words.len(),
            phrases = lines.len(),
            shift_time,
            "converter: built karaoke track"
        );

        KaraokeTrack { phrases, lines }
    }
}

fn first_out_of_order(words: &[WordInterval]) -> Option<usize> {
    words
        .windows(2)
        .position(|pair| pair[1].start < pair[0].start)
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordSpacing;
    use crate::karaoke::encode_phrase;
    use crate::pipeline::defaults::{GreedyPhraseSegmenter, KaraokeTagEncoder};
    use crate::types::{AnnotatedWord, Phrase};

    fn converter(config: KaraokeConfig) -> KaraokeConverter {
        let spacing = config.word_spacing;
        KaraokeConverter::from_parts(KaraokeConverterParts {
            config,
            segmenter: Box::new(GreedyPhraseSegmenter),
            encoder: Box::new(KaraokeTagEncoder { spacing }),
        })
    }

    #[test]
    fn convert_matches_encode_phrase_per_phrase() {
        let config = KaraokeConfig {
            shift_time: -0.25,
            ..KaraokeConfig::default()
        };
        let words = vec![
            WordInterval::new(0.5, 1.0, "we"),
            WordInterval::new(1.0, 1.5, "sing"),
            WordInterval::new(4.0, 4.5, "<eps>again"),
        ];
        let track = converter(config).convert(&words);
        assert_eq!(track.phrases.len(), 2);
        assert_eq!(track.word_count(), 3);
        for (phrase, line) in track.phrases.iter().zip(&track.lines) {
            assert_eq!(*line, encode_phrase(phrase, -0.25, WordSpacing::Spaced));
        }
        assert_eq!(track.lines[0].start, 0.25);
        assert_eq!(track.lines[0].markup, "{\\K25}{\\K50}we {\\K50}sing ");
    }

    #[test]
    fn convert_empty_input_is_empty_track() {
        let track = converter(KaraokeConfig::default()).convert(&[]);
        assert!(track.is_empty());
        assert!(track.phrases.is_empty());
    }

    #[test]
    fn convert_uses_injected_parts() {
        struct OnePhrase;
        impl PhraseSegmenter for OnePhrase {
            fn segment(&self, words: &[WordInterval], _: &SegmentationParams) -> Vec<Phrase> {
                vec![Phrase {
                    start: words[0].start,
                    end: words[words.len() - 1].end,
                    words: words
                        .iter()
                        .map(|w| AnnotatedWord {
                            start: w.start,
                            end: w.end,
                            text: w.text.clone(),
                            has_marker: false,
                        })
                        .collect(),
                }]
            }
        }
        struct Plain;
        impl LineEncoder for Plain {
            fn encode(&self, words: &[AnnotatedWord]) -> String {
                words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join("|")
            }
        }

        let converter = KaraokeConverter::from_parts(KaraokeConverterParts {
            config: KaraokeConfig::default(),
            segmenter: Box::new(OnePhrase),
            encoder: Box::new(Plain),
        });
        let words = (0..8)
            .map(|i| WordInterval::new(i as f64, i as f64 + 1.0, format!("w{i}")))
            .collect::<Vec<_>>();
        let track = converter.convert(&words);
        assert_eq!(track.lines.len(), 1);
        assert_eq!(track.lines[0].markup, "{\\K0}w0|w1|w2|w3|w4|w5|w6|w7");
    }

    #[test]
    fn first_out_of_order_finds_regression() {
        let words = vec![
            WordInterval::new(0.0, 1.0, "a"),
            WordInterval::new(2.0, 3.0, "b"),
            WordInterval::new(1.5, 2.0, "c"),
        ];
        assert_eq!(first_out_of_order(&words), Some(2));
        assert_eq!(first_out_of_order(&words[..2]), None);
    }
}
