use crate::config::{SegmentationParams, WordSpacing};
use crate::karaoke::{encode_words, segment_phrases};
use crate::pipeline::traits::{LineEncoder, PhraseSegmenter};
use crate::types::{AnnotatedWord, Phrase, WordInterval};

pub struct GreedyPhraseSegmenter;

impl PhraseSegmenter for GreedyPhraseSegmenter {
    fn segment(&self, words: &[WordInterval], params: &SegmentationParams) -> Vec<Phrase> {
        segment_phrases(words, params)
    }
}

pub struct KaraokeTagEncoder {
    pub spacing: WordSpacing,
}

impl LineEncoder for KaraokeTagEncoder {
    fn encode(&self, words: &[AnnotatedWord]) -> String {
        encode_words(words, self.spacing)
    }
}
