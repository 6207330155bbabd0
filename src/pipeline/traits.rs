use crate::config::SegmentationParams;
use crate::types::{AnnotatedWord, Phrase, WordInterval};

pub trait PhraseSegmenter: Send + Sync {
    fn segment(&self, words: &[WordInterval], params: &SegmentationParams) -> Vec<Phrase>;
}

/// Produces the per-word highlight markup for one phrase, without the lead-in tag.
pub trait LineEncoder: Send + Sync {
    fn encode(&self, words: &[AnnotatedWord]) -> String;
}
