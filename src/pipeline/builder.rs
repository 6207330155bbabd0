use crate::config::KaraokeConfig;
use crate::error::KaraokeError;
use crate::pipeline::defaults::{GreedyPhraseSegmenter, KaraokeTagEncoder};
use crate::pipeline::runtime::{KaraokeConverter, KaraokeConverterParts};
use crate::pipeline::traits::{LineEncoder, PhraseSegmenter};

pub struct KaraokeConverterBuilder {
    config: KaraokeConfig,
    segmenter: Option<Box<dyn PhraseSegmenter>>,
    encoder: Option<Box<dyn LineEncoder>>,
}

impl KaraokeConverterBuilder {
    pub fn new(config: KaraokeConfig) -> Self {
        Self {
            config,
            segmenter: None,
            encoder: None,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn PhraseSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn LineEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn build(self) -> Result<KaraokeConverter, KaraokeError> {
        self.config.validate()?;
        let spacing = self.config.word_spacing;

        Ok(KaraokeConverter::from_parts(KaraokeConverterParts {
            config: self.config,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(GreedyPhraseSegmenter)),
            encoder: self
                .encoder
                .unwrap_or_else(|| Box::new(KaraokeTagEncoder { spacing })),
        }))
    }
}
