pub mod config;
pub mod error;
pub mod karaoke;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod subtitle;
pub mod types;

pub use config::{KaraokeConfig, SegmentationParams, WordSpacing};
pub use error::KaraokeError;
pub use karaoke::{encode_phrase, encode_words, finalize_line, format_time, segment_phrases};
pub use pipeline::builder::KaraokeConverterBuilder;
pub use pipeline::runtime::KaraokeConverter;
pub use pipeline::traits::{LineEncoder, PhraseSegmenter};
pub use report::{build_report, ConversionReport};
pub use source::{read_textgrid, Tier, TierSet};
pub use subtitle::{render_ass, write_ass};
pub use types::{AnnotatedWord, KaraokeLine, KaraokeTrack, Phrase, WordInterval};
