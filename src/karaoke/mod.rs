use crate::config::WordSpacing;
use crate::types::{KaraokeLine, Phrase};

pub mod encoder;
pub mod segmenter;
pub mod timing;

pub use encoder::{encode_words, finalize_line};
pub use segmenter::{segment_phrases, SILENCE_TOKEN};
pub use timing::format_time;

/// Encodes one phrase into a subtitle-ready line with shifted start and lead-in tag.
pub fn encode_phrase(phrase: &Phrase, shift_time: f64, spacing: WordSpacing) -> KaraokeLine {
    let markup = encode_words(&phrase.words, spacing);
    KaraokeLine {
        start: timing::shifted_start(phrase.start, shift_time),
        end: phrase.end,
        markup: finalize_line(&markup, shift_time),
    }
}
