use crate::config::WordSpacing;
use crate::karaoke::timing::{centiseconds, lead_in_centiseconds};
use crate::types::AnnotatedWord;

/// Builds the `{\K<cs>}word` sequence for one phrase.
///
/// A marker-bearing word that is not first in its phrase gets one extra space in
/// front of its tag as a visual pause.
pub fn encode_words(words: &[AnnotatedWord], spacing: WordSpacing) -> String {
    let separator = spacing.separator();
    let mut markup = String::new();
    for (idx, word) in words.iter().enumerate() {
        if idx > 0 && word.has_marker {
            markup.push(' ');
        }
        markup.push_str(&format!(
            "{{\\K{}}}{}{separator}",
            centiseconds(word.duration()),
            word.text
        ));
    }
    markup
}

/// Prepends the lead-in tag compensating for the global start shift.
pub fn finalize_line(markup: &str, shift_time: f64) -> String {
    format!("{{\\K{}}}{markup}", lead_in_centiseconds(shift_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(start: f64, end: f64, text: &str, has_marker: bool) -> AnnotatedWord {
        AnnotatedWord {
            start,
            end,
            text: text.to_string(),
            has_marker,
        }
    }

    #[test]
    fn encode_single_word_has_no_injected_space() {
        let with_marker = encode_words(&[word(0.0, 0.5, "oh", true)], WordSpacing::Spaced);
        let without_marker = encode_words(&[word(0.0, 0.5, "oh", false)], WordSpacing::Spaced);
        assert_eq!(with_marker, "{\\K50}oh ");
        assert_eq!(without_marker, with_marker);
    }

    #[test]
    fn encode_inserts_pause_before_later_marker_word() {
        let words = vec![
            word(0.0, 1.0, "hello", false),
            word(1.0, 2.0, "world", true),
        ];
        assert_eq!(
            encode_words(&words, WordSpacing::Spaced),
            "{\\K100}hello  {\\K100}world "
        );
    }

    #[test]
    fn encode_truncates_durations() {
        let words = vec![word(1.0, 1.239, "a", false), word(1.239, 1.5, "b", false)];
        assert_eq!(
            encode_words(&words, WordSpacing::Spaced),
            "{\\K23}a {\\K26}b "
        );
    }

    #[test]
    fn unspaced_policy_drops_separator_but_keeps_pause() {
        let words = vec![
            word(0.0, 0.4, "你", false),
            word(0.4, 0.8, "好", false),
            word(1.0, 1.3, "吗", true),
        ];
        assert_eq!(
            encode_words(&words, WordSpacing::Unspaced),
            "{\\K40}你{\\K40}好 {\\K30}吗"
        );
    }

    #[test]
    fn encode_empty_phrase_is_empty() {
        assert!(encode_words(&[], WordSpacing::Spaced).is_empty());
    }

    #[test]
    fn finalize_line_prepends_lead_in() {
        assert_eq!(finalize_line("{\\K10}la ", -0.5), "{\\K50}{\\K10}la ");
        assert_eq!(finalize_line("{\\K10}la ", 0.0), "{\\K0}{\\K10}la ");
    }
}
