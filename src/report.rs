use serde::Serialize;

use crate::config::KaraokeConfig;
use crate::types::KaraokeTrack;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversionReport {
    pub input: String,
    pub output: String,
    pub params: ReportParams,
    pub input_intervals: usize,
    pub retained_words: usize,
    pub phrase_count: usize,
    pub phrases: Vec<PhraseReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportParams {
    pub tier: String,
    pub style: String,
    pub phrase_marker: String,
    pub min_phrase_gap: f64,
    pub target_duration: f64,
    pub shift_time: f64,
    pub word_spacing: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhraseReport {
    /// 1-based, matching event order in the subtitle file.
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub displayed_start: f64,
    pub word_count: usize,
    pub text: String,
}

impl ReportParams {
    pub fn from_config(config: &KaraokeConfig) -> Self {
        Self {
            tier: config.tier.clone(),
            style: config.style.clone(),
            phrase_marker: config.phrase_marker.clone(),
            min_phrase_gap: config.min_phrase_gap,
            target_duration: config.target_duration,
            shift_time: config.shift_time,
            word_spacing: config.word_spacing.as_str().to_string(),
        }
    }
}

pub fn build_report(
    input: &str,
    output: &str,
    config: &KaraokeConfig,
    input_intervals: usize,
    track: &KaraokeTrack,
) -> ConversionReport {
    let phrases = track
        .phrases
        .iter()
        .zip(&track.lines)
        .enumerate()
        .map(|(idx, (phrase, line))| PhraseReport {
            index: idx + 1,
            start: phrase.start,
            end: phrase.end,
            displayed_start: line.start,
            word_count: phrase.words.len(),
            text: phrase.plain_text(),
        })
        .collect::<Vec<_>>();

    ConversionReport {
        input: input.to_string(),
        output: output.to_string(),
        params: ReportParams::from_config(config),
        input_intervals,
        retained_words: track.word_count(),
        phrase_count: phrases.len(),
        phrases,
    }
}
