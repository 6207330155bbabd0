use std::path::Path;

use serde::Deserialize;

use crate::error::KaraokeError;

/// Separator emitted after each word's highlight tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSpacing {
    /// One space after every word, for space-delimited scripts.
    #[default]
    Spaced,
    /// No separator, for scripts that do not delimit words with spaces.
    Unspaced,
}

impl WordSpacing {
    pub fn separator(self) -> &'static str {
        match self {
            Self::Spaced => " ",
            Self::Unspaced => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spaced => "spaced",
            Self::Unspaced => "unspaced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KaraokeConfig {
    pub tier: String,
    pub style: String,
    pub phrase_marker: String,
    /// Seconds that must elapse after a phrase ends before a marker may open the next one.
    pub min_phrase_gap: f64,
    /// Phrase length in seconds past which the next word starts a new phrase.
    pub target_duration: f64,
    /// Offset applied to every displayed phrase start. Negative shows lines earlier.
    pub shift_time: f64,
    pub word_spacing: WordSpacing,
}

impl KaraokeConfig {
    pub const DEFAULT_TIER: &'static str = "words";
    pub const DEFAULT_STYLE: &'static str = "Default";
    pub const DEFAULT_PHRASE_MARKER: &'static str = "<eps>";
    pub const DEFAULT_MIN_PHRASE_GAP: f64 = 2.0;
    pub const DEFAULT_TARGET_DURATION: f64 = 5.0;
    pub const DEFAULT_SHIFT_TIME: f64 = 0.0;

    pub fn load(path: &Path) -> Result<Self, KaraokeError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| KaraokeError::io("read config file", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| KaraokeError::json("parse config file", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KaraokeError> {
        if self.tier.is_empty() {
            return Err(KaraokeError::invalid_input("tier name must not be empty"));
        }
        if self.style.is_empty() || self.style.contains(',') {
            return Err(KaraokeError::invalid_input(format!(
                "style name must be non-empty and free of commas, got \"{}\"",
                self.style
            )));
        }
        self.segmentation_params().validate()?;
        if !self.shift_time.is_finite() {
            return Err(KaraokeError::invalid_input(format!(
                "shift_time must be finite, got {}",
                self.shift_time
            )));
        }
        Ok(())
    }

    pub fn segmentation_params(&self) -> SegmentationParams {
        SegmentationParams {
            marker: self.phrase_marker.clone(),
            min_gap: self.min_phrase_gap,
            target_duration: self.target_duration,
        }
    }
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            tier: Self::DEFAULT_TIER.to_string(),
            style: Self::DEFAULT_STYLE.to_string(),
            phrase_marker: Self::DEFAULT_PHRASE_MARKER.to_string(),
            min_phrase_gap: Self::DEFAULT_MIN_PHRASE_GAP,
            target_duration: Self::DEFAULT_TARGET_DURATION,
            shift_time: Self::DEFAULT_SHIFT_TIME,
            word_spacing: WordSpacing::default(),
        }
    }
}

/// Parameters consumed by the phrase segmenter.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationParams {
    pub marker: String,
    pub min_gap: f64,
    pub target_duration: f64,
}

impl SegmentationParams {
    pub fn validate(&self) -> Result<(), KaraokeError> {
        // An empty marker matches every word and would be spliced between every character.
        if self.marker.is_empty() {
            return Err(KaraokeError::invalid_input("phrase marker must not be empty"));
        }
        if !self.min_gap.is_finite() || self.min_gap < 0.0 {
            return Err(KaraokeError::invalid_input(format!(
                "min_phrase_gap must be a finite value >= 0, got {}",
                self.min_gap
            )));
        }
        if !self.target_duration.is_finite() || self.target_duration <= 0.0 {
            return Err(KaraokeError::invalid_input(format!(
                "target_duration must be a finite value > 0, got {}",
                self.target_duration
            )));
        }
        Ok(())
    }
}

impl Default for SegmentationParams {
    fn default() -> Self {
        KaraokeConfig::default().segmentation_params()
    }
}
