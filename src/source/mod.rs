use std::path::Path;

use textgrid::{TextGrid, TierType};

use crate::error::KaraokeError;
use crate::types::WordInterval;

mod decode;
mod long_format;

/// Interval as read from disk, before bounds validation.
#[derive(Debug, Clone)]
pub(crate) struct RawInterval {
    pub xmin: f64,
    pub xmax: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub(crate) struct RawTier {
    pub name: String,
    pub intervals: Vec<RawInterval>,
}

/// A named interval tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub name: String,
    pub intervals: Vec<WordInterval>,
}

/// All interval tiers of one annotation file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TierSet {
    tiers: Vec<Tier>,
}

impl TierSet {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|tier| tier.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Returns the first tier named exactly `name`.
    pub fn tier(&self, name: &str) -> Result<&Tier, KaraokeError> {
        self.tiers
            .iter()
            .find(|tier| tier.name == name)
            .ok_or_else(|| self.missing(name))
    }

    pub fn into_tier(self, name: &str) -> Result<Tier, KaraokeError> {
        let missing = self.missing(name);
        self.tiers
            .into_iter()
            .find(|tier| tier.name == name)
            .ok_or(missing)
    }

    fn missing(&self, name: &str) -> KaraokeError {
        KaraokeError::tier_not_found(
            name,
            self.tiers.iter().map(|tier| tier.name.clone()).collect(),
        )
    }
}

/// Reads every interval tier from a Praat TextGrid file.
///
/// The `textgrid` crate is tried first; files it rejects (UTF-16 exports, minor
/// format deviations) go through the built-in long-format reader. A file neither
/// accepts is an error; no partial result is returned.
pub fn read_textgrid(path: &Path) -> Result<TierSet, KaraokeError> {
    let raw_tiers = match tiers_with_textgrid_crate(path) {
        Ok(tiers) => tiers,
        Err(crate_err) => {
            let bytes = std::fs::read(path).map_err(|e| KaraokeError::io("read TextGrid", e))?;
            let (contents, encoding) =
                decode::decode_text(&bytes).map_err(|err| KaraokeError::parse(path, err))?;
            tracing::debug!(
                path = %path.display(),
                encoding = encoding.as_str(),
                reason = crate_err.as_str(),
                "source: textgrid crate rejected file, using long-format reader"
            );
            long_format::parse_interval_tiers(&contents).map_err(|fallback_err| {
                KaraokeError::parse(
                    path,
                    format!("textgrid crate ({crate_err}) and fallback parser ({fallback_err}) both failed"),
                )
            })?
        }
    };

    let tiers = raw_tiers
        .into_iter()
        .map(|raw| validate_tier(raw, path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        path = %path.display(),
        tiers = tiers.len(),
        "source: read TextGrid"
    );
    Ok(TierSet::new(tiers))
}

fn tiers_with_textgrid_crate(path: &Path) -> Result<Vec<RawTier>, String> {
    let textgrid =
        TextGrid::from_file(path).map_err(|err| format!("textgrid crate parse failed: {err}"))?;

    Ok(textgrid
        .tiers
        .iter()
        .filter(|tier| tier.tier_type == TierType::IntervalTier)
        .map(|tier| RawTier {
            name: tier.name.clone(),
            intervals: tier
                .intervals
                .iter()
                .map(|interval| RawInterval {
                    xmin: interval.xmin,
                    xmax: interval.xmax,
                    text: interval.text.clone(),
                })
                .collect(),
        })
        .collect())
}

fn validate_tier(raw: RawTier, path: &Path) -> Result<Tier, KaraokeError> {
    let mut intervals = Vec::with_capacity(raw.intervals.len());
    for (idx, interval) in raw.intervals.into_iter().enumerate() {
        let RawInterval { xmin, xmax, text } = interval;
        if !xmin.is_finite() || !xmax.is_finite() || xmin < 0.0 || xmax < xmin {
            return Err(KaraokeError::parse(
                path,
                format!(
                    "tier \"{}\" interval {} has invalid bounds [{xmin}, {xmax}]",
                    raw.name,
                    idx + 1
                ),
            ));
        }
        intervals.push(WordInterval::new(xmin, xmax, text));
    }
    Ok(Tier {
        name: raw.name,
        intervals,
    })
}
