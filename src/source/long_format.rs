//! Line-oriented reader for the long ("full") TextGrid text format.
//!
//! Used when the `textgrid` crate rejects a file, e.g. UTF-16 exports from
//! Montreal Forced Aligner.

use super::{RawInterval, RawTier};

#[derive(Default)]
struct ItemState {
    is_interval_tier: bool,
    name: Option<String>,
    intervals: Vec<RawInterval>,
    cur_xmin: Option<f64>,
    cur_xmax: Option<f64>,
}

impl ItemState {
    fn finish(self) -> Option<RawTier> {
        if !self.is_interval_tier {
            return None;
        }
        Some(RawTier {
            name: self.name.unwrap_or_default(),
            intervals: self.intervals,
        })
    }
}

pub(crate) fn parse_interval_tiers(contents: &str) -> Result<Vec<RawTier>, String> {
    let mut tiers = Vec::new();
    let mut item: Option<ItemState> = None;
    let mut lines = contents.lines().enumerate();

    while let Some((line_idx, raw_line)) = lines.next() {
        let line = raw_line.trim();

        if line.starts_with("item [") {
            if let Some(finished) = item.take().and_then(ItemState::finish) {
                tiers.push(finished);
            }
            item = Some(ItemState::default());
            continue;
        }

        let Some(state) = item.as_mut() else {
            continue;
        };

        if let Some(value) = parse_assignment_value(line, "class") {
            state.is_interval_tier = strip_quotes(value) == "IntervalTier";
            continue;
        }

        if let Some(value) = parse_assignment_value(line, "name") {
            let name = read_quoted(value, &mut lines)
                .map_err(|err| format!("line {}: tier name: {err}", line_idx + 1))?;
            state.name = Some(name);
            continue;
        }

        if line.starts_with("intervals [") {
            state.cur_xmin = None;
            state.cur_xmax = None;
            continue;
        }

        if let Some(value) = parse_assignment_value(line, "xmin") {
            state.cur_xmin = Some(parse_number(value, "xmin", line_idx)?);
            continue;
        }

        if let Some(value) = parse_assignment_value(line, "xmax") {
            state.cur_xmax = Some(parse_number(value, "xmax", line_idx)?);
            continue;
        }

        if let Some(value) = parse_assignment_value(line, "text") {
            if !state.is_interval_tier {
                continue;
            }
            let text = read_quoted(value, &mut lines)
                .map_err(|err| format!("line {}: interval text: {err}", line_idx + 1))?;
            let xmin = state
                .cur_xmin
                .take()
                .ok_or_else(|| format!("line {}: missing xmin before text", line_idx + 1))?;
            let xmax = state
                .cur_xmax
                .take()
                .ok_or_else(|| format!("line {}: missing xmax before text", line_idx + 1))?;
            state.intervals.push(RawInterval { xmin, xmax, text });
        }
    }

    if let Some(finished) = item.and_then(ItemState::finish) {
        tiers.push(finished);
    }

    if tiers.is_empty() {
        return Err("no IntervalTier blocks found".to_string());
    }
    Ok(tiers)
}

fn parse_assignment_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (lhs, rhs) = line.split_once('=')?;
    if lhs.trim() == key {
        Some(rhs.trim())
    } else {
        None
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_number(value: &str, field: &str, line_idx: usize) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("line {}: failed to parse {field}='{value}': {err}", line_idx + 1))
}

/// Reads a Praat string literal starting at `value`, pulling further lines when the
/// literal spans a line break. Doubled quotes (`""`) decode to one quote.
fn read_quoted<'a, I>(value: &str, lines: &mut I) -> Result<String, String>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let Some(body) = value.strip_prefix('"') else {
        return Err(format!("expected a quoted string, got '{value}'"));
    };

    let mut decoded = String::new();
    let mut segment = body.to_string();
    loop {
        let mut chars = segment.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '"' {
                decoded.push(ch);
                continue;
            }
            if chars.peek() == Some(&'"') {
                chars.next();
                decoded.push('"');
                continue;
            }
            return Ok(decoded);
        }

        let Some((_, next_line)) = lines.next() else {
            return Err("unterminated string literal".to_string());
        };
        decoded.push('\n');
        segment = next_line.to_string();
    }
}
