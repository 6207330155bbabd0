use std::path::Path;

use crate::error::KaraokeError;
use crate::karaoke::format_time;
use crate::types::KaraokeLine;

const SCRIPT_INFO: &str = "[Script Info]
; Script generated by TextGrid to ASS Converter for Karaoke
Title: Karaoke from TextGrid
ScriptType: v4.00+
WrapStyle: 0
ScaledBorderAndShadow: yes
YCbCr Matrix: None
PlayResX: 1920
PlayResY: 1080
";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

/// Style fields shared by the caller-named primary style.
const PRIMARY_STYLE_FIELDS: &str =
    "Arial,48,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,1,0,0,0,100,100,0,0,1,2,2,2,10,10,40,1";

/// Extra styles for duet layouts, always present so scripts can be restyled in an editor.
const EXTRA_STYLES: &str = "Style: Voice1,Microsoft PhagsPa,80,&H00D58847,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,1,100,10,100,1
Style: Voice2,Microsoft PhagsPa,80,&H0092D8F9,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,3,10,100,10,1
Style: Line1,Microsoft PhagsPa,100,&H00FFDB00,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,1,100,10,170,1
Style: Line2,Microsoft PhagsPa,100,&H00FFDB00,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,3,0,100,50,1
";

const EVENTS_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Fixed script header with `style` as the primary style.
pub fn ass_header(style: &str) -> String {
    format!(
        "{SCRIPT_INFO}\n[V4+ Styles]\n{STYLE_FORMAT}\nStyle: {style},{PRIMARY_STYLE_FIELDS}\n{EXTRA_STYLES}\n[Events]\n{EVENTS_FORMAT}\n"
    )
}

pub fn dialogue_event(line: &KaraokeLine, style: &str) -> String {
    format!(
        "Dialogue: 0,{},{},{style},,0,0,0,,{}",
        format_time(line.start),
        format_time(line.end),
        line.markup
    )
}

/// Renders a complete ASS script: header, then one `Dialogue` event per line,
/// newline-separated.
pub fn render_ass(lines: &[KaraokeLine], style: &str) -> String {
    let events = lines
        .iter()
        .map(|line| dialogue_event(line, style))
        .collect::<Vec<_>>()
        .join("\n");
    let mut script = ass_header(style);
    script.push_str(&events);
    script
}

pub fn write_ass(path: &Path, lines: &[KaraokeLine], style: &str) -> Result<(), KaraokeError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| KaraokeError::io("create subtitle output directory", e))?;
    }
    std::fs::write(path, render_ass(lines, style))
        .map_err(|e| KaraokeError::io("write subtitle file", e))?;
    tracing::info!(
        path = %path.display(),
        events = lines.len(),
        "subtitle: wrote ASS script"
    );
    Ok(())
}
