const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextEncoding {
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl TextEncoding {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Be => "utf-16be",
            Self::Utf16Le => "utf-16le",
        }
    }
}

/// Decodes TextGrid bytes. Praat and MFA write either UTF-8 or UTF-16; when a
/// UTF-16 file lacks a BOM the byte order is inferred from where the NUL high
/// bytes of the ASCII header fall.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<(String, TextEncoding), String> {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return decode_utf8(rest).map(|text| (text, TextEncoding::Utf8));
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        return decode_utf16(rest, TextEncoding::Utf16Be).map(|text| (text, TextEncoding::Utf16Be));
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        return decode_utf16(rest, TextEncoding::Utf16Le).map(|text| (text, TextEncoding::Utf16Le));
    }

    match sniff_utf16(bytes) {
        Some(encoding) => decode_utf16(bytes, encoding).map(|text| (text, encoding)),
        None => decode_utf8(bytes).map(|text| (text, TextEncoding::Utf8)),
    }
}

fn sniff_utf16(bytes: &[u8]) -> Option<TextEncoding> {
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return None;
    }
    match (bytes[0], bytes[1]) {
        (0, hi) if hi != 0 => Some(TextEncoding::Utf16Be),
        (lo, 0) if lo != 0 => Some(TextEncoding::Utf16Le),
        _ => None,
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| format!("invalid UTF-8: {err}"))
}

fn decode_utf16(bytes: &[u8], encoding: TextEncoding) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!(
            "{} input has an odd byte length ({})",
            encoding.as_str(),
            bytes.len()
        ));
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| match encoding {
            TextEncoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
            _ => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect::<Vec<_>>();
    String::from_utf16(&units).map_err(|err| format!("invalid {}: {err}", encoding.as_str()))
}
