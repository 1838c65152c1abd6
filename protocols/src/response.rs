const STATUS_PREFIX: &str = "SIP/2.0";
const CALL_ID: &str = "Call-ID";

/// Fields pulled out of a received datagram. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub status: String,
    pub call_id: String,
}

impl ParsedResponse {
    pub fn has_status(&self) -> bool {
        !self.status.is_empty()
    }
}

/// Best-effort scan of a SIP response. Never fails.
///
/// The status line only counts when it is the very first line. Header
/// scanning stops at the first blank line, so anything in the body is
/// ignored.
pub fn parse_response(payload: &[u8]) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();

    for (idx, raw) in payload.split(|b| *b == b'\n').enumerate() {
        let line = String::from_utf8_lossy(trim_trailing_cr(raw));

        if idx == 0 && line.starts_with(STATUS_PREFIX) {
            parsed.status = line.trim().to_string();
            continue;
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = split_header(&line)
            && key.eq_ignore_ascii_case(CALL_ID)
        {
            parsed.call_id = value.to_string();
        }
    }

    parsed
}

fn trim_trailing_cr(raw: &[u8]) -> &[u8] {
    let end: usize = raw.iter().rposition(|b| *b != b'\r').map_or(0, |idx| idx + 1);
    &raw[..end]
}

/// Splits `Key: value` at the first colon. A leading colon is not a header.
fn split_header(line: &str) -> Option<(&str, &str)> {
    match line.find(':') {
        Some(idx) if idx > 0 => Some((line[..idx].trim(), line[idx + 1..].trim())),
        _ => None,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
