use crate::domain::model::QueuePosition;
use crate::utils::error::{ErrorKind, Result, ResultExt, WatchError};

pub const POSITION_MARKER: &str = "Sua posição na fila de espera";
pub const CLOSING_TAG: &str = "</span>";

/// Pulls the queue position out of the results page.
///
/// Works on raw text: the first line holding [`POSITION_MARKER`] must carry
/// the number between its last `#` and the next [`CLOSING_TAG`].
pub fn extract_position(html: &str) -> Result<QueuePosition> {
    find_position(html).context(ErrorKind::Extraction, "Error extracting queue position")
}

/// Every break the page may use, lone `\r` and Unicode separators included.
/// A `\r\n` pair yields an empty piece between, which never matches.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn find_position(html: &str) -> Result<QueuePosition> {
    let line = html
        .split(is_line_break)
        .find(|line| line.contains(POSITION_MARKER))
        .ok_or_else(|| extraction_error("marker phrase not found in HTML"))?;

    let hash = line
        .rfind('#')
        .ok_or_else(|| extraction_error("no '#' found on the position line"))?;

    let after_hash = hash + '#'.len_utf8();
    let close = line[after_hash..]
        .find(CLOSING_TAG)
        .map(|offset| after_hash + offset)
        .ok_or_else(|| extraction_error("no closing tag found after '#'"))?;

    let raw = line[after_hash..close].trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(extraction_error(format!(
            "non-numeric content between markers: '{}'",
            raw
        )));
    }

    let position = QueuePosition::from_digits(raw)
        .ok_or_else(|| extraction_error(format!("queue position out of range: '{}'", raw)))?;
    tracing::debug!("Extracted queue position {}", position);
    Ok(position)
}

fn extraction_error(message: impl Into<String>) -> WatchError {
    WatchError::ExtractionError {
        message: message.into(),
    }
}
