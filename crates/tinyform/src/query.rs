//! Submission query string decoding.

/// Separator between parameter chunks in a submission query string.
///
/// The page's submit script joins `x<tag>=<urlencoded value>` chunks with
/// this, so a plain `&` split would not survive values containing `&`.
pub const PARAM_SEPARATOR: &str = "__SEP__";

/// Extract the query component of a request line.
///
/// That is the substring between the first `?` and the next space. Returns
/// `None` if either delimiter is missing, which aborts the submission.
pub fn extract_query(line: &str) -> Option<&str> {
    let start = line.find('?')?;
    let rest = &line[start + 1..];
    let end = rest.find(' ')?;
    Some(&rest[..end])
}

/// Percent-decode into raw bytes.
///
/// `+` becomes a space, `%XX` becomes the byte with that value. An escape is
/// only decoded when two characters follow the `%` within the input; a
/// truncated escape at the end stays literal.
pub fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' if i + 2 < bytes.len() => match hex_pair(bytes[i + 1], bytes[i + 2]) {
                Some(value) => {
                    decoded.push(value);
                    i += 2;
                }
                None => decoded.push(b'%'),
            },
            other => decoded.push(other),
        }
        i += 1;
    }

    decoded
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

/// Decode one submitted value into the form handed to the value callback.
///
/// After percent-decoding the value is trimmed, the `%20` and `(None)`
/// "no selection" placeholders are normalized to empty, and `#`-prefixed hex
/// colors are replaced with their decimal integer form, so color values
/// always arrive at the callback as decimal strings.
pub fn decode_value(raw: &str) -> String {
    let decoded = percent_decode(raw);
    let decoded = String::from_utf8_lossy(&decoded);
    let trimmed = decoded.trim();

    if trimmed == "%20" || trimmed == "(None)" {
        return String::new();
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        if let Ok(color) = u32::from_str_radix(hex, 16) {
            return color.to_string();
        }
    }

    trimmed.to_string()
}
