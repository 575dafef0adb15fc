/// UTF-8 encoding of U+FEFF, the byte order mark a dump may start with.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// How many bytes at the front of `buf` continue a byte order mark of
/// which `matched` bytes have already been consumed.
///
/// `None` if `buf` breaks the mark. A short `buf` that still agrees with
/// the mark returns its whole length; the caller reads more to decide.
#[must_use]
pub fn bom_continuation(matched: usize, buf: &[u8]) -> Option<usize> {
    let rest = BOM.get(matched..)?;
    let take = buf.len().min(rest.len());
    (buf[..take] == rest[..take]).then_some(take)
}

/// Strip one trailing line terminator (`"\n"` or `"\r\n"`).
///
/// A lone `'\r'` without a following `'\n'` is content, not a terminator,
/// and is left in place.
///
/// ```text
/// "a|b\r\n" → "a|b"
/// "a|b\n"   → "a|b"
/// "a|b\r"   → "a|b\r"
/// "a|b"     → "a|b"
/// ```
#[must_use]
pub fn drop_line_break(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// In-place variant of [`drop_line_break`] for owned lines.
pub fn strip_line_break(line: &mut String) {
    let keep = drop_line_break(line).len();
    line.truncate(keep);
}

/// Trim leading spaces and tabs only. Other whitespace is content.
#[must_use]
pub fn trim_left_space(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Whether a line is blank: nothing left after trimming leading spaces/tabs.
///
/// The line is expected to have its terminator already stripped.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    trim_left_space(line).is_empty()
}

/// Turn the raw bytes of one physical line into a `String`.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing
/// the whole dump; the replacement is logged with the 1-based line number.
#[must_use]
pub fn decode_line(bytes: Vec<u8>, line: u64) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(line, "replaced invalid UTF-8 in dump line");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_line_break_handles_lf_and_crlf() {
        assert_eq!(drop_line_break("a|b\n"), "a|b");
        assert_eq!(drop_line_break("a|b\r\n"), "a|b");
        assert_eq!(drop_line_break("a|b"), "a|b");
        assert_eq!(drop_line_break("\n"), "");
        assert_eq!(drop_line_break(""), "");
    }

    #[test]
    fn lone_carriage_return_is_content() {
        assert_eq!(drop_line_break("a|b\r"), "a|b\r");
    }

    #[test]
    fn only_one_terminator_is_dropped() {
        assert_eq!(drop_line_break("a\n\n"), "a\n");
        let mut owned = String::from("x\r\n\r\n");
        strip_line_break(&mut owned);
        assert_eq!(owned, "x\r\n");
    }

    #[test]
    fn trim_left_space_keeps_other_whitespace() {
        assert_eq!(trim_left_space(" \t value"), "value");
        assert_eq!(trim_left_space("\u{a0}value"), "\u{a0}value");
        assert_eq!(trim_left_space("value  "), "value  ");
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank("  #"));
    }

    #[test]
    fn bom_continuation_across_short_buffers() {
        assert_eq!(bom_continuation(0, b"\xEF\xBB\xBF#A"), Some(3));
        assert_eq!(bom_continuation(0, b"\xEF"), Some(1));
        assert_eq!(bom_continuation(1, b"\xBB"), Some(1));
        assert_eq!(bom_continuation(2, b"\xBF#"), Some(1));
        assert_eq!(bom_continuation(2, b"\xBE"), None);
        assert_eq!(bom_continuation(0, b"#A"), None);
    }

    #[test]
    fn decode_line_replaces_invalid_bytes() {
        assert_eq!(decode_line(b"ok\n".to_vec(), 1), "ok\n");
        assert_eq!(decode_line(b"a\xFFb".to_vec(), 7), "a\u{FFFD}b");
    }
}
