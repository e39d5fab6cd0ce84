//! Machine-readable domain list embedded in the leading comment of a ruleset.
//!
//! ```text
//! /*
//! Human readable preamble.
//! ---
//! [
//!  "a.com",
//!  "b.com"
//! ]
//! ---
//! */
//! ```
//!
//! Only the text before the first `*/` is considered. It is split on `---`
//! into at most three segments and the second segment must be a JSON array
//! of strings.

use crate::error::{NetwatchError, Result};
use serde::Serialize;

pub const COMMENT_END: &str = "*/";
pub const SEGMENT_DELIMITER: &str = "---";

/// Extract the domain list from rule text.
pub fn parse_domains(rules: &str) -> Result<Vec<String>> {
    let comment = rules.split(COMMENT_END).next().unwrap_or_default();
    let mut segments = comment.splitn(3, SEGMENT_DELIMITER);
    let _preamble = segments.next();
    let payload = segments.next().ok_or_else(|| {
        NetwatchError::MalformedHeader(format!("no '{SEGMENT_DELIMITER}' segment before '{COMMENT_END}'"))
    })?;
    serde_json::from_str(payload).map_err(|e| NetwatchError::MalformedHeader(e.to_string()))
}

/// Encode domains the way they are embedded in the header: a JSON array with
/// one element per line and a single-space indent. An empty list is `[]`.
///
/// The output is pure ASCII; non-ASCII characters (IDN domains) are written
/// as `\uXXXX` escapes, using surrogate pairs outside the BMP.
pub fn encode_domains(domains: &[String]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    domains.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(escape_non_ascii(&String::from_utf8_lossy(&buf)))
}

// Non-ASCII can only occur inside string literals, where `\u` escapes are
// equivalent to the raw characters.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encodes_with_single_space_indent() {
        let out = encode_domains(&domains(&["a.com", "b.com"])).unwrap();
        assert_eq!(out, "[\n \"a.com\",\n \"b.com\"\n]");
    }

    #[test]
    fn encodes_empty_list_inline() {
        assert_eq!(encode_domains(&[]).unwrap(), "[]");
    }

    #[test]
    fn parses_second_segment_before_comment_end() {
        let rules = "/*\nWatched domains\n---\n[\n \"b.com\",\n \"a.com\"\n]\n---\n*/\nrule x { condition: false }\n/* --- [\"z.com\"] --- */";
        assert_eq!(parse_domains(rules).unwrap(), domains(&["b.com", "a.com"]));
    }

    #[test]
    fn extra_delimiters_stay_in_third_segment() {
        let rules = "/* --- [\"a.com\"] --- trailing --- more */";
        assert_eq!(parse_domains(rules).unwrap(), domains(&["a.com"]));
    }

    #[test]
    fn missing_delimiter_is_malformed() {
        let err = parse_domains("/* no header here */").unwrap_err();
        assert!(matches!(err, NetwatchError::MalformedHeader(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_domains("/* --- {\"a\": 1} --- */").unwrap_err();
        assert!(matches!(err, NetwatchError::MalformedHeader(_)));
    }

    #[test]
    fn delimiter_after_comment_end_is_ignored() {
        let err = parse_domains("/* plain */ --- [\"a.com\"] ---").unwrap_err();
        assert!(matches!(err, NetwatchError::MalformedHeader(_)));
    }

    #[test]
    fn non_ascii_is_escaped() {
        let out = encode_domains(&domains(&["bücher.de", "😀.ws"])).unwrap();
        assert_eq!(out, "[\n \"b\\u00fccher.de\",\n \"\\ud83d\\ude00.ws\"\n]");
        assert!(out.is_ascii());
    }

    #[test]
    fn escaped_idn_parses_back() {
        let list = domains(&["bücher.de", "😀.ws"]);
        let rules = format!("/*\n---\n{}\n---\n*/\n", encode_domains(&list).unwrap());
        assert_eq!(parse_domains(&rules).unwrap(), list);
    }

    #[test]
    fn encoded_list_parses_back() {
        let list = domains(&["a.com", "x.y-z.com"]);
        let rules = format!("/*\n---\n{}\n---\n*/\n", encode_domains(&list).unwrap());
        assert_eq!(parse_domains(&rules).unwrap(), list);
    }
}
