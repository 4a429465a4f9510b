use chrono::{Local, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::UserinfoRecord;

lazy_static! {
    static ref USERINFO_SEPARATOR_REGEX: Regex = Regex::new(r"[,;\s]+").unwrap();
    static ref USERINFO_PAIR_REGEX: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)=(-?\d+(?:\.\d+)?)$").unwrap();
}

/// Format used for the derived `expire_str` field
pub const EXPIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `Subscription-Userinfo` header value.
///
/// The header is a list of `key=value` tokens separated by commas,
/// semicolons or whitespace. A token counts only if it is entirely
/// `key=number`; its value is rounded to an integer and kept under its key,
/// including keys beyond upload/download/total/expire. Anything else, such
/// as `download=10GB` or `total=1e3`, is skipped. When `expire` is present an
/// `expire_str` in local time is added.
///
/// Returns `None` for a missing or empty header, and when no token matched.
pub fn extract_userinfo(header: Option<&str>) -> Option<UserinfoRecord> {
    let header = header.map(str::trim).filter(|h| !h.is_empty())?;

    let mut info = UserinfoRecord::new();
    for token in USERINFO_SEPARATOR_REGEX.split(header) {
        let Some(caps) = USERINFO_PAIR_REGEX.captures(token) else {
            continue;
        };
        if let Some(value) = parse_rounded(&caps[2]) {
            info.set(&caps[1], value);
        }
    }

    if info.is_empty() {
        return None;
    }

    info.expire_str = info.expire().and_then(format_expire);
    Some(info)
}

/// Render a unix timestamp as local time, `None` if out of range.
pub fn format_expire(epoch: i64) -> Option<String> {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt| dt.format(EXPIRE_FORMAT).to_string())
}

fn parse_rounded(raw: &str) -> Option<i64> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(int);
    }
    let float = raw.parse::<f64>().ok()?.round();
    if float.is_finite() && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let info =
            extract_userinfo(Some("upload=100;download=200;total=1000;expire=1700000000")).unwrap();
        assert_eq!(info.upload(), Some(100));
        assert_eq!(info.download(), Some(200));
        assert_eq!(info.total(), Some(1000));
        assert_eq!(info.expire(), Some(1_700_000_000));
        assert_eq!(info.expire_str, format_expire(1_700_000_000));
        assert_eq!(info.expire_str.as_deref().map(str::len), Some(19));
    }

    #[test]
    fn test_comma_and_space_separators() {
        let info = extract_userinfo(Some("upload=1, download=2 total=3")).unwrap();
        let pairs: Vec<(&str, i64)> = info.iter().collect();
        assert_eq!(pairs, vec![("upload", 1), ("download", 2), ("total", 3)]);
        assert_eq!(info.expire_str, None);
    }

    #[test]
    fn test_absent_or_empty_header() {
        assert_eq!(extract_userinfo(None), None);
        assert_eq!(extract_userinfo(Some("")), None);
        assert_eq!(extract_userinfo(Some("   ")), None);
    }

    #[test]
    fn test_no_numeric_tokens() {
        assert_eq!(extract_userinfo(Some("upload=abc; plan=premium")), None);
    }

    #[test]
    fn test_partial_metadata_is_kept() {
        let info = extract_userinfo(Some("total=500,expire=9999999999")).unwrap();
        assert_eq!(info.len(), 2);
        assert_eq!(info.upload(), None);
        assert_eq!(info.total(), Some(500));
        assert_eq!(info.expire(), Some(9_999_999_999));
        assert!(info.expire_str.is_some());
    }

    #[test]
    fn test_decimal_values_are_rounded() {
        let info = extract_userinfo(Some("upload=1.4; download=2.5")).unwrap();
        assert_eq!(info.upload(), Some(1));
        assert_eq!(info.download(), Some(3));
    }

    #[test]
    fn test_partly_numeric_tokens_are_skipped() {
        let info =
            extract_userinfo(Some("upload=7; download=10GB; total=1e3; x.expire=5")).unwrap();
        let pairs: Vec<(&str, i64)> = info.iter().collect();
        assert_eq!(pairs, vec![("upload", 7)]);
        assert_eq!(info.expire_str, None);

        assert_eq!(extract_userinfo(Some("download=10GB")), None);
        assert_eq!(extract_userinfo(Some("total=1e3")), None);
    }

    #[test]
    fn test_unknown_keys_are_retained() {
        let info = extract_userinfo(Some("upload=0; download=0; plan_level=3")).unwrap();
        assert_eq!(info.get("plan_level"), Some(3));
    }

    #[test]
    fn test_expire_format_shape() {
        let rendered = format_expire(0).unwrap();
        let bytes = rendered.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b' ');
        assert_eq!(bytes[13], b':');
        assert_eq!(bytes[16], b':');
    }
}
