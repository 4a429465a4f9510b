use crate::utils::base64::base64_decode_utf8;

/// How the fetched body was turned into document text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The body was base64 and decoded cleanly to UTF-8
    DecodedFromEncoded,
    /// The body was taken verbatim
    UsedAsIs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub outcome: DecodeOutcome,
}

/// Detect whether a subscription body is base64 and decode it if so.
///
/// Decoding is all-or-nothing: if the alphabet, padding or resulting UTF-8
/// is invalid, the raw body is returned untouched as `UsedAsIs`. A blank
/// body is never treated as encoded. This never fails.
pub fn decode_content(raw: &str) -> DecodedText {
    if !raw.trim().is_empty() {
        if let Some(text) = base64_decode_utf8(raw) {
            return DecodedText {
                text,
                outcome: DecodeOutcome::DecodedFromEncoded,
            };
        }
    }

    DecodedText {
        text: raw.to_string(),
        outcome: DecodeOutcome::UsedAsIs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    const DOC: &str = "proxies:\n  - name: 香港 01\n    type: ss\nrules:\n  - MATCH,DIRECT\n";

    #[test]
    fn test_decodes_encoded_document() {
        let decoded = decode_content(&base64_encode(DOC));
        assert_eq!(decoded.outcome, DecodeOutcome::DecodedFromEncoded);
        assert_eq!(decoded.text, DOC);
    }

    #[test]
    fn test_plain_yaml_is_used_as_is() {
        let decoded = decode_content(DOC);
        assert_eq!(decoded.outcome, DecodeOutcome::UsedAsIs);
        assert_eq!(decoded.text, DOC);
    }

    #[test]
    fn test_invalid_inputs_are_identity() {
        for raw in ["abc$", "YWJj=====", "//79", "  \n", "", "port: 7890"] {
            let decoded = decode_content(raw);
            assert_eq!(decoded.outcome, DecodeOutcome::UsedAsIs, "input {:?}", raw);
            assert_eq!(decoded.text, raw);
        }
    }

    #[test]
    fn test_trailing_newline_after_encoded_body() {
        let raw = format!("{}\n", base64_encode(DOC));
        let decoded = decode_content(&raw);
        assert_eq!(decoded.outcome, DecodeOutcome::DecodedFromEncoded);
        assert_eq!(decoded.text, DOC);
    }
}
