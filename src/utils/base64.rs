use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Standard alphabet, accepts input with or without trailing `=` padding.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a standard Base64 string into UTF-8 text.
///
/// Line breaks are removed first, since subscription bodies are often
/// wrapped. Returns `None` on any alphabet, padding or UTF-8 error; there is
/// no lossy fallback.
pub fn base64_decode_utf8(input: &str) -> Option<String> {
    let compact: String = input
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    let bytes = STANDARD_LENIENT.decode(compact.trim()).ok()?;
    String::from_utf8(bytes).ok()
}
