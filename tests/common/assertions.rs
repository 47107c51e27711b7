//! Assertion helpers for tests.

use flag_quantize::EncodedFlag;
use pretty_assertions::assert_eq;

/// Assert a flag carries one token per pixel of a 100x66 grid
pub fn assert_full_flag(flag: &EncodedFlag) {
    assert_eq!(
        flag.token_count(),
        6600,
        "Expected 6600 tokens, got {}",
        flag.token_count()
    );
}

/// Assert every token of the flag is `token`
pub fn assert_uniform_flag(flag: &EncodedFlag, token: &str) {
    assert_full_flag(flag);
    if let Some((i, other)) = flag.as_str().split(',').enumerate().find(|(_, t)| *t != token) {
        panic!("Token {i} is {other}, expected every token to be {token}");
    }
}

/// Tokens of `flag` for grid column `x` (column-major, `height` rows)
pub fn column_tokens(flag: &EncodedFlag, x: usize, height: usize) -> Vec<String> {
    flag.as_str()
        .split(',')
        .skip(x * height)
        .take(height)
        .map(str::to_string)
        .collect()
}

/// Assert bytes are a PNG image and decode them to RGB
pub fn assert_png(bytes: &[u8]) -> image::RgbImage {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    image::load_from_memory(bytes).unwrap().to_rgb8()
}
