//! `Ad-Auction-Result` token derivation.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE};
use base64::Engine;
use sha2::{Digest, Sha256};

/// Standard alphabet that tolerates non-zero bits after the last symbol.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// URL-safe base64 (padded) of the SHA-256 of the decoded ciphertext.
///
/// The browser hashes the response blob it receives and only accepts it if
/// the hash was announced in an `Ad-Auction-Result` header. Characters outside
/// the base64 alphabet, such as line breaks, are skipped before decoding.
pub fn auction_result_token(ciphertext_b64: &str) -> Result<String, base64::DecodeError> {
    let cleaned: String = ciphertext_b64
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    let ciphertext = LENIENT.decode(cleaned)?;
    Ok(URL_SAFE.encode(Sha256::digest(&ciphertext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_decoded_bytes_not_the_text() {
        // SHA-256("hello") = 2cf24dba...9824
        let token = auction_result_token("aGVsbG8=").unwrap();
        assert_eq!(token, "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=");
    }

    #[test]
    fn empty_ciphertext_hashes_to_empty_digest() {
        assert_eq!(
            auction_result_token("").unwrap(),
            "47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn output_is_url_safe() {
        let token = auction_result_token("/+/+AAECAwQFBgc=").unwrap();
        assert!(!token.contains('+') && !token.contains('/'));
        assert_eq!(token.len(), 44);
    }

    #[test]
    fn tolerates_trailing_bits_and_line_breaks() {
        let expected = "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=";
        assert_eq!(auction_result_token("aGVsbG9=").unwrap(), expected);
        assert_eq!(auction_result_token("aGVs\nbG8=\r\n").unwrap(), expected);
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(auction_result_token("aGVsbG8").is_err());
        assert!(auction_result_token("a").is_err());
    }
}
