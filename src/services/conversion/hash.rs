//! One-way digests for ad-platform user matching
//!
//! The platform matches users on SHA-256 digests of normalized contact
//! fields; raw values are never transmitted.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the lowercased, trimmed input
pub fn hash_data(data: &str) -> String {
    let normalized = data.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{:x}", digest)
}

pub fn hash_email(email: &str) -> String {
    hash_data(email)
}

/// Phone digests are computed over the digits-only form
pub fn hash_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    hash_data(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_email("a@b.com"), hash_email("a@b.com"));
    }

    #[test]
    fn test_hash_normalizes_case_and_whitespace() {
        assert_eq!(hash_email("A@B.com"), hash_email("a@b.com "));
    }

    #[test]
    fn test_hash_phone_ignores_mask() {
        assert_eq!(hash_phone("+55 (51) 99853-5411"), hash_phone("5551998535411"));
    }

    #[test]
    fn test_known_digest() {
        // sha256("a@b.com")
        assert_eq!(
            hash_email("a@b.com"),
            "fb98d44ad7501a959f3f4f4a3f004fe2d9e581ea6207e218c4b02c08a4d75adf"
        );
    }
}
