//! WhatsApp phone number formatting and normalization
//!
//! Two independent pure functions:
//! - `format_whatsapp` produces the masked display string shown in the form
//! - `normalize_whatsapp` produces the canonical digits-only storage string
//!
//! Formatting is country-aware: Brazilian numbers (with or without the +55
//! country code) get the `(DD) XXXXX-XXXX` grouping, everything else falls
//! back to a generic international `+CC XXX XXX XXXX` grouping.

/// E.164 allows at most 15 digits
const MAX_PHONE_DIGITS: usize = 15;

/// Strip everything that is not an ASCII digit
fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Infer the country-code length for the generic international grouping
///
/// Fixed lookup, not a full ITU table: the form only needs a plausible
/// split point for display purposes.
fn country_code_len(digits: &str) -> usize {
    if digits.starts_with('1') {
        return 1; // USA/Canada
    }
    if digits.starts_with("44") {
        return 2; // UK
    }
    if digits.starts_with("351") || digits.starts_with("352") {
        return 3; // Portugal, Luxembourg
    }
    if let Ok(prefix2) = digits[..2.min(digits.len())].parse::<u32>() {
        if (30..=49).contains(&prefix2) {
            return 2; // most of Europe
        }
    }
    if let Ok(prefix3) = digits[..3.min(digits.len())].parse::<u32>() {
        if prefix3 >= 200 {
            return 3; // three-digit country codes
        }
    }
    1
}

/// Apply the WhatsApp display mask to arbitrary user keystrokes
///
/// Strips non-digits, caps at 15 digits, then groups:
/// - `55` + 12-13 digits: Brazil with country code, `+55 (DD) XXXXX-XXXX`
/// - 10-11 digits not starting with `55`: Brazil national, `(DD) XXXXX-XXXX`
/// - 7+ digits: generic international, `+CC XXX XXX XXXX`
/// - under 7 digits: returned bare
pub fn format_whatsapp(raw: &str) -> String {
    let mut digits = strip_non_digits(raw);
    digits.truncate(MAX_PHONE_DIGITS);

    let is_brazil_with_code =
        digits.starts_with("55") && digits.len() >= 12 && digits.len() <= 13;
    let is_brazil_national =
        !digits.starts_with("55") && digits.len() >= 10 && digits.len() <= 11;

    if is_brazil_with_code {
        let country_code = &digits[..2];
        let ddd = &digits[2..4];
        let rest = &digits[4..];

        // 13 digits means a mobile number with the leading 9
        let split = if digits.len() == 13 { 5 } else { 4 };
        let first = &rest[..split];
        let second = &rest[split..];
        return format!("+{} ({}) {}-{}", country_code, ddd, first, second);
    }

    if is_brazil_national {
        let ddd = &digits[..2];
        let split = if digits.len() == 11 { 7 } else { 6 };
        let first = &digits[2..split];
        let second = &digits[split..];
        return format!("({}) {}-{}", ddd, first, second);
    }

    // Generic international grouping for other countries
    if digits.len() >= 7 {
        let cc_len = country_code_len(&digits);
        let country_code = &digits[..cc_len];
        let number = &digits[cc_len..];

        return match number.len() {
            0..=3 => format!("+{} {}", country_code, number),
            4..=6 => format!("+{} {} {}", country_code, &number[..3], &number[3..]),
            7..=10 => format!(
                "+{} {} {} {}",
                country_code,
                &number[..3],
                &number[3..6],
                &number[6..]
            ),
            // Anything past 10 subscriber digits is dropped from the mask
            _ => format!(
                "+{} {} {} {}",
                country_code,
                &number[..3],
                &number[3..6],
                &number[6..10]
            ),
        };
    }

    // Too short to format
    digits
}

/// Normalize a phone number for storage
///
/// Keeps the full digit sequence including the country code if present.
/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize_whatsapp(raw: &str) -> String {
    strip_non_digits(raw)
}
