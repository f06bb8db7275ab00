use leadgate::utils::{format_whatsapp, normalize_whatsapp};

#[test]
fn test_digit_strings_under_seven_are_returned_unchanged() {
    for len in 0..7 {
        let digits: String = "1234567890".chars().take(len).collect();
        assert_eq!(format_whatsapp(&digits), digits, "len {}", len);
    }
}

#[test]
fn test_brazil_numbers_with_country_code_get_plus55_mask() {
    let samples = [
        "555133445566",  // 12 digits, landline
        "5551998535411", // 13 digits, mobile
        "551187654321",
        "5511987654321",
    ];
    for digits in samples {
        let formatted = format_whatsapp(digits);
        assert!(
            formatted.starts_with("+55 ("),
            "{} -> {}",
            digits,
            formatted
        );
        // Area code is the two digits after the country code
        assert_eq!(&formatted[5..7], &digits[2..4]);
        assert_eq!(&formatted[7..8], ")");
    }
}

#[test]
fn test_normalize_reference_value() {
    assert_eq!(normalize_whatsapp("+55 (51) 99853-5411"), "5551998535411");
}

#[test]
fn test_normalize_is_idempotent_over_arbitrary_inputs() {
    let inputs = [
        "+55 (51) 99853-5411",
        "(51) 3344-5566",
        "+44 791 112 3456",
        "phone: 123-456",
        "",
        "no digits at all",
    ];
    for input in inputs {
        let once = normalize_whatsapp(input);
        assert_eq!(normalize_whatsapp(&once), once, "input {:?}", input);
    }
}

#[test]
fn test_mask_roundtrips_through_normalization() {
    // Re-stripping the mask and formatting again reproduces the same mask
    let samples = [
        "5551998535411",
        "555133445566",
        "51998535411",
        "5133445566",
        "447911123456",
        "351912345678",
        "123456",
    ];
    for digits in samples {
        let formatted = format_whatsapp(digits);
        assert_eq!(format_whatsapp(&normalize_whatsapp(&formatted)), formatted);
    }
}
