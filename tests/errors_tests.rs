use actix_web::http::StatusCode;
use leadgate::errors::LeadgateError;

#[test]
fn test_validation_error() {
    let error = LeadgateError::validation("Nome muito longo");

    assert!(matches!(error, LeadgateError::Validation(_)));
    assert_eq!(error.code(), "E004");
    assert_eq!(error.http_status(), StatusCode::BAD_REQUEST);
    assert!(error.to_string().contains("Validation Error"));
    assert!(error.to_string().contains("Nome muito longo"));
}

#[test]
fn test_not_found_error() {
    let error = LeadgateError::not_found("lead missing");

    assert_eq!(error.http_status(), StatusCode::NOT_FOUND);
    assert!(error.to_string().contains("Resource Not Found"));
}

#[test]
fn test_database_errors_map_to_internal_server_error() {
    for error in [
        LeadgateError::database_config("bad url"),
        LeadgateError::database_connection("refused"),
        LeadgateError::database_operation("insert failed"),
    ] {
        assert_eq!(error.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn test_forwarding_error() {
    let error = LeadgateError::forwarding("Invalid OAuth access token");

    assert_eq!(error.code(), "E007");
    assert_eq!(error.message(), "Invalid OAuth access token");
    assert!(error.to_string().contains("Conversion Forwarding Error"));
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let error = LeadgateError::from(json_err);

    assert!(matches!(error, LeadgateError::Serialization(_)));
}

#[test]
fn test_error_codes_are_distinct() {
    let errors = [
        LeadgateError::database_config(""),
        LeadgateError::database_connection(""),
        LeadgateError::database_operation(""),
        LeadgateError::validation(""),
        LeadgateError::not_found(""),
        LeadgateError::serialization(""),
        LeadgateError::forwarding(""),
        LeadgateError::csv_export(""),
    ];
    let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
