//! Lead form validation
//!
//! Synchronous, side-effect-free checks over the submitted form fields.
//! First-failing-field policy: only the first violated constraint is
//! reported, with the user-facing message in pt-BR.

use crate::utils::phone::normalize_whatsapp;

/// Field constraint violations, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadValidationError {
    NameTooShort,
    NameTooLong,
    EmailInvalid,
    PhoneMissing,
    PhoneInvalid,
    MessageTooLong,
}

impl std::fmt::Display for LeadValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "Nome deve ter pelo menos 2 caracteres"),
            Self::NameTooLong => write!(f, "Nome muito longo"),
            Self::EmailInvalid => write!(f, "E-mail inválido"),
            Self::PhoneMissing => write!(f, "Por favor, forneça seu número de WhatsApp"),
            Self::PhoneInvalid => write!(
                f,
                "WhatsApp inválido. Digite com código do país: +55 11 98765-4321"
            ),
            Self::MessageTooLong => write!(f, "Mensagem muito longa"),
        }
    }
}

impl std::error::Error for LeadValidationError {}

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const MESSAGE_MAX_CHARS: usize = 1000;
/// E.164 bounds: 7 digits covers the smallest national plans, 15 is the ceiling
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// Structural email check: one @, non-empty local part, dotted domain
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    // Domain needs at least one dot with non-empty labels on both sides
    domain.contains('.') && !domain.split('.').any(|label| label.is_empty())
}

/// Validate one candidate lead, reporting the first violated constraint
pub fn validate_lead(
    name: &str,
    email: &str,
    phone: &str,
    message: Option<&str>,
) -> Result<(), LeadValidationError> {
    let name_chars = name.chars().count();
    if name_chars < NAME_MIN_CHARS {
        return Err(LeadValidationError::NameTooShort);
    }
    if name_chars > NAME_MAX_CHARS {
        return Err(LeadValidationError::NameTooLong);
    }

    if !is_valid_email(email) {
        return Err(LeadValidationError::EmailInvalid);
    }

    if phone.is_empty() {
        return Err(LeadValidationError::PhoneMissing);
    }
    let digits = normalize_whatsapp(phone);
    if digits.len() < PHONE_MIN_DIGITS || digits.len() > PHONE_MAX_DIGITS {
        return Err(LeadValidationError::PhoneInvalid);
    }

    if let Some(message) = message {
        if message.chars().count() > MESSAGE_MAX_CHARS {
            return Err(LeadValidationError::MessageTooLong);
        }
    }

    Ok(())
}
