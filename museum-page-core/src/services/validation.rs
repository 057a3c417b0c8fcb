//! Field validation rules

use crate::types::{FieldDescriptor, FieldKind, FieldValidity};
use crate::utils::is_valid_email;

/// Message shown for a malformed email value
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Evaluate a field value against the field's constraints.
///
/// The value is trimmed first. A blank required field is `"<Label> is required"`; a non-blank
/// email field must look like `local@domain.tld`. Pure: the same input always yields the same
/// result.
pub fn evaluate_field(field: &FieldDescriptor, raw_value: &str) -> FieldValidity {
    let value = raw_value.trim();

    if field.required && value.is_empty() {
        return FieldValidity::Invalid(format!("{} is required", field.display_label()));
    }

    if field.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return FieldValidity::Invalid(INVALID_EMAIL_MESSAGE.to_string());
    }

    FieldValidity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_field() -> FieldDescriptor {
        FieldDescriptor::new("email", FieldKind::Email)
            .required()
            .with_label("Email Address *")
    }

    #[test]
    fn blank_required_field_uses_label() {
        let field = FieldDescriptor::new("firstName", FieldKind::Text)
            .required()
            .with_label("First Name *");
        assert_eq!(
            evaluate_field(&field, "   "),
            FieldValidity::Invalid("First Name is required".to_string())
        );
    }

    #[test]
    fn blank_email_reports_required_not_malformed() {
        assert_eq!(
            evaluate_field(&email_field(), ""),
            FieldValidity::Invalid("Email Address is required".to_string())
        );
    }

    #[test]
    fn malformed_email_is_invalid() {
        assert_eq!(
            evaluate_field(&email_field(), "bad"),
            FieldValidity::Invalid(INVALID_EMAIL_MESSAGE.to_string())
        );
    }

    #[test]
    fn email_is_trimmed_before_matching() {
        assert_eq!(evaluate_field(&email_field(), "  a@b.co "), FieldValidity::Valid);
    }

    #[test]
    fn optional_blank_field_is_valid() {
        let field = FieldDescriptor::new("newsletterEmail", FieldKind::Email);
        assert_eq!(evaluate_field(&field, ""), FieldValidity::Valid);
        assert!(evaluate_field(&field, "nope").is_invalid());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let field = email_field();
        assert_eq!(evaluate_field(&field, "bad"), evaluate_field(&field, "bad"));
    }
}
