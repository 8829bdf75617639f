//! # Validation Module
//!
//! Boundary validation rules. The ledgers themselves accept whatever they
//! are handed (see the coercion policy in [`crate::parse`]); forms call
//! these validators before input reaches the core, and the session layer
//! does not re-validate on submit.

use crate::error::ValidationError;
use crate::money::Money;
use crate::reference::is_year_reference;
use crate::types::DocumentKind;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a counterparty or line-item display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a quantity at the form boundary: strictly positive.
///
/// The ledger itself does not enforce this; the boundary does.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a monetary amount: non-negative (zero allowed).
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a phone number: digits, spaces and a leading `+` only,
/// at most 20 characters.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    let mut chars = phone.chars();
    let valid_first = matches!(chars.next(), Some(c) if c == '+' || c.is_ascii_digit());
    if !valid_first || !chars.all(|c| c.is_ascii_digit() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "digits, spaces and a leading + only".to_string(),
        });
    }

    Ok(())
}

/// Validates that a document reference matches the shape its kind prints.
pub fn validate_reference(kind: DocumentKind, reference: &str) -> ValidationResult<()> {
    let ok = match kind {
        DocumentKind::Proforma => is_year_reference(reference, "PRO"),
        DocumentKind::Purchase => is_year_reference(reference, "BC"),
        DocumentKind::Invoice => {
            reference
                .strip_prefix("FAC-")
                .is_some_and(|s| s.len() == 6 && s.chars().all(|c| c.is_ascii_digit()))
        }
    };

    if !ok {
        return Err(ValidationError::InvalidFormat {
            field: "reference".to_string(),
            reason: format!("'{}' does not match the {:?} format", reference, kind),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Boutique Sanou").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::zero()).is_ok());
        assert!(validate_amount(Money::from_units(5000)).is_ok());
        assert!(validate_amount(Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+226 70 00 00 00").is_ok());
        assert!(validate_phone("70000000").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference(DocumentKind::Proforma, "PRO-2024-1001").is_ok());
        assert!(validate_reference(DocumentKind::Purchase, "BC-2024-0007").is_ok());
        assert!(validate_reference(DocumentKind::Invoice, "FAC-483920").is_ok());
        assert!(validate_reference(DocumentKind::Invoice, "FAC-12").is_err());
        assert!(validate_reference(DocumentKind::Proforma, "FAC-483920").is_err());
    }
}
