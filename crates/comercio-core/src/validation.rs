//! # Validation Module
//!
//! Input validation for Comercio request bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Type checks (price is a number, names are strings)               │
//! │  └── Unknown fields rejected                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, minimum lengths                                  │
//! │  └── Email format, non-negative price                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE(pid)                                                       │
//! │  ├── CHECK(price >= 0)                                                 │
//! │  └── FOREIGN KEY ... ON DELETE RESTRICT                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Create inputs must carry every field. Change inputs are checked only for
//! the fields they supply, with the same rules.
//!
//! ## Usage
//! ```rust
//! use comercio_core::validation::{validate_name, validate_email};
//!
//! assert!(validate_name("Acme").is_ok());
//! assert!(validate_name("Ac").is_err());
//! assert!(validate_email("john@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{
    CompanyChanges, NewCompany, NewOwner, NewProduct, OwnerChanges, ProductChanges,
};
use crate::money::{Money, MAX_MINOR_UNITS, MINOR_UNITS_PER_MAJOR};
use crate::MIN_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Implemented by every request input the entity manager accepts.
pub trait Validate {
    /// Checks the input without touching the store.
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity name.
///
/// ## Rules
/// - Must not be blank
/// - Must be at least 3 characters, counted as stored
///
/// ## Example
/// ```rust
/// use comercio_core::validation::validate_name;
///
/// assert!(validate_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain with a dot that neither starts nor ends it
/// - No whitespace
///
/// ## Example
/// ```rust
/// use comercio_core::validation::validate_email;
///
/// assert!(validate_email("maria@loja.com.br").is_ok());
/// assert!(validate_email("maria@loja").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a free-text field that must not be blank (contact, description).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a decimal price as sent by callers.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed, negatives are not
/// - At most [`MAX_MINOR_UNITS`] once converted to cents
///
/// ## Example
/// ```rust
/// use comercio_core::validation::validate_price;
///
/// assert!(validate_price(39.05).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-0.01).is_err());
/// assert!(validate_price(1e300).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price * MINOR_UNITS_PER_MAJOR as f64 > MAX_MINOR_UNITS as f64 {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: Money::from_cents(MAX_MINOR_UNITS).to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Validation
// =============================================================================

fn validate_optional<T: ?Sized>(
    value: Option<&T>,
    check: impl FnOnce(&T) -> ValidationResult<()>,
) -> ValidationResult<()> {
    value.map_or(Ok(()), check)
}

impl Validate for NewOwner {
    fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_required("contact", &self.contact)
    }
}

impl Validate for OwnerChanges {
    fn validate(&self) -> ValidationResult<()> {
        validate_optional(self.name.as_deref(), validate_name)?;
        validate_optional(self.email.as_deref(), validate_email)?;
        validate_optional(self.contact.as_deref(), |c| validate_required("contact", c))
    }
}

impl Validate for NewCompany {
    fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        validate_required("ownerPid", &self.owner_pid)
    }
}

impl Validate for CompanyChanges {
    fn validate(&self) -> ValidationResult<()> {
        validate_optional(self.name.as_deref(), validate_name)?;
        validate_optional(self.owner_pid.as_deref(), |p| validate_required("ownerPid", p))
    }
}

impl Validate for NewProduct {
    fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        let price = self.price.ok_or_else(|| ValidationError::Required {
            field: "price".to_string(),
        })?;
        validate_price(price)?;
        validate_required("description", &self.description)?;
        validate_required("companyPid", &self.company_pid)
    }
}

impl Validate for ProductChanges {
    fn validate(&self) -> ValidationResult<()> {
        validate_optional(self.name.as_deref(), validate_name)?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        validate_optional(self.description.as_deref(), |d| {
            validate_required("description", d)
        })?;
        validate_optional(self.company_pid.as_deref(), |p| {
            validate_required("companyPid", p)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: Some(39.05),
            description: "A small widget".to_string(),
            company_pid: "company-1".to_string(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Acme").is_ok());
        assert!(validate_name("  Bob  ").is_ok());
        assert!(matches!(
            validate_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_name("Al"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
    }

    #[test]
    fn test_validate_name_counts_surrounding_spaces() {
        // Names are stored untrimmed, so the length check sees the same string.
        assert!(validate_name("  ab").is_ok());
        assert!(validate_name(" Al ").is_ok());
        assert!(matches!(
            validate_name("  "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_name_counts_characters() {
        assert!(validate_name("Zoë").is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.co.uk").is_ok());
        assert!(validate_email("john").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("john@example").is_err());
        assert!(validate_email("john@.com").is_err());
        assert!(validate_email("john@example.").is_err());
        assert!(validate_email("jo hn@example.com").is_err());
        assert!(validate_email("john@@example.com").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(100.99).is_ok());
        assert!(matches!(
            validate_price(-1.0),
            Err(ValidationError::Negative { .. })
        ));
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_price_rejects_amounts_beyond_exact_cents() {
        assert!(validate_price(90_000_000_000_000.0).is_ok());
        assert!(matches!(
            validate_price(2e17),
            Err(ValidationError::TooLarge { .. })
        ));
        assert_eq!(
            validate_price(1e300).unwrap_err().to_string(),
            "price must not exceed 90071992547409.92"
        );

        let changes = ProductChanges {
            price: Some(1e300),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn test_new_owner_requires_contact() {
        let owner = NewOwner {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            contact: "".to_string(),
        };
        let err = owner.validate().unwrap_err();
        assert_eq!(err.to_string(), "contact is required");
    }

    #[test]
    fn test_new_product_rules() {
        assert!(valid_product().validate().is_ok());

        let missing_price = NewProduct {
            price: None,
            ..valid_product()
        };
        assert_eq!(
            missing_price.validate().unwrap_err().to_string(),
            "price is required"
        );

        let negative = NewProduct {
            price: Some(-5.0),
            ..valid_product()
        };
        assert!(negative.validate().is_err());

        let no_description = NewProduct {
            description: "  ".to_string(),
            ..valid_product()
        };
        assert!(no_description.validate().is_err());
    }

    #[test]
    fn test_new_company_requires_owner() {
        let company = NewCompany {
            name: "Acme".to_string(),
            owner_pid: String::new(),
        };
        assert_eq!(
            company.validate().unwrap_err().to_string(),
            "ownerPid is required"
        );
    }

    #[test]
    fn test_empty_changes_are_valid() {
        assert!(OwnerChanges::default().validate().is_ok());
        assert!(CompanyChanges::default().validate().is_ok());
        assert!(ProductChanges::default().validate().is_ok());
    }

    #[test]
    fn test_supplied_changes_use_create_rules() {
        let changes = OwnerChanges {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_err());

        let changes = ProductChanges {
            name: Some("ab".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_err());

        let changes = CompanyChanges {
            owner_pid: Some(String::new()),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }
}
