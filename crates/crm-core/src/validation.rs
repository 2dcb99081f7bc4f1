//! # Validation Module
//!
//! Input validation for the CRM service.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: GraphQL (async-graphql)                                      │
//! │  ├── Required arguments, scalar types (ID, Decimal, DateTime)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure)                                           │
//! │  ├── Email / phone syntax                                              │
//! │  └── Price / stock ranges, blank names                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: crm-service (store-backed)                                   │
//! │  ├── Email uniqueness                                                  │
//! │  └── Customer / product references                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                            │
//! │  ├── UNIQUE(email), CHECK(price_cents > 0), CHECK(stock >= 0)          │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crm_core::validation::{validate_email, validate_phone, validate_stock};
//!
//! assert!(validate_email("alice@example.com").is_ok());
//! assert!(validate_phone(Some("555-0100")).is_ok());
//! assert!(validate_stock(-1).is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::net::IpAddr;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_EMAIL_LENGTH;

// =============================================================================
// Email Syntax
// =============================================================================

/// Dot-atom local part: atoms of allowed characters separated by single dots.
static DOT_ATOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9A-Z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9A-Z]+)*$")
        .expect("dot-atom pattern is valid")
});

/// Quoted-string local part, e.g. `"john..doe"@example.com`.
static QUOTED_LOCAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^"(?:[\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*"$"#,
    )
    .expect("quoted local pattern is valid")
});

/// Domain labels followed by a TLD of 2-63 characters.
static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z0-9-]{2,63}$")
        .expect("domain pattern is valid")
});

/// Bracketed IP literal, e.g. `user@[10.0.0.1]`.
static DOMAIN_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[([A-F0-9:.]+)\]$").expect("literal pattern is valid")
});

/// Domains accepted without a TLD.
const DOMAIN_ALLOWLIST: &[&str] = &["localhost"];

/// Validates email syntax.
///
/// ## Rules
/// - Must not be empty, must contain `@`, at most 320 characters
/// - Split at the LAST `@` into local part and domain
/// - Local part: dot-atom or quoted string
/// - Domain: `localhost`, a bracketed IP literal, or labels + TLD
///   (TLD must not end with a hyphen). A non-ASCII domain is retried
///   after IDNA conversion, so `user@münchen.de` passes.
///
/// ## Example
/// ```rust
/// use crm_core::validation::validate_email;
///
/// assert!(validate_email("alice@example.com").is_ok());
/// assert!(validate_email("alice.smith+crm@mail.example.co").is_ok());
/// assert!(validate_email("alice@").is_err());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = email.rsplit_once('@').ok_or(ValidationError::InvalidEmail)?;

    if !(DOT_ATOM.is_match(local) || QUOTED_LOCAL.is_match(local)) {
        return Err(ValidationError::InvalidEmail);
    }

    if domain_is_valid(domain) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

fn domain_is_valid(domain: &str) -> bool {
    if domain_matches(domain) {
        return true;
    }

    // Internationalized domains are checked in their punycode form
    match idna::domain_to_ascii(domain) {
        Ok(ascii) => ascii != domain && domain_matches(&ascii),
        Err(_) => false,
    }
}

fn domain_matches(domain: &str) -> bool {
    if DOMAIN_ALLOWLIST.contains(&domain) {
        return true;
    }

    if DOMAIN.is_match(domain) {
        // The regex crate has no lookbehind, so the TLD rule lives here
        return !domain.ends_with('-');
    }

    DOMAIN_LITERAL
        .captures(domain)
        .and_then(|caps| caps.get(1))
        .map(|ip| ip.as_str().parse::<IpAddr>().is_ok())
        .unwrap_or(false)
}

// =============================================================================
// Phone Syntax
// =============================================================================

/// Validates a phone number.
///
/// ## Rules
/// - Absent or empty: accepted (phone is optional)
/// - Starts with `+`: accepted as-is
/// - Otherwise: after removing hyphens, must be non-empty ASCII digits
///
/// ## Example
/// ```rust
/// use crm_core::validation::validate_phone;
///
/// assert!(validate_phone(None).is_ok());
/// assert!(validate_phone(Some("")).is_ok());
/// assert!(validate_phone(Some("+1 (555) 0100")).is_ok());
/// assert!(validate_phone(Some("555-0100")).is_ok());
/// assert!(validate_phone(Some("555 0100")).is_err());
/// assert!(validate_phone(Some("---")).is_err());
/// ```
pub fn validate_phone(phone: Option<&str>) -> ValidationResult<()> {
    let phone = match phone {
        None | Some("") => return Ok(()),
        Some(p) => p,
    };

    if phone.starts_with('+') {
        return Ok(());
    }

    let mut digits = phone.chars().filter(|c| *c != '-').peekable();
    if digits.peek().is_some() && digits.all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

// =============================================================================
// Names
// =============================================================================

/// Validates a customer name: must not be blank.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price: must be strictly positive.
///
/// ## Example
/// ```rust
/// use crm_core::money::Money;
/// use crm_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::PriceNotPositive);
    }
    Ok(())
}

/// Converts a decimal price to Money and validates it.
///
/// ## Rules
/// - `amount <= 0` → `PriceNotPositive`
/// - Too large for cents → `PriceOutOfRange`
/// - Rounds to zero cents (e.g. `0.001`) → `PriceNotPositive`
pub fn parse_price(amount: Decimal) -> ValidationResult<Money> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::PriceNotPositive);
    }

    let price = Money::from_decimal(amount).ok_or(ValidationError::PriceOutOfRange)?;
    validate_price(price)?;
    Ok(price)
}

/// Validates a stock level: must not be negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::NegativeStock);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
