//! Validation utilities for the supply-chain dashboard
//!
//! Includes India-specific checks for vehicle registrations and phone numbers.

use rust_decimal::Decimal;

// ============================================================================
// Record Validations
// ============================================================================

/// Validate SKU format: uppercase letters, digits and dashes, 3-32 characters
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.len() < 3 || sku.len() > 32 {
        return Err("SKU must be 3-32 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("SKU must be uppercase alphanumeric with dashes");
    }
    if sku.starts_with('-') || sku.ends_with('-') {
        return Err("SKU cannot start or end with a dash");
    }
    Ok(())
}

/// Validate a 0-100 percentage score
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a 1-5 supplier rating
pub fn validate_rating(rating: f64) -> Result<(), &'static str> {
    if !rating.is_finite() || !(1.0..=5.0).contains(&rating) {
        return Err("Rating must be between 1 and 5");
    }
    Ok(())
}

/// Rupee amounts are stored with paise precision
pub const MONEY_SCALE: u32 = 2;

/// Amounts must stay below this many rupees (12 integer digits)
const MONEY_LIMIT_RUPEES: i64 = 1_000_000_000_000;

/// Validate a money amount is strictly positive, in paise and storable
pub fn validate_positive_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than zero");
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err("Amount cannot have more than two decimal places");
    }
    if amount >= Decimal::from(MONEY_LIMIT_RUPEES) {
        return Err("Amount must be less than 1,000,000,000,000");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate Indian vehicle registration number
/// Accepts: MH-12-AB-1234, MH12AB1234, MH 12 AB 1234
pub fn validate_vehicle_registration(number: &str) -> Result<(), &'static str> {
    let compact: String = number
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect();

    if compact.len() < 8 || compact.len() > 10 {
        return Err("Vehicle registration must have 8-10 characters");
    }

    let bytes = compact.as_bytes();
    // State code
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
        return Err("Vehicle registration must start with a state code");
    }
    // RTO district code
    if !bytes[2..4].iter().all(u8::is_ascii_digit) {
        return Err("Invalid RTO code in vehicle registration");
    }
    // Four digit number at the end
    let tail = &bytes[bytes.len() - 4..];
    if !tail.iter().all(u8::is_ascii_digit) {
        return Err("Vehicle registration must end with a 4-digit number");
    }
    // Series letters between
    if !bytes[4..bytes.len() - 4].iter().all(u8::is_ascii_uppercase) {
        return Err("Invalid series in vehicle registration");
    }

    Ok(())
}

/// Validate Indian phone number
/// Accepts: 9876543210, +91-98765-43210, +91-22-6678-1234, 022-66781234
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Mobile or landline without prefix
    if digits.len() == 10 {
        return Ok(());
    }
    // Trunk prefix 0
    if digits.len() == 11 && digits.starts_with('0') {
        return Ok(());
    }
    // Country code
    if digits.len() == 12 && digits.starts_with("91") {
        return Ok(());
    }

    Err("Invalid Indian phone number format")
}
