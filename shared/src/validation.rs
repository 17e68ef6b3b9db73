//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Length rules live on the request types via `validator` derives; the
//! checks here cover what derive attributes cannot express.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Smallest accepted expense amount (0.10)
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Largest value a NUMERIC(10,2) column can hold, exclusive
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if len < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if len > 50 {
        return Err("Username too long".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '-'))
    {
        return Err("Username may only contain letters, digits and _ . @ -".to_string());
    }
    Ok(())
}

/// Validate password strength
///
/// bcrypt only reads the first 72 bytes, so longer passwords are refused
/// rather than silently truncated.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 72 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate category name
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name cannot be empty".to_string());
    }
    if name.chars().count() > 50 {
        return Err("Category name too long".to_string());
    }
    Ok(())
}

/// Validate expense amount
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount < MIN_AMOUNT {
        return Err("Amount must be at least 0.10".to_string());
    }
    if amount >= MAX_AMOUNT {
        return Err("Amount too large".to_string());
    }
    if amount.normalize().scale() > 2 {
        return Err("Amount may have at most 2 decimal places".to_string());
    }
    Ok(())
}

/// Validate expense description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Description cannot be empty".to_string());
    }
    Ok(())
}

/// Validate that an expense date is not in the future
pub fn validate_expense_date(date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date > today {
        return Err("Expense date cannot be in the future".to_string());
    }
    Ok(())
}

/// Validate an inclusive date range
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if start > end {
        return Err("Start date must not be after end date".to_string());
    }
    Ok(())
}
