use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Delivery details drafted during checkout. Mutable until the subscription
/// is confirmed, then embedded verbatim in the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDeliveryInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub start_date: Option<NaiveDate>,
}

/// Every failing field is reported at once; advancing never stops at the
/// first error.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DeliveryFieldErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<String>,
}

impl DeliveryFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.start_date.is_none()
    }
}

pub fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name is required".to_string());
    }
    if name.trim().chars().count() < 2 {
        return Some("Name must be at least 2 characters long".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Some("Name can only contain letters and spaces".to_string());
    }
    None
}

/// Indian mobile format: exactly 10 digits, leading digit 6-9.
pub fn validate_phone(phone: &str) -> Option<String> {
    if phone.is_empty() {
        return Some("Phone number is required".to_string());
    }
    let valid = phone.chars().count() == 10
        && phone.chars().all(|c| c.is_ascii_digit())
        && matches!(phone.chars().next(), Some('6'..='9'));
    if !valid {
        return Some("Please enter a valid 10-digit phone number".to_string());
    }
    None
}

pub fn validate_address(address: &str) -> Option<String> {
    if address.trim().is_empty() {
        return Some("Address is required".to_string());
    }
    if address.trim().chars().count() < 10 {
        return Some("Please enter a complete address (at least 10 characters)".to_string());
    }
    None
}

pub fn validate_start_date(start_date: Option<NaiveDate>, today: NaiveDate) -> Option<String> {
    match start_date {
        None => Some("Start date is required".to_string()),
        Some(date) if date < today => Some("Start date cannot be in the past".to_string()),
        Some(_) => None,
    }
}

impl CustomerDeliveryInfo {
    /// `today` is injected so callers decide what "the current calendar
    /// day" means.
    pub fn validate(&self, today: NaiveDate) -> Result<(), DeliveryFieldErrors> {
        let errors = DeliveryFieldErrors {
            name: validate_name(&self.name),
            phone: validate_phone(&self.phone),
            address: validate_address(&self.address),
            start_date: validate_start_date(self.start_date, today),
        };

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
