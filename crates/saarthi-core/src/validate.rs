//! Form Validation
//!
//! Mirrors the field constraints the API enforces so obviously bad input is
//! rejected before a request is made.

use crate::error::{ClientError, Result};

pub fn full_name(value: &str) -> Result<()> {
    length("Full name", value.trim(), 2, 120)
}

pub fn password(value: &str) -> Result<()> {
    length("Password", value, 8, 128)
}

pub fn user_name(value: &str) -> Result<()> {
    length("Name", value.trim(), 2, 80)
}

pub fn email(value: &str) -> Result<()> {
    let value = value.trim();
    length("Email", value, 5, 254)?;

    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !domain.ends_with('.')
    });

    if valid {
        Ok(())
    } else {
        Err(ClientError::Validation("Enter a valid email address".into()))
    }
}

fn length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min {
        Err(ClientError::Validation(format!(
            "{field} must be at least {min} characters"
        )))
    } else if len > max {
        Err(ClientError::Validation(format!(
            "{field} must be at most {max} characters"
        )))
    } else {
        Ok(())
    }
}
