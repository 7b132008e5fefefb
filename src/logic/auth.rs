use crate::error::{Result, SmartFarmError};
use crate::models::{LoginMethod, Session};

/// Simulated Google account used by the one-click login.
pub const GOOGLE_DEMO_EMAIL: &str = "user@gmail.com";

/// Email/password login. Any non-blank pair is accepted; there is no
/// account backend to check against.
pub fn login_with_email(email: &str, password: &str) -> Result<Session> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SmartFarmError::Auth("email is required".into()));
    }
    if password.trim().is_empty() {
        return Err(SmartFarmError::Auth("password is required".into()));
    }

    let display_name = email.split('@').next().unwrap_or(email);
    tracing::info!(method = "email", "User logged in");
    Ok(Session::new(
        LoginMethod::Email {
            email: email.to_string(),
        },
        display_name,
    ))
}

pub fn login_with_google() -> Session {
    tracing::info!(method = "google", "User logged in");
    let display_name = GOOGLE_DEMO_EMAIL.split('@').next().unwrap_or("user");
    Session::new(
        LoginMethod::Google {
            email: GOOGLE_DEMO_EMAIL.to_string(),
        },
        display_name,
    )
}

pub fn login_with_phone(number: &str) -> Result<Session> {
    let number = number.trim();
    if number.is_empty() {
        return Err(SmartFarmError::Auth("phone number is required".into()));
    }

    tracing::info!(method = "phone", "User logged in");
    Ok(Session::new(
        LoginMethod::Phone {
            number: number.to_string(),
        },
        number,
    ))
}
