//! Form validation
//!
//! Each form validator returns every failing field at once so the view
//! can show them together.

use crate::shared::error::SharedError;
use crate::shared::models::{LoginRequest, NewPost, SignupRequest, User};

/// Minimum password length accepted by the backend
pub const MIN_PASSWORD_LEN: usize = 6;

fn required(errors: &mut Vec<SharedError>, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(SharedError::validation(field, format!("{} is required", label)));
    }
}

/// Loose email shape check: `local@domain.tld`
pub fn is_email(value: &str) -> bool {
    match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

fn finish(errors: Vec<SharedError>) -> Result<(), Vec<SharedError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The login form takes an email address as username.
pub fn validate_login(request: &LoginRequest) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    required(&mut errors, "username", &request.username, "Username");
    if !request.username.trim().is_empty() && !is_email(&request.username) {
        errors.push(SharedError::validation("username", "Username must be an email address"));
    }
    required(&mut errors, "password", &request.password, "Password");
    finish(errors)
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    required(&mut errors, "email", &request.email, "Email");
    if !request.email.trim().is_empty() && !is_email(&request.email) {
        errors.push(SharedError::validation("email", "Invalid email format"));
    }
    required(&mut errors, "username", &request.username, "Username");
    required(&mut errors, "firstname", &request.firstname, "First name");
    required(&mut errors, "lastname", &request.lastname, "Last name");
    required(&mut errors, "password", &request.password, "Password");
    if !request.password.is_empty() && request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    required(&mut errors, "confirmPassword", &request.confirm_password, "Password confirmation");
    if request.password != request.confirm_password {
        errors.push(SharedError::validation("confirmPassword", "Passwords do not match"));
    }
    finish(errors)
}

pub fn validate_post(post: &NewPost) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    required(&mut errors, "title", &post.title, "Title");
    required(&mut errors, "location", &post.location, "Location");
    required(&mut errors, "caption", &post.caption, "Caption");
    finish(errors)
}

pub fn validate_profile(user: &User) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    required(&mut errors, "firstname", &user.firstname, "First name");
    required(&mut errors, "lastname", &user.lastname, "Last name");
    required(&mut errors, "bio", user.bio.as_deref().unwrap_or(""), "Bio");
    finish(errors)
}
