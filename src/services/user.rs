//! User service implementation
//!
//! Handles upsert-on-authenticate (users are keyed by phone number and
//! created on first successful login) and profile updates.

use tracing::{debug, info};

use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{Result, SplitmateError};

/// Minimum number of characters in a phone number, matching the client-side
/// check of the login form.
const MIN_PHONE_LEN: usize = 10;

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Return the user for this phone number, creating the record on first
    /// login. Users are never deleted, so the id is stable from here on.
    pub async fn authenticate(&self, phone: &str) -> Result<User> {
        let phone = normalize_phone(phone)?;
        debug!(phone = %phone, "Authenticating user");

        if let Some(existing) = self.user_repository.find_by_phone(&phone).await? {
            debug!(user_id = existing.id, "User already registered");
            return Ok(existing);
        }

        let user = self
            .user_repository
            .create(CreateUserRequest {
                phone,
                name: None,
                email: None,
                avatar_url: None,
            })
            .await?;

        info!(user_id = user.id, "New user registered");
        Ok(user)
    }

    /// Update profile fields of an existing user
    pub async fn update_profile(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        debug!(user_id = user_id, "Updating user profile");

        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(SplitmateError::Validation(
                    "name must not be empty".to_string(),
                ));
            }
        }
        if let Some(email) = &request.email {
            if !email.contains('@') {
                return Err(SplitmateError::Validation(format!(
                    "invalid email address: {}",
                    email
                )));
            }
        }

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(SplitmateError::UserNotFound { user_id })?;

        let user = self.user_repository.update(user_id, request).await?;
        info!(user_id = user.id, "User profile updated");

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.user_repository.find_by_id(user_id).await
    }
}

/// Strip whitespace and check the phone number shape.
fn normalize_phone(phone: &str) -> Result<String> {
    let normalized: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    if normalized.len() < MIN_PHONE_LEN {
        return Err(SplitmateError::Validation(format!(
            "phone number must have at least {} characters",
            MIN_PHONE_LEN
        )));
    }

    let digits_only = normalized
        .strip_prefix('+')
        .unwrap_or(&normalized)
        .chars()
        .all(|c| c.is_ascii_digit());
    if !digits_only {
        return Err(SplitmateError::Validation(format!(
            "phone number contains invalid characters: {}",
            normalized
        )));
    }

    Ok(normalized)
}
