//! Login credential validation.
//!
//! Handlers construct [`LoginCredentials`] before talking to the login
//! port, so blank inputs never reach an authentication backend and the
//! password is wiped from memory when the credentials drop.

use zeroize::Zeroizing;

/// Rejection raised while validating a login payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Sign-in inputs that passed validation.
///
/// The email is trimmed; the password keeps caller-provided whitespace so
/// comparisons against the stored credential never surprise anyone.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" amara@relief.example ", "pw")?;
/// assert_eq!(creds.email(), "amara@relief.example");
/// # Ok::<(), backend::domain::LoginValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for directory lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// The password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
