use serde::Deserialize;

/// Body of `POST /api/auth/login`.
#[derive(Deserialize)]
pub struct Login {
    /// Login email.
    pub email: String,
    /// Plain text password.
    pub password: String,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Login")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
