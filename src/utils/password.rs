//! Password hashes for admin users, stored in bcrypt's modular crypt format.

/// bcrypt cost for new hashes.
pub const HASH_COST: u32 = 10;

/// Hash `password` with a fresh random salt.
///
/// # Errors
/// Errors if bcrypt rejects the password, e.g. when it contains a NUL byte.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Check `password` against a stored bcrypt hash.
/// Hashes bcrypt cannot parse never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or_else(|err| {
        tracing::warn!("Unreadable password hash: {err}");
        false
    })
}
