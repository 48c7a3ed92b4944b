//! Access credentials handed to collaborators.

use secrecy::{ExposeSecret, SecretString};

/// Opaque access token for an external platform.
///
/// Debug output is redacted so credentials can't leak into logs or run records.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Token value for building an authorization header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let credential = Credential::new("super-secret-token");

        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.expose(), "super-secret-token");
    }

    #[test]
    fn blank_token_is_empty() {
        assert!(Credential::new("  ").is_empty());
        assert!(!Credential::new("t").is_empty());
    }
}
