//! Gateway credentials and `Authorization` header construction.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Credentials presented to a gateway on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credentials {
    /// Userid and password, sent as HTTP Basic auth.
    Basic { username: String, password: String },
    /// Pre-issued token, sent as a bearer credential.
    Token { token: String },
}

impl Credentials {
    /// Basic-auth credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer-token credentials.
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token {
            token: token.into(),
        }
    }

    /// The `Authorization` header value for these credentials.
    pub fn authorization(&self) -> String {
        match self {
            Credentials::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
            Credentials::Token { token } => format!("Bearer {}", token),
        }
    }

    /// The userid, when one is known (Basic auth only).
    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Basic { username, .. } => Some(username),
            Credentials::Token { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization() {
        let creds = Credentials::basic("IBMUSER", "SYS1");
        // base64("IBMUSER:SYS1")
        assert_eq!(creds.authorization(), "Basic SUJNVVNFUjpTWVMx");
        assert_eq!(creds.username(), Some("IBMUSER"));
    }

    #[test]
    fn test_token_authorization() {
        let creds = Credentials::token("abc123");
        assert_eq!(creds.authorization(), "Bearer abc123");
        assert_eq!(creds.username(), None);
    }

    #[test]
    fn test_toml_untagged_forms() {
        let basic: Credentials =
            toml::from_str("username = \"IBMUSER\"\npassword = \"SYS1\"\n").unwrap();
        assert!(matches!(basic, Credentials::Basic { .. }));

        let token: Credentials = toml::from_str("token = \"abc\"\n").unwrap();
        assert!(matches!(token, Credentials::Token { .. }));
    }
}
