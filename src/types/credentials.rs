use serde::{Deserialize, Serialize};

/// Request body for `POST /login` and `POST /signup`.
///
/// Credentials are transient: they exist for the duration of a single
/// submit attempt and are never written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The account email address.
    pub email: String,

    /// The account password.
    pub password: String,
}

impl Credentials {
    /// Create a new `Credentials`.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn credentials_wire_shape() {
        let credentials = Credentials::new("a@b.com", "x");
        let json = to_value(&credentials).unwrap();
        assert_eq!(
            json,
            json!({
                "email": "a@b.com",
                "password": "x"
            })
        );
    }
}
