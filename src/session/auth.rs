//! Login and registration flows.
//!
//! These functions wrap the client's auth endpoints with the local
//! validation and token-persistence behavior of the web client they
//! replace: registration checks the password confirmation before any
//! request is made, and a successful submission stores the issued token.

use crate::client::Llama;
use crate::error::{Error, Result};
use crate::observability::{AUTH_ATTEMPTS, AUTH_FAILURES};
use crate::session::store::TokenStore;
use crate::types::Credentials;

/// Fallback message for login failures without server-supplied text.
pub const LOGIN_FALLBACK: &str = "Invalid email or password";

/// Fallback message for registration failures without server-supplied text.
pub const SIGNUP_FALLBACK: &str = "Registration failed";

/// Message for transport-level failures during either flow.
pub const TRY_AGAIN_LATER: &str = "Something went wrong. Try again later.";

/// Message for a local password confirmation mismatch.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";

/// Submits a login attempt and persists the issued token.
pub async fn login(client: &Llama, store: &TokenStore, credentials: &Credentials) -> Result<String> {
    AUTH_ATTEMPTS.click();
    let token = client.login(credentials).await.inspect_err(|_| {
        AUTH_FAILURES.click();
    })?;
    store.set(&token)?;
    Ok(token)
}

/// Submits a registration attempt and persists the issued token.
///
/// The password confirmation is checked locally first; a mismatch never
/// issues a network call.
pub async fn signup(
    client: &Llama,
    store: &TokenStore,
    credentials: &Credentials,
    confirm_password: &str,
) -> Result<String> {
    if credentials.password != confirm_password {
        return Err(Error::validation(
            PASSWORD_MISMATCH,
            Some("confirm_password".to_string()),
        ));
    }
    AUTH_ATTEMPTS.click();
    let token = client.signup(credentials).await.inspect_err(|_| {
        AUTH_FAILURES.click();
    })?;
    store.set(&token)?;
    Ok(token)
}

/// Clears the stored token, ending the authenticated state.
pub fn logout(store: &TokenStore) -> Result<()> {
    store.clear()
}

/// Maps an auth error to the message shown to the user.
///
/// Server-supplied text is surfaced verbatim; transport failures get the
/// generic try-again message; anything else falls back to the given
/// per-flow default. Local validation messages pass through unchanged.
pub fn auth_error_message(err: &Error, fallback: &str) -> String {
    if let Error::Validation { message, .. } = err {
        return message.clone();
    }
    if err.is_transport() {
        return TRY_AGAIN_LATER.to_string();
    }
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_text_is_surfaced_verbatim() {
        let err = Error::authentication("bad creds");
        assert_eq!(auth_error_message(&err, LOGIN_FALLBACK), "bad creds");
    }

    #[test]
    fn missing_server_text_uses_fallback() {
        let err = Error::api(401, "");
        assert_eq!(
            auth_error_message(&err, LOGIN_FALLBACK),
            "Invalid email or password"
        );
        assert_eq!(
            auth_error_message(&err, SIGNUP_FALLBACK),
            "Registration failed"
        );
    }

    #[test]
    fn transport_errors_get_the_generic_message() {
        let err = Error::connection("refused", None);
        assert_eq!(auth_error_message(&err, LOGIN_FALLBACK), TRY_AGAIN_LATER);
    }

    #[test]
    fn validation_messages_pass_through() {
        let err = Error::validation(PASSWORD_MISMATCH, None);
        assert_eq!(auth_error_message(&err, SIGNUP_FALLBACK), PASSWORD_MISMATCH);
    }
}
