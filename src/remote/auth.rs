//! Request authorization

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::{PkgError, Result};

/// Adds credentials to outgoing requests that require them
pub trait RequestAuthorizer {
    /// Add credentials to `headers`; adding nothing is allowed
    fn authorize(&self, headers: &mut HeaderMap) -> Result<()>;
}

type TokenSource = Box<dyn Fn() -> Result<String>>;

/// Sets `Authorization: Bearer <token>` when the token source yields a token
pub struct BearerAuthorizer {
    token: TokenSource,
}

impl BearerAuthorizer {
    /// Authorizer calling `token` for every request
    pub fn new(token: impl Fn() -> Result<String> + 'static) -> Self {
        Self {
            token: Box::new(token),
        }
    }

    /// Authorizer with a fixed token
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::new(move || Ok(token.clone()))
    }
}

impl std::fmt::Debug for BearerAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthorizer").finish_non_exhaustive()
    }
}

impl RequestAuthorizer for BearerAuthorizer {
    fn authorize(&self, headers: &mut HeaderMap) -> Result<()> {
        let token = (self.token)()?;
        if token.is_empty() {
            return Ok(());
        }

        let mut value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| PkgError::ConfigInvalid {
                message: format!("token is not a valid header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
