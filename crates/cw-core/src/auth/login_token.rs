//! Password transform required by the metering backend.
//!
//! The backend accepts `upper(last10(hex(md5(password))))` in the `password`
//! field of the login form. This is a wire-compatibility requirement of a
//! third-party backend and gives no protection to the credential: MD5 is
//! unsalted and the truncated digest is replayable. Keep it bit-exact.

use std::fmt;

use md5::{Digest, Md5};

use super::Password;

/// Number of trailing hex characters of the digest the backend keeps.
const TOKEN_HEX_LEN: usize = 10;

/// Value sent as `password` in the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginToken(String);

impl LoginToken {
    /// Derive the login token from the plaintext password.
    pub fn derive(password: &Password) -> Self {
        let mut hasher = Md5::new();
        hasher.update(password.expose().as_bytes());
        let digest = hex::encode(hasher.finalize());
        let tail = &digest[digest.len() - TOKEN_HEX_LEN..];
        Self(tail.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginToken(***)")
    }
}
