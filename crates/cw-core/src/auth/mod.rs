//! Login credentials as the backend expects them.

mod login_token;
mod password;

pub use login_token::LoginToken;
pub use password::Password;
