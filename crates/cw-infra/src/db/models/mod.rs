mod credential_row;

pub use credential_row::{CredentialRow, NewCredentialRow};
