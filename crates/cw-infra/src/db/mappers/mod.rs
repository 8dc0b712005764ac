pub mod credential_mapper;

pub use credential_mapper::CredentialRowMapper;
