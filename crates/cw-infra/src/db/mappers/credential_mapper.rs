use chrono::{DateTime, TimeZone, Utc};
use cw_core::Credential;

use crate::db::error::DbError;
use crate::db::models::{CredentialRow, NewCredentialRow};
use crate::db::ports::{InsertMapper, RowMapper};

/// `last_login` is stored as unix milliseconds.
pub struct CredentialRowMapper;

impl InsertMapper<Credential, NewCredentialRow> for CredentialRowMapper {
    fn to_row(&self, domain: &Credential) -> NewCredentialRow {
        NewCredentialRow {
            telephone: domain.telephone.clone(),
            user_id: domain.user_id,
            login_code: domain.login_code.clone(),
            account_id: domain.account_id,
            project_id: domain.project_id,
            last_login: domain.last_login.timestamp_millis(),
        }
    }
}

impl RowMapper<CredentialRow, Credential> for CredentialRowMapper {
    fn to_domain(&self, row: &CredentialRow) -> Result<Credential, DbError> {
        Ok(Credential {
            telephone: row.telephone.clone(),
            user_id: row.user_id,
            login_code: row.login_code.clone(),
            account_id: row.account_id,
            project_id: row.project_id,
            last_login: millis_to_utc(row.last_login)?,
        })
    }
}

pub(crate) fn millis_to_utc(ms: i64) -> Result<DateTime<Utc>, DbError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| DbError::Mapping {
            field: "last_login",
            detail: format!("{} ms is out of range", ms),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_round_trip_keeps_millisecond_precision() {
        let last_login = millis_to_utc(1_760_000_000_123).unwrap();
        let credential = Credential {
            telephone: "13800000000".to_string(),
            user_id: 7,
            login_code: "code".to_string(),
            account_id: 8,
            project_id: 30,
            last_login,
        };

        let row = CredentialRowMapper.to_row(&credential);
        assert_eq!(row.last_login, 1_760_000_000_123);

        let loaded = CredentialRowMapper
            .to_domain(&CredentialRow {
                id: 1,
                telephone: row.telephone,
                user_id: row.user_id,
                login_code: row.login_code,
                account_id: row.account_id,
                project_id: row.project_id,
                last_login: row.last_login,
            })
            .unwrap();
        assert_eq!(loaded, credential);
    }

    #[test]
    fn out_of_range_timestamp_is_a_mapping_error() {
        let err = millis_to_utc(i64::MAX).unwrap_err();
        assert!(matches!(err, DbError::Mapping { field: "last_login", .. }));
    }
}
