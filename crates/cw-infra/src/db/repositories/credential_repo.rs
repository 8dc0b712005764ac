use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

use cw_core::ports::{ClockPort, CredentialStoreError, CredentialStorePort};
use cw_core::Credential;

use crate::db::mappers::credential_mapper::millis_to_utc;
use crate::db::models::{CredentialRow, NewCredentialRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::credentials::dsl::*;

pub struct DieselCredentialRepository<E, M> {
    executor: E,
    mapper: M,
    clock: Arc<dyn ClockPort>,
}

impl<E, M> DieselCredentialRepository<E, M> {
    pub fn new(executor: E, mapper: M, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            executor,
            mapper,
            clock,
        }
    }
}

#[async_trait]
impl<E, M> CredentialStorePort for DieselCredentialRepository<E, M>
where
    E: DbExecutor,
    M: InsertMapper<Credential, NewCredentialRow>
        + RowMapper<CredentialRow, Credential>
        + Send
        + Sync,
{
    async fn upsert(&self, credential: Credential) -> Result<Credential, CredentialStoreError> {
        let stored = Credential {
            last_login: millis_to_utc(self.clock.now_ms())?,
            ..credential
        };
        let row = self.mapper.to_row(&stored);

        self.executor.run(move |conn| {
            diesel::insert_into(credentials)
                .values(&row)
                .on_conflict(telephone)
                .do_update()
                .set((
                    user_id.eq(row.user_id),
                    login_code.eq(&row.login_code),
                    account_id.eq(row.account_id),
                    project_id.eq(row.project_id),
                    last_login.eq(row.last_login),
                ))
                .execute(conn)?;
            Ok(())
        })?;

        debug!(telephone = %stored.telephone, "credential stored");
        Ok(stored)
    }

    async fn most_recent(&self) -> Result<Option<Credential>, CredentialStoreError> {
        let row = self.executor.run(|conn| {
            Ok(credentials
                .order((last_login.desc(), id.desc()))
                .first::<CredentialRow>(conn)
                .optional()?)
        })?;

        Ok(row.map(|r| self.mapper.to_domain(&r)).transpose()?)
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        let removed = self
            .executor
            .run(|conn| Ok(diesel::delete(credentials).execute(conn)?))?;

        debug!(removed, "credentials cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::executor::DieselSqliteExecutor;
    use crate::db::mappers::CredentialRowMapper;
    use crate::db::pool::init_db_pool;
    use chrono::Utc;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tempfile::TempDir;

    /// Clock advancing one second per reading
    struct SteppingClock(AtomicI64);

    impl SteppingClock {
        fn starting_at(ms: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(ms)))
        }
    }

    impl ClockPort for SteppingClock {
        fn now_ms(&self) -> i64 {
            self.0.fetch_add(1_000, Ordering::SeqCst)
        }
    }

    type Repo = DieselCredentialRepository<DieselSqliteExecutor, CredentialRowMapper>;

    fn open_repo(dir: &TempDir, clock: Arc<dyn ClockPort>) -> Repo {
        let db_path = dir.path().join("credentials.db");
        let pool = init_db_pool(db_path.to_str().unwrap()).expect("Failed to init db");
        DieselCredentialRepository::new(DieselSqliteExecutor::new(pool), CredentialRowMapper, clock)
    }

    fn credential(phone: &str, code: &str) -> Credential {
        Credential {
            telephone: phone.to_string(),
            user_id: 100,
            login_code: code.to_string(),
            account_id: 200,
            project_id: 30,
            last_login: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_then_most_recent_returns_inserted_record() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(1_700_000_000_000));

        let stored = repo.upsert(credential("13800000001", "code-a")).await.unwrap();
        assert_eq!(stored.last_login.timestamp_millis(), 1_700_000_000_000);

        let loaded = repo.most_recent().await.unwrap().expect("record should exist");
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn upsert_same_telephone_replaces_instead_of_duplicating() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(1_700_000_000_000));

        repo.upsert(credential("13800000001", "old-code")).await.unwrap();
        repo.upsert(credential("13800000001", "new-code")).await.unwrap();

        let loaded = repo.most_recent().await.unwrap().unwrap();
        assert_eq!(loaded.login_code, "new-code");

        let count: i64 = repo
            .executor
            .run(|conn| Ok(credentials.count().get_result(conn)?))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn most_recent_picks_latest_login_across_telephones() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(1_700_000_000_000));

        repo.upsert(credential("13800000001", "a")).await.unwrap();
        repo.upsert(credential("13800000002", "b")).await.unwrap();
        assert_eq!(
            repo.most_recent().await.unwrap().unwrap().telephone,
            "13800000002"
        );

        // logging in again with the first phone makes it the newest
        repo.upsert(credential("13800000001", "a2")).await.unwrap();
        assert_eq!(
            repo.most_recent().await.unwrap().unwrap().telephone,
            "13800000001"
        );
    }

    #[tokio::test]
    async fn clear_then_most_recent_returns_none() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(1_700_000_000_000));

        repo.upsert(credential("13800000001", "a")).await.unwrap();
        repo.upsert(credential("13800000002", "b")).await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.most_recent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn most_recent_on_empty_store_is_none() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(0));

        assert!(repo.most_recent().await.unwrap().is_none());
        repo.clear().await.unwrap();
    }

    #[tokio::test]
    async fn unreadable_row_surfaces_as_storage_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = open_repo(&dir, SteppingClock::starting_at(0));
        repo.executor
            .run(|conn| {
                diesel::insert_into(credentials)
                    .values(NewCredentialRow {
                        telephone: "13800000001".to_string(),
                        user_id: 1,
                        login_code: "x".to_string(),
                        account_id: 2,
                        project_id: 30,
                        last_login: i64::MAX,
                    })
                    .execute(conn)?;
                Ok(())
            })
            .unwrap();

        let err = repo.most_recent().await.unwrap_err();
        assert!(err.to_string().contains("last_login"));
    }

    #[tokio::test]
    async fn credential_survives_reopening_database() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        {
            let repo = open_repo(&dir, SteppingClock::starting_at(1_700_000_000_000));
            repo.upsert(credential("13800000001", "persisted")).await.unwrap();
        }

        let fresh_repo = open_repo(&dir, SteppingClock::starting_at(0));
        let loaded = fresh_repo.most_recent().await.unwrap().unwrap();
        assert_eq!(loaded.login_code, "persisted");
        assert_eq!(loaded.last_login.timestamp_millis(), 1_700_000_000_000);
    }
}
