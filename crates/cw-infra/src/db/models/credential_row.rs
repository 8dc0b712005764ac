use crate::db::schema::credentials;
use diesel::prelude::*;

#[derive(Debug, Queryable)]
#[diesel(table_name = credentials)]
pub struct CredentialRow {
    pub id: i32,
    pub telephone: String,
    pub user_id: i64,
    pub login_code: String,
    pub account_id: i64,
    pub project_id: i64,
    pub last_login: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = credentials)]
pub struct NewCredentialRow {
    pub telephone: String,
    pub user_id: i64,
    pub login_code: String,
    pub account_id: i64,
    pub project_id: i64,
    pub last_login: i64,
}
