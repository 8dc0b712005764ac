use anyhow::Context;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use tracing::{debug, warn};

use cw_core::ports::{BackendError, BackendPort, Endpoint};
use cw_core::{AppConfig, Balance, Credential, LoginProfile, LoginToken, OrderNo, StartOutcome};

use super::dto::{value_to_order_no, ApiEnvelope, LoginData, ERROR_CODE_DEVICE_IN_USE};

/// Header the valve endpoints route on.
const CONFIG_PROJECT_HEADER: &str = "Config-Project";
const LOGIN_TYPE: &str = "0";
const XF_MODEL: &str = "0";

/// reqwest-backed [`BackendPort`].
///
/// 无状态 HTTP 客户端：每次调用都显式传入凭证。
pub struct HttpBackendClient {
    http: reqwest::Client,
    base_url: String,
    client_version: String,
    phone_system: String,
    sn_code: String,
}

impl HttpBackendClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_version: config.client_version.clone(),
            phone_system: config.phone_system.clone(),
            sn_code: config.sn_code.clone(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Send and decode the JSON envelope. Does not look at `success`.
    async fn send(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope, BackendError> {
        debug!(%endpoint, "sending backend request");

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::remote(endpoint, format!("request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%endpoint, %status, "backend returned non-success status");
            return Err(BackendError::remote(endpoint, format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::remote(endpoint, format!("failed to read body: {}", e)))?;

        serde_json::from_str::<ApiEnvelope>(&body)
            .map_err(|e| BackendError::remote(endpoint, format!("invalid JSON response: {}", e)))
    }

    fn rejected(endpoint: Endpoint, envelope: &ApiEnvelope, fallback: &str) -> BackendError {
        BackendError::remote(endpoint, envelope.message().unwrap_or(fallback))
    }

    /// Form fields shared by start-valve; also used to look up the running order.
    fn start_form(&self, credential: &Credential) -> Vec<(&'static str, String)> {
        vec![
            ("accountId", credential.account_id.to_string()),
            ("loginCode", credential.login_code.clone()),
            ("userId", credential.user_id.to_string()),
            ("telephone", credential.telephone.clone()),
            ("phoneSystem", self.phone_system.clone()),
            ("projectId", credential.project_id.to_string()),
            ("snCode", self.sn_code.clone()),
            ("telPhone", credential.telephone.clone()),
            ("version", self.client_version.clone()),
            ("xfModel", XF_MODEL.to_string()),
        ]
    }
}

#[async_trait]
impl BackendPort for HttpBackendClient {
    async fn login(
        &self,
        telephone: &str,
        token: &LoginToken,
    ) -> Result<LoginProfile, BackendError> {
        let endpoint = Endpoint::Login;
        let form = [
            ("password", token.as_str()),
            ("phoneSystem", self.phone_system.as_str()),
            ("telephone", telephone),
            ("type", LOGIN_TYPE),
            ("version", self.client_version.as_str()),
        ];

        let envelope = self
            .send(endpoint, self.http.post(self.url(endpoint)).form(&form))
            .await?;
        if !envelope.success {
            return Err(Self::rejected(endpoint, &envelope, "invalid login credentials"));
        }

        let data = envelope
            .data
            .ok_or_else(|| BackendError::remote(endpoint, "response has no data"))?;
        let data: LoginData = serde_json::from_value(data)
            .map_err(|e| BackendError::remote(endpoint, format!("unexpected login data: {}", e)))?;

        Ok(LoginProfile {
            telephone: data.telephone.unwrap_or_else(|| telephone.to_string()),
            user_id: data.user_id,
            login_code: data.login_code,
            account_id: data.user_account.account_id,
            project_id: data.user_account.project_id,
        })
    }

    async fn balance(&self, credential: &Credential) -> Result<Option<Balance>, BackendError> {
        let endpoint = Endpoint::Balance;
        let query = [
            ("accountId", credential.account_id.to_string()),
            ("loginCode", credential.login_code.clone()),
            ("userId", credential.user_id.to_string()),
            ("projectId", credential.project_id.to_string()),
            ("telephone", credential.telephone.clone()),
            ("phoneSystem", self.phone_system.clone()),
            ("version", self.client_version.clone()),
            ("telPhone", credential.telephone.clone()),
        ];

        let envelope = self
            .send(endpoint, self.http.get(self.url(endpoint)).query(&query))
            .await?;
        if !envelope.success {
            return Err(Self::rejected(endpoint, &envelope, "unknown error"));
        }

        let balance = envelope.data_field("money").and_then(Balance::from_json);
        if balance.is_none() {
            warn!(%endpoint, "wallet reply carries no readable data.money");
        }
        Ok(balance)
    }

    async fn start_valve(&self, credential: &Credential) -> Result<StartOutcome, BackendError> {
        let endpoint = Endpoint::StartValve;
        let request = self
            .http
            .post(self.url(endpoint))
            .header(CONFIG_PROJECT_HEADER, credential.project_id.to_string())
            .form(&self.start_form(credential));

        let envelope = self.send(endpoint, request).await?;
        if envelope.success {
            return Ok(StartOutcome::Opened);
        }
        if envelope.has_error_code(ERROR_CODE_DEVICE_IN_USE) {
            let order_no = envelope
                .data_field("orderNo")
                .and_then(value_to_order_no)
                .ok_or_else(|| BackendError::remote(endpoint, "device in use but no orderNo"))?;
            debug!(%order_no, "valve already running");
            return Ok(StartOutcome::AlreadyRunning {
                order_no: OrderNo::new(order_no),
            });
        }

        Err(Self::rejected(endpoint, &envelope, "unknown error"))
    }

    async fn stop_valve(
        &self,
        credential: &Credential,
        order_no: &OrderNo,
    ) -> Result<(), BackendError> {
        let endpoint = Endpoint::StopValve;
        let form = [
            ("accountId", credential.account_id.to_string()),
            ("loginCode", credential.login_code.clone()),
            ("userId", credential.user_id.to_string()),
            ("orderNo", order_no.as_str().to_string()),
            ("phoneSystem", self.phone_system.clone()),
            ("projectId", credential.project_id.to_string()),
            ("snCode", self.sn_code.clone()),
            ("version", self.client_version.clone()),
        ];
        let request = self
            .http
            .post(self.url(endpoint))
            .header(CONFIG_PROJECT_HEADER, credential.project_id.to_string())
            .form(&form);

        let envelope = self.send(endpoint, request).await?;
        if !envelope.success {
            return Err(Self::rejected(endpoint, &envelope, "unknown error"));
        }
        Ok(())
    }
}
