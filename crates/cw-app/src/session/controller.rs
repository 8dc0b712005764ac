use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::{watch, Mutex};
use tracing::{info, info_span, warn, Instrument};

use cw_core::ports::{
    BackendPort, ClockPort, CredentialStorePort, DelayPort, NotifierPort,
};
use cw_core::{
    Balance, Credential, LoginToken, Notification, OrderNo, Password, Session, SessionSnapshot,
    SessionState, StartOutcome,
};

use super::busy::{BusyGuard, BusyLock};
use super::error::SessionError;
use crate::deps::AppDeps;

/// Result of the startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Nothing stored; stay on the login view.
    NoCredential,
    /// Stored credential accepted by the backend.
    Resumed(SessionSnapshot),
}

/// Owns the login session and runs every user command against the backend.
///
/// ## Behavior
///
/// - At most one backend-facing operation runs at a time; a second one is
///   rejected with [`SessionError::Busy`] and has no side effects.
/// - Every state change is published to [`subscribe`](Self::subscribe) receivers and
///   every user-visible outcome goes through the [`NotifierPort`].
/// - Errors are returned to the caller after the controller is back in an
///   interactive state. The one exception is a failed startup check, which
///   forces `LoggedOut`.
pub struct SessionController {
    credential_store: Arc<dyn CredentialStorePort>,
    backend: Arc<dyn BackendPort>,
    notifier: Arc<dyn NotifierPort>,
    clock: Arc<dyn ClockPort>,
    delay: Arc<dyn DelayPort>,
    settle_delay: Duration,
    session: Mutex<Session>,
    busy: BusyLock,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    pub fn new(deps: AppDeps) -> Self {
        let (state_tx, _) = watch::channel(SessionSnapshot::logged_out());
        Self {
            credential_store: deps.credential_store,
            backend: deps.backend,
            notifier: deps.notifier,
            clock: deps.clock,
            delay: deps.delay,
            settle_delay: deps.settle_delay,
            session: Mutex::new(Session::empty()),
            busy: BusyLock::default(),
            state_tx,
        }
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_tx.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Whether an operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_held()
    }

    /// Log in with telephone and password, persist the credential, then
    /// refresh the balance.
    ///
    /// A failed follow-up refresh is notified but does not fail the login.
    pub async fn login(
        &self,
        telephone: &str,
        password: &Password,
    ) -> Result<SessionSnapshot, SessionError> {
        let telephone = telephone.trim();
        if telephone.is_empty() || password.is_empty() {
            let message = "phone number and password must not be empty";
            self.notifier.notify(Notification::warning(message));
            return Err(SessionError::Validation(message.to_string()));
        }

        let _guard = self.acquire()?;
        let span = info_span!("session.login", telephone = %telephone);

        async {
            let mut session = self.session.lock().await;
            if let Some(current) = &session.credential {
                return Err(SessionError::AlreadyLoggedIn(current.telephone.clone()));
            }

            self.publish(&session, SessionState::Authenticating);
            let token = LoginToken::derive(password);

            let profile = match self.backend.login(telephone, &token).await {
                Ok(profile) => profile,
                Err(e) => {
                    warn!(error = %e, "login rejected");
                    self.notifier
                        .notify(Notification::error(format!("login failed: {}", e.message())));
                    self.publish(&session, SessionState::LoggedOut);
                    return Err(e.into());
                }
            };

            let credential = Credential::from_profile(profile, self.now());
            let stored = match self.credential_store.upsert(credential).await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(error = %e, "failed to persist credential");
                    self.notifier
                        .notify(Notification::error(format!("login failed: {}", e)));
                    self.publish(&session, SessionState::LoggedOut);
                    return Err(e.into());
                }
            };

            *session = Session::with_credential(stored);
            info!("login succeeded");
            self.notifier.notify(Notification::success("login succeeded"));
            self.publish(&session, session.resting_state());

            self.publish(&session, SessionState::Busy);
            let _ = self.refresh_locked(&mut session, true).await;
            Ok(self.publish(&session, SessionState::Ready))
        }
        .instrument(span)
        .await
    }

    /// Startup check: load the most recent credential and validate it with
    /// a balance call.
    ///
    /// Any backend failure is read as an expired credential: the store is
    /// cleared and the controller lands in `LoggedOut`.
    pub async fn resume(&self) -> Result<ResumeOutcome, SessionError> {
        let _guard = self.acquire()?;
        let span = info_span!("session.resume");

        async {
            let mut session = self.session.lock().await;
            if session.is_logged_in() {
                return Ok(ResumeOutcome::Resumed(SessionSnapshot::of(
                    &session,
                    SessionState::Ready,
                )));
            }

            let stored = match self.credential_store.most_recent().await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(error = %e, "failed to load stored credential");
                    self.notifier.notify(Notification::error(format!(
                        "could not read saved login: {}",
                        e
                    )));
                    return Err(e.into());
                }
            };
            let Some(credential) = stored else {
                info!("no stored credential");
                return Ok(ResumeOutcome::NoCredential);
            };

            *session = Session::with_credential(credential);
            self.publish(&session, SessionState::Validating);

            let result = match session.credential.as_ref() {
                Some(credential) => self.backend.balance(credential).await,
                None => return Err(SessionError::NotLoggedIn),
            };

            match result {
                Ok(balance) => {
                    if balance.is_none() {
                        warn!("stored credential accepted but balance is unknown");
                    }
                    session.balance = balance;
                    info!("stored credential accepted");
                    Ok(ResumeOutcome::Resumed(
                        self.publish(&session, SessionState::Ready),
                    ))
                }
                Err(e) => {
                    warn!(error = %e, "stored credential rejected, logging out");
                    self.notifier.notify(Notification::error(
                        "credentials expired, please log in again",
                    ));
                    self.discard_session(&mut session).await;
                    Err(SessionError::ExpiredCredential(e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch the current balance. On failure the previous balance is kept;
    /// `Ok(None)` means the backend answered without a readable amount.
    pub async fn refresh_balance(&self) -> Result<Option<Balance>, SessionError> {
        let _guard = self.acquire()?;
        let span = info_span!("session.refresh_balance");

        async {
            let mut session = self.session.lock().await;
            self.require_credential(&session)?;

            self.publish(&session, SessionState::Busy);
            let result = self.refresh_locked(&mut session, true).await;
            self.publish(&session, session.resting_state());
            result
        }
        .instrument(span)
        .await
    }

    /// Open the valve.
    ///
    /// `errorCode=307` means the valve is already running under this account
    /// and is reported as information, not as a failure. Both success paths
    /// wait for the settle delay and refresh the balance.
    pub async fn start_valve(&self) -> Result<StartOutcome, SessionError> {
        let _guard = self.acquire()?;
        let span = info_span!("session.start_valve");

        async {
            let mut session = self.session.lock().await;
            let credential = self.require_credential(&session)?;

            self.publish(&session, SessionState::Busy);
            self.notifier
                .notify(Notification::info("sending open command..."));

            let outcome = match self.backend.start_valve(&credential).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "start valve failed");
                    self.notifier.notify(Notification::error(format!(
                        "failed to open valve: {}",
                        e.message()
                    )));
                    self.publish(&session, session.resting_state());
                    return Err(e.into());
                }
            };

            match &outcome {
                StartOutcome::Opened => {
                    info!("valve opened");
                    self.notifier.notify(Notification::success("valve opened"));
                }
                StartOutcome::AlreadyRunning { order_no } => {
                    info!(%order_no, "valve already running");
                    self.notifier.notify(Notification::info(
                        "device already in use by this account",
                    ));
                }
            }

            self.settle_then_refresh(&mut session).await;
            self.publish(&session, session.resting_state());
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Close the valve.
    ///
    /// The backend only closes by order number, and the only way to learn the
    /// running order is a start call answering `errorCode=307`. Any other
    /// answer aborts before the close call; a rejected close aborts before
    /// the balance refresh. Returns the closed order.
    pub async fn stop_valve(&self) -> Result<OrderNo, SessionError> {
        let _guard = self.acquire()?;
        let span = info_span!("session.stop_valve");

        async {
            let mut session = self.session.lock().await;
            let credential = self.require_credential(&session)?;

            self.publish(&session, SessionState::Busy);
            self.notifier
                .notify(Notification::info("step 1/2: fetching order number..."));

            let order_no = match self.backend.start_valve(&credential).await {
                Ok(StartOutcome::AlreadyRunning { order_no }) => order_no,
                Ok(StartOutcome::Opened) => {
                    warn!("order lookup found no running order; the lookup call opened the valve");
                    self.notifier.notify(Notification::error(
                        "failed to close valve: valve is not open",
                    ));
                    self.publish(&session, session.resting_state());
                    return Err(SessionError::ValveNotOpen);
                }
                Err(e) => {
                    warn!(error = %e, "order lookup failed");
                    self.notifier.notify(Notification::error(format!(
                        "failed to close valve: {}",
                        e.message()
                    )));
                    self.publish(&session, session.resting_state());
                    return Err(e.into());
                }
            };

            self.notifier.notify(Notification::info(
                "step 2/2: order found, closing valve...",
            ));

            if let Err(e) = self.backend.stop_valve(&credential, &order_no).await {
                warn!(error = %e, %order_no, "close order rejected");
                self.notifier.notify(Notification::error(format!(
                    "failed to close valve: {}",
                    e.message()
                )));
                self.publish(&session, session.resting_state());
                return Err(e.into());
            }

            info!(%order_no, "valve closed");
            self.notifier.notify(Notification::success("valve closed"));
            self.settle_then_refresh(&mut session).await;
            self.publish(&session, session.resting_state());
            Ok(order_no)
        }
        .instrument(span)
        .await
    }

    /// Forget the credential locally. No network call; rejected only while
    /// another operation is in flight.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let _guard = self.acquire()?;
        let span = info_span!("session.logout");

        async {
            let mut session = self.session.lock().await;
            self.discard_session(&mut session).await;
            info!("logged out");
            self.notifier.notify(Notification::info("logged out"));
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, SessionError> {
        self.busy.try_acquire().ok_or(SessionError::Busy)
    }

    fn require_credential(&self, session: &Session) -> Result<Credential, SessionError> {
        session.credential.clone().ok_or(SessionError::NotLoggedIn)
    }

    fn publish(&self, session: &Session, state: SessionState) -> SessionSnapshot {
        let snapshot = SessionSnapshot::of(session, state);
        self.state_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn now(&self) -> chrono::DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.now_ms())
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Balance call while the busy lock is held. `announce` adds the
    /// progress and success notifications; failures are always notified.
    async fn refresh_locked(
        &self,
        session: &mut Session,
        announce: bool,
    ) -> Result<Option<Balance>, SessionError> {
        let credential = self.require_credential(session)?;
        if announce {
            self.notifier.notify(Notification::info("refreshing balance..."));
        }

        match self.backend.balance(&credential).await {
            Ok(Some(balance)) => {
                session.balance = Some(balance.clone());
                if announce {
                    self.notifier.notify(Notification::success("balance updated"));
                }
                Ok(Some(balance))
            }
            Ok(None) => {
                session.balance = None;
                self.notifier.notify(Notification::warning("balance unavailable"));
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "balance refresh failed");
                self.notifier.notify(Notification::error(format!(
                    "failed to refresh balance: {}",
                    e.message()
                )));
                Err(e.into())
            }
        }
    }

    /// Billing lags the valve; wait before reading the balance.
    async fn settle_then_refresh(&self, session: &mut Session) {
        self.delay.sleep(self.settle_delay).await;
        let _ = self.refresh_locked(session, true).await;
    }

    /// Clear store and session, then publish `LoggedOut`. A store failure is
    /// logged; the in-memory session is dropped regardless.
    async fn discard_session(&self, session: &mut Session) {
        if let Err(e) = self.credential_store.clear().await {
            warn!(error = %e, "failed to clear stored credentials");
        }
        session.clear();
        self.publish(session, SessionState::LoggedOut);
    }
}
