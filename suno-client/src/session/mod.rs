//! Session manager
//!
//! Owns the "who is signed in" state for the whole client. The state is
//! written only by this type's own methods and observed through a
//! [`watch`] channel, so any number of views can follow it.
//!
//! Lifecycle:
//! - [`SessionManager::init`] runs the identity check once at startup
//! - [`SessionManager::login`] / [`SessionManager::register`] sign in
//! - [`SessionManager::refresh`] re-runs the identity check on demand
//! - [`SessionManager::logout`] signs out
//!
//! Every operation takes a ticket from a [`RequestSequencer`]; a response
//! that arrives after a newer operation started is dropped instead of
//! overwriting the newer state.

mod store;

pub use store::SessionStore;

use shared::{ProfileUpdate, RegisterRequest, User};
use tokio::sync::watch;

use crate::api::SunoApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::sequence::{RequestSequencer, Ticket};
use crate::{ClientConfig, ClientResult};

/// Current authentication state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Identity check pending. Carries the cached user, if any.
    Loading { cached: Option<User> },
    /// No signed-in user
    Anonymous,
    /// Signed in; the user is the server's latest representation
    Authenticated(User),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Loading { cached: None }
    }
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Injectable session manager
pub struct SessionManager<H: HttpClient = NetworkHttpClient> {
    api: SunoApi<H>,
    state: watch::Sender<SessionState>,
    sequencer: RequestSequencer,
    store: Option<SessionStore>,
}

impl<H: HttpClient> std::fmt::Debug for SessionManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .field("store", &self.store)
            .finish()
    }
}

impl SessionManager<NetworkHttpClient> {
    /// Builds a manager with its own network transport and the configured cache
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let api = SunoApi::from_config(config)?;
        let mut manager = Self::new(api);
        if let Some(path) = &config.session_cache {
            manager = manager.with_store(SessionStore::new(path));
        }
        Ok(manager)
    }
}

impl<H: HttpClient> SessionManager<H> {
    pub fn new(api: SunoApi<H>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            api,
            state,
            sequencer: RequestSequencer::new(),
            store: None,
        }
    }

    /// Persist the signed-in user between runs
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn api(&self) -> &SunoApi<H> {
        &self.api
    }

    // ========== State access ==========

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().user().is_some_and(User::is_admin)
    }

    /// The cached user shown while the identity check is pending
    pub fn cached_user(&self) -> Option<User> {
        match &*self.state.borrow() {
            SessionState::Loading { cached } => cached.clone(),
            _ => None,
        }
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ========== Lifecycle ==========

    /// Session bootstrap: one identity check.
    ///
    /// A failed check (no session, network down) resolves to
    /// [`SessionState::Anonymous`] without surfacing an error.
    pub async fn init(&self) -> SessionState {
        let cached = self.store.as_ref().and_then(SessionStore::load);
        if let Some(user) = &cached {
            tracing::debug!(user_id = user.id, "Loaded cached session, validating");
        }
        self.state.send_replace(SessionState::Loading { cached });
        self.refresh().await
    }

    /// Re-runs the identity check against the server
    pub async fn refresh(&self) -> SessionState {
        let ticket = self.sequencer.begin();
        match self.api.me().await {
            Ok(user) => {
                tracing::info!(user_id = user.id, email = %user.email, "Session restored");
                self.apply_user(ticket, user);
            }
            Err(e) => {
                tracing::debug!("Identity check failed, treating as signed out: {}", e);
                self.apply_anonymous(ticket);
            }
        }
        self.state()
    }

    /// Signs in. On failure the error is returned untouched and the
    /// current user is kept.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let ticket = self.sequencer.begin();
        tracing::info!(email, "User login");
        match self.api.login(email, password).await {
            Ok(user) => {
                self.apply_user(ticket, user.clone());
                Ok(user)
            }
            Err(e) => {
                self.settle_loading(ticket);
                Err(e)
            }
        }
    }

    /// Creates an account and signs in with it. Same contract as [`Self::login`].
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> ClientResult<User> {
        let ticket = self.sequencer.begin();
        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: phone.filter(|p| !p.trim().is_empty()).map(str::to_string),
        };
        tracing::info!(email, "User registration");
        match self.api.register(&req).await {
            Ok(user) => {
                self.apply_user(ticket, user.clone());
                Ok(user)
            }
            Err(e) => {
                self.settle_loading(ticket);
                Err(e)
            }
        }
    }

    /// Signs out.
    ///
    /// Local state and cache are cleared whether or not the server call
    /// succeeds; a failed call is still returned so it can be reported.
    pub async fn logout(&self) -> ClientResult<()> {
        // Anything still in flight belongs to the old session
        self.sequencer.invalidate();
        let result = self.api.logout().await;
        if let Err(e) = &result {
            tracing::warn!("Logout request failed, clearing local session anyway: {}", e);
        }
        self.clear_store();
        self.state.send_replace(SessionState::Anonymous);
        tracing::info!("User logged out");
        result
    }

    /// Sends a partial profile update.
    ///
    /// The local user is replaced by the server's representation, not merged
    /// with the update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let ticket = self.sequencer.begin();
        let user = self.api.update_profile(update).await?;
        tracing::info!(user_id = user.id, "Profile updated");
        self.apply_user(ticket, user.clone());
        Ok(user)
    }

    // ========== Internal ==========

    fn apply_user(&self, ticket: Ticket, user: User) {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, "Dropping stale session response");
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&user) {
                tracing::warn!(path = %store.path().display(), "Failed to write session cache: {}", e);
            }
        }
        self.state.send_replace(SessionState::Authenticated(user));
    }

    fn apply_anonymous(&self, ticket: Ticket) {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, "Dropping stale session response");
            return;
        }
        self.clear_store();
        self.state.send_replace(SessionState::Anonymous);
    }

    /// A failed sign-in leaves the user as is but ends any pending bootstrap.
    fn settle_loading(&self, ticket: Ticket) {
        if self.sequencer.is_current(ticket) && self.is_loading() {
            self.state.send_replace(SessionState::Anonymous);
        }
    }

    fn clear_store(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(path = %store.path().display(), "Failed to remove session cache: {}", e);
            }
        }
    }
}
