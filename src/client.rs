//! Authenticated API client: token lifecycle, call dispatch, and refresh-and-retry.
//!
//! [`ApiClient::call`] is the single entry point every endpoint helper goes through. It attaches
//! the held bearer token, sends the request, and when the service answers `401` it refreshes the
//! token once and replays the original request once. A second `401` is returned to the caller
//! as-is, so a misconfigured credential pair cannot loop.

mod token;

pub use token::TokenFetch;

pub use crate::outcome::{handle_error, handle_result};

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CredentialFingerprint, Credentials},
	config::ClientConfig,
	error::AuthenticationError,
	http::{ApiTransport, PreparedRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
	outcome::{ApiOutcome, ResponseEnvelope},
	request::RequestSpec,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

const UNAUTHORIZED: u16 = 401;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Token held by a client, as a state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TokenState {
	/// No token loaded yet.
	#[default]
	Uninitialized,
	/// Holds a token believed valid.
	Authenticated(AccessToken),
	/// A `401` triggered re-authentication; `stale` keeps serving concurrent readers.
	Refreshing {
		/// Token that was held when the refresh started.
		stale: Option<AccessToken>,
	},
}
impl TokenState {
	/// Token to attach to outgoing requests, if any.
	pub fn token(&self) -> Option<&AccessToken> {
		match self {
			Self::Uninitialized => None,
			Self::Authenticated(token) => Some(token),
			Self::Refreshing { stale } => stale.as_ref(),
		}
	}

	/// Data-free label of the state.
	pub fn phase(&self) -> ClientState {
		match self {
			Self::Uninitialized => ClientState::Uninitialized,
			Self::Authenticated(_) => ClientState::Authenticated,
			Self::Refreshing { .. } => ClientState::Refreshing,
		}
	}
}

/// Label of a [`TokenState`], safe to log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientState {
	/// No token loaded yet.
	Uninitialized,
	/// Holds a token believed valid.
	Authenticated,
	/// Re-authenticating after a `401`.
	Refreshing,
}

/// Authenticated client for one credential pair.
///
/// The client owns its credentials and current token; the [`TokenStore`] is shared and only sees
/// tokens. Clones share the token state and the refresh guard, so a refresh performed through one
/// clone is visible to all of them.
pub struct ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	transport: Arc<T>,
	store: Arc<dyn TokenStore>,
	config: ClientConfig,
	credentials: Credentials,
	state: Arc<RwLock<TokenState>>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Builds a client over a caller-provided transport.
	///
	/// A token found in `store` is adopted without any network call. Otherwise one token request
	/// is sent; a rejection fails construction with [`AuthenticationError`].
	pub async fn with_transport(
		config: ClientConfig,
		credentials: Credentials,
		store: Arc<dyn TokenStore>,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let client = Self {
			transport: transport.into(),
			store,
			config,
			credentials,
			state: Default::default(),
			refresh_guard: Default::default(),
		};

		client.initialize().await?;

		Ok(client)
	}

	async fn initialize(&self) -> Result<()> {
		if let Some(token) = self.store.get().await?.filter(|token| !token.is_empty()) {
			*self.state.write() = TokenState::Authenticated(token);

			return Ok(());
		}

		match self.acquire_token().await? {
			TokenFetch::Issued(_) => Ok(()),
			TokenFetch::Rejected { status, reason } =>
				Err(AuthenticationError::TokenRejected { status, reason }.into()),
		}
	}

	/// Sends a call, refreshing the token and replaying the call once if the service answers
	/// `401`.
	///
	/// Non-200 statuses are returned in the envelope, never as errors. Only transport failures,
	/// store failures, and unjoinable paths produce `Err`.
	pub async fn call(&self, spec: RequestSpec) -> Result<ResponseEnvelope> {
		let sent_with = if spec.use_auth() { self.access_token() } else { None };
		let first = self.exchange(CallKind::Call, &spec, sent_with.clone()).await?;

		if first.status != UNAUTHORIZED || !spec.use_auth() {
			return Ok(first);
		}

		obs::record_call_outcome(CallKind::Call, CallOutcome::Refresh);

		match self.refresh_after_rejection(sent_with.as_ref()).await? {
			Some(token) => self.exchange(CallKind::Retry, &spec, Some(token)).await,
			None => Ok(first),
		}
	}

	/// [`call`](Self::call) followed by [`handle_result`].
	pub async fn request(&self, spec: RequestSpec) -> Result<ApiOutcome> {
		let envelope = self.call(spec).await?;

		Ok(handle_result(&envelope))
	}

	/// Clears the stored token and forgets the held one.
	///
	/// The next authenticated call goes out without a bearer token, receives `401`, and
	/// re-authenticates through the refresh path.
	pub async fn reset(&self) -> Result<()> {
		let _refresh = self.refresh_guard.lock().await;

		self.store.clear().await?;
		*self.state.write() = TokenState::Uninitialized;

		Ok(())
	}

	/// Current state label.
	pub fn state(&self) -> ClientState {
		self.state.read().phase()
	}

	/// Snapshot of the token attached to the next request.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.state.read().token().cloned()
	}

	/// Client configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Store key derived from the credentials.
	pub fn fingerprint(&self) -> CredentialFingerprint {
		self.credentials.fingerprint()
	}

	/// Token store shared with other clients.
	pub fn store(&self) -> &Arc<dyn TokenStore> {
		&self.store
	}

	async fn exchange(
		&self,
		kind: CallKind,
		spec: &RequestSpec,
		bearer: Option<AccessToken>,
	) -> Result<ResponseEnvelope> {
		let span = CallSpan::new(kind, spec.path());

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let (url, body) = spec.encode(&self.config)?;
				let request = PreparedRequest { method: spec.method(), url, bearer, body };
				let raw = self.transport.execute(request).await?;

				Ok::<_, Error>(ResponseEnvelope::from_body(raw.status, &raw.body))
			})
			.await;

		match &result {
			Ok(envelope) if envelope.is_ok() => obs::record_call_outcome(kind, CallOutcome::Success),
			_ => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Builds a client against the production host with default settings.
	pub async fn connect(credentials: Credentials, store: Arc<dyn TokenStore>) -> Result<Self> {
		let config = ClientConfig::builder().build()?;

		Self::connect_with(config, credentials, store).await
	}

	/// Builds a client whose reqwest transport honors `config`.
	pub async fn connect_with(
		config: ClientConfig,
		credentials: Credentials,
		store: Arc<dyn TokenStore>,
	) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Self::with_transport(config, credentials, store, transport).await
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			credentials: self.credentials.clone(),
			state: self.state.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("client_id", &self.credentials.client_id())
			.field("state", &self.state())
			.finish()
	}
}
