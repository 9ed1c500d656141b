//! Token acquisition and the serialized refresh path.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::{ApiClient, TokenState},
	http::ApiTransport,
	obs::CallKind,
	outcome::ResponseEnvelope,
	request::RequestSpec,
};

/// Result of one request to the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenFetch {
	/// A token was issued and adopted by the client.
	Issued(AccessToken),
	/// The endpoint refused the credentials or answered with something unusable.
	Rejected {
		/// HTTP status of the token response.
		status: u16,
		/// Short description of the rejection.
		reason: String,
	},
}
impl TokenFetch {
	/// Returns true when a token was issued.
	pub fn is_issued(&self) -> bool {
		matches!(self, Self::Issued(_))
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Requests a new token with the client credentials.
	///
	/// On success the token becomes the client's current token and is written to the store. A
	/// store failure does not discard the issued token. A rejection leaves both untouched and is
	/// reported as [`TokenFetch::Rejected`].
	pub async fn fetch_token(&self) -> Result<TokenFetch> {
		let _refresh = self.refresh_guard.lock().await;

		self.acquire_token().await
	}

	/// Sends the token request; the caller must hold the refresh guard or still own `self`
	/// exclusively.
	pub(super) async fn acquire_token(&self) -> Result<TokenFetch> {
		let spec = RequestSpec::post(self.config.token_path.as_str())
			.param("grant_type", "client_credentials")
			.param("client_id", self.credentials.client_id())
			.param("client_secret", self.credentials.expose_secret())
			.without_auth();
		let envelope = self.exchange(CallKind::Token, &spec, None).await?;
		let token = match parse_token(envelope) {
			Ok(token) => token,
			Err(rejected) => return Ok(rejected),
		};

		*self.state.write() = TokenState::Authenticated(token.clone());

		#[cfg(feature = "tracing")]
		tracing::debug!(fingerprint = %self.credentials.fingerprint(), "access token issued");

		// The issued token stays adopted; only sharing it through the store is lost.
		if let Err(e) = self.store.set(token.clone()).await {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %e, "failed to persist issued access token");
			#[cfg(not(feature = "tracing"))]
			let _ = e;
		}

		Ok(TokenFetch::Issued(token))
	}

	/// Refreshes the token after `rejected` drew a `401`.
	///
	/// Concurrent callers queue on the refresh guard. A caller that finds a token different from
	/// the one it was rejected with reuses it instead of issuing another token request. Returns
	/// `None` when the token endpoint refused, with the previous state restored.
	pub(super) async fn refresh_after_rejection(
		&self,
		rejected: Option<&AccessToken>,
	) -> Result<Option<AccessToken>> {
		let _refresh = self.refresh_guard.lock().await;
		let current = self.access_token();

		if current.is_some() && current.as_ref() != rejected {
			return Ok(current);
		}

		let previous = {
			let mut state = self.state.write();
			let stale = state.token().cloned();

			std::mem::replace(&mut *state, TokenState::Refreshing { stale })
		};

		match self.acquire_token().await {
			Ok(TokenFetch::Issued(token)) => Ok(Some(token)),
			Ok(TokenFetch::Rejected { status, reason }) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(status, %reason, "token refresh rejected");
				#[cfg(not(feature = "tracing"))]
				let _ = (status, reason);

				*self.state.write() = previous;

				Ok(None)
			},
			Err(e) => {
				*self.state.write() = previous;

				Err(e)
			},
		}
	}
}

fn parse_token(envelope: ResponseEnvelope) -> Result<AccessToken, TokenFetch> {
	let status = envelope.status;

	if !envelope.is_ok() {
		return Err(TokenFetch::Rejected { status, reason: describe_rejection(&envelope.payload) });
	}

	match serde_path_to_error::deserialize::<_, TokenResponse>(envelope.payload) {
		Ok(response) if !response.access_token.is_empty() =>
			Ok(AccessToken::new(response.access_token)),
		Ok(_) => Err(TokenFetch::Rejected { status, reason: "empty access_token".into() }),
		Err(e) => Err(TokenFetch::Rejected {
			status,
			reason: format!("malformed token response at `{}`: {}", e.path(), e.inner()),
		}),
	}
}

fn describe_rejection(payload: &Value) -> String {
	["error_description", "message", "error"]
		.iter()
		.find_map(|key| payload.get(*key).and_then(Value::as_str))
		.map(str::to_owned)
		.unwrap_or_else(|| "no error description".into())
}
