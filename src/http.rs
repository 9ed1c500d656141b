//! Transport primitives for API calls.
//!
//! [`ApiTransport`] is the client's only dependency on an HTTP stack. It executes one fully
//! resolved [`PreparedRequest`] and reports the status and raw body; it never retries, never
//! interprets status codes, and never alters the body it is handed. Anything that prevents a
//! response from arriving must surface as a [`TransportError`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::TransportError,
	request::{HttpMethod, RequestBody},
};
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends the request and returns the status code and body bytes.
	fn execute(&self, request: PreparedRequest) -> TransportFuture<'_>;
}

/// Fully resolved request handed to a transport.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Absolute URL including any query string.
	pub url: Url,
	/// Bearer token for the `Authorization` header.
	pub bearer: Option<AccessToken>,
	/// Body, sent verbatim with its content type.
	pub body: Option<RequestBody>,
}

/// Status and body bytes of one HTTP exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Build it through [`ReqwestTransport::from_config`] to pick up the configured timeouts, user
/// agent, and TLS policy. A client built with [`ReqwestTransport::with_client`] is used as-is.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// No [`ClientConfig`] timeouts are applied here; the wrapped client's own settings are the
	/// only deadline. Prefer [`ReqwestTransport::from_config`] unless the caller configures them.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the timeouts, user agent, and TLS policy of `config`.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.connect_timeout(config.connect_timeout)
			.user_agent(config.user_agent.as_str())
			.danger_accept_invalid_certs(config.danger_accept_invalid_certs)
			.build()?;

		Ok(Self(client))
	}

	async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
		let mut builder = self.0.request(request.method.into(), request.url);

		if let Some(token) = request.bearer.as_ref() {
			builder = builder.bearer_auth(token.expose());
		}
		if let Some(body) = request.body {
			builder =
				builder.header(reqwest::header::CONTENT_TYPE, body.content_type).body(body.content);
		}

		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(RawResponse { status, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: PreparedRequest) -> TransportFuture<'_> {
		Box::pin(self.send(request))
	}
}
