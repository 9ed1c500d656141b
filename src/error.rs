//! Client-level error types shared across the transport, token stores, and construction.
//!
//! Only failures that abort an operation live here. API-level rejections (non-200 responses)
//! and local argument validation are reported inline through
//! [`ApiOutcome`](crate::outcome::ApiOutcome) instead.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem (credentials, URLs, HTTP client setup).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Initial token acquisition was rejected while constructing the client.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Connectivity failure (DNS, TCP, TLS, timeout); the request may never have reached the
	/// service.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns true when the failure happened below the HTTP layer.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A credential component was empty.
	#[error("The {field} credential cannot be empty.")]
	EmptyCredential {
		/// Which credential component was empty (`client_id` or `client_secret`).
		field: &'static str,
	},
	/// Base URL cannot be parsed or is not usable as a base.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure, when the string did not parse at all.
		#[source]
		source: Option<url::ParseError>,
	},
	/// Token endpoint path was empty.
	#[error("Token endpoint path cannot be empty.")]
	EmptyTokenPath,
	/// Endpoint path cannot be joined with the base URL.
	#[error("Endpoint path `{path}` cannot be joined with the base URL.")]
	InvalidEndpoint {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Token acquisition failures that make the client unusable.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint refused the client credentials.
	#[error("Token endpoint rejected the client credentials with status {status}: {reason}.")]
	TokenRejected {
		/// HTTP status returned by the token endpoint.
		status: u16,
		/// Short description of the rejection.
		reason: String,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Connect or read deadline elapsed.
	#[error("Timed out while calling the API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
