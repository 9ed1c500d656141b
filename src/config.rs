//! Client configuration and its validating builder.

// std
use std::time::Duration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.sendpulse.com";
/// Path of the OAuth2 token endpoint relative to the base URL.
pub const DEFAULT_TOKEN_PATH: &str = "oauth/access_token";
/// Default overall request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default TCP/TLS connect deadline.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated settings shared by the client and its transport.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base URL every endpoint path is joined onto.
	pub base_url: Url,
	/// Token endpoint path, joined onto [`ClientConfig::base_url`].
	pub token_path: String,
	/// Overall request deadline.
	pub timeout: Duration,
	/// Connect deadline.
	pub connect_timeout: Duration,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Skips server certificate validation. Only meant for self-signed test servers.
	pub danger_accept_invalid_certs: bool,
}
impl ClientConfig {
	/// Starts a builder seeded with production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Joins an endpoint path onto the base URL.
	///
	/// Leading slashes on `path` are ignored so `smtp/emails` and `/smtp/emails` resolve to the
	/// same URL.
	pub fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
		let joined = format!(
			"{}/{}",
			self.base_url.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		);

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Raw base URL, parsed during [`ClientConfigBuilder::build`].
	pub base_url: String,
	/// Token endpoint path.
	pub token_path: String,
	/// Overall request deadline.
	pub timeout: Duration,
	/// Connect deadline.
	pub connect_timeout: Duration,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Skips server certificate validation.
	pub danger_accept_invalid_certs: bool,
}
impl ClientConfigBuilder {
	/// Overrides the base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the token endpoint path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Overrides the overall request deadline.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the connect deadline.
	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
		self.user_agent = agent.into();

		self
	}

	/// Disables server certificate validation. Never enable this against the production host.
	pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
		self.danger_accept_invalid_certs = accept;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
			url: self.base_url.clone(),
			source: Some(source),
		})?;

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl { url: self.base_url, source: None });
		}

		let token_path = self.token_path.trim_start_matches('/');

		if token_path.is_empty() {
			return Err(ConfigError::EmptyTokenPath);
		}

		Ok(ClientConfig {
			base_url,
			token_path: token_path.to_owned(),
			timeout: self.timeout,
			connect_timeout: self.connect_timeout,
			user_agent: self.user_agent,
			danger_accept_invalid_certs: self.danger_accept_invalid_certs,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.into(),
			token_path: DEFAULT_TOKEN_PATH.into(),
			timeout: DEFAULT_TIMEOUT,
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
			user_agent: default_user_agent(),
			danger_accept_invalid_certs: false,
		}
	}
}

fn default_user_agent() -> String {
	format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_verify_tls_and_use_production_host() {
		let config = ClientConfig::builder().build().expect("Default config should be valid.");

		assert_eq!(config.base_url.as_str(), "https://api.sendpulse.com/");
		assert_eq!(config.token_path, "oauth/access_token");
		assert_eq!(config.timeout, Duration::from_secs(30));
		assert!(!config.danger_accept_invalid_certs);
		assert!(config.user_agent.starts_with("sendpulse-api/"));
	}

	#[test]
	fn endpoint_url_ignores_leading_slashes() {
		let config = ClientConfig::builder()
			.base_url("http://127.0.0.1:8080/api/")
			.build()
			.expect("Config fixture should be valid.");

		assert_eq!(
			config.endpoint_url("/smtp/emails").expect("Path should join.").as_str(),
			"http://127.0.0.1:8080/api/smtp/emails"
		);
		assert_eq!(
			config.endpoint_url("smtp/emails").expect("Path should join.").as_str(),
			"http://127.0.0.1:8080/api/smtp/emails"
		);
	}

	#[test]
	fn builder_rejects_bad_values() {
		assert!(matches!(
			ClientConfig::builder().base_url("not a url").build(),
			Err(ConfigError::InvalidBaseUrl { source: Some(_), .. })
		));
		assert!(matches!(
			ClientConfig::builder().base_url("ftp://example.com").build(),
			Err(ConfigError::InvalidBaseUrl { source: None, .. })
		));
		assert!(matches!(
			ClientConfig::builder().token_path("/").build(),
			Err(ConfigError::EmptyTokenPath)
		));
	}
}
