//! Client credentials and the fingerprint token stores use as a cache key.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, error::ConfigError};

const FINGERPRINT_SEPARATOR: &str = "::";

/// Immutable client id + secret pair used for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: String,
}
impl Credentials {
	/// Validates and wraps a credential pair; both halves must be non-empty.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();

		if client_id.is_empty() {
			return Err(ConfigError::EmptyCredential { field: "client_id" });
		}
		if client_secret.is_empty() {
			return Err(ConfigError::EmptyCredential { field: "client_secret" });
		}

		Ok(Self { client_id, client_secret })
	}

	/// Client identifier sent to the token endpoint.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret sent to the token endpoint. Callers must avoid logging this string.
	pub fn expose_secret(&self) -> &str {
		&self.client_secret
	}

	/// Stable digest of the pair, suitable as a token-store key.
	pub fn fingerprint(&self) -> CredentialFingerprint {
		CredentialFingerprint::compute(&self.client_id, &self.client_secret)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

/// Base64 (URL-safe, no padding) SHA-256 digest of `client_id::client_secret`.
///
/// A cache key, not a security credential: same pair, same fingerprint. The alphabet is safe
/// to embed in file names.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialFingerprint(String);
impl CredentialFingerprint {
	fn compute(client_id: &str, client_secret: &str) -> Self {
		let mut hasher = Sha256::new();

		hasher.update(client_id.as_bytes());
		hasher.update(FINGERPRINT_SEPARATOR.as_bytes());
		hasher.update(client_secret.as_bytes());

		Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
	}

	/// Returns the encoded digest.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for CredentialFingerprint {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for CredentialFingerprint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CredentialFingerprint({})", self.0)
	}
}
impl Display for CredentialFingerprint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
