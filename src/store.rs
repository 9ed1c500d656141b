//! Token store contract, built-in backends, and backend selection.
//!
//! A store is a single cell scoped to one [`CredentialFingerprint`]: it knows nothing about
//! credentials or HTTP. Two clients built over the same backend and fingerprint observe the same
//! token, which lets separate processes reuse a cached token instead of re-authenticating.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::{MemoryBackend, MemoryStore};

// std
use std::path::PathBuf;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CredentialFingerprint, Credentials},
};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for the bearer token of one credential pair.
///
/// Operations are idempotent: repeating a `set` with the same token or a `clear` on an empty
/// cell is harmless.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the last stored token, if any.
	fn get(&self) -> StoreFuture<'_, Option<AccessToken>>;

	/// Replaces the stored token.
	fn set(&self, token: AccessToken) -> StoreFuture<'_, ()>;

	/// Removes the stored token.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Selects which backend holds tokens, then scopes it to a credential pair.
#[derive(Clone, Debug)]
pub enum StoreDriver {
	/// In-process map; share one [`MemoryBackend`] between clients to share tokens.
	Memory(MemoryBackend),
	/// One JSON file per credential fingerprint inside the given directory.
	File(PathBuf),
}
impl StoreDriver {
	/// Stable label for logs and configuration files.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Memory(_) => "memory",
			Self::File(_) => "file",
		}
	}

	/// Builds a store scoped to the fingerprint of `credentials`.
	pub fn build(&self, credentials: &Credentials) -> Result<Arc<dyn TokenStore>, StoreError> {
		self.build_for(credentials.fingerprint())
	}

	/// Builds a store scoped to an explicit fingerprint.
	pub fn build_for(
		&self,
		fingerprint: CredentialFingerprint,
	) -> Result<Arc<dyn TokenStore>, StoreError> {
		match self {
			Self::Memory(backend) => Ok(Arc::new(backend.scope(fingerprint))),
			Self::File(dir) => Ok(Arc::new(FileStore::open(dir, fingerprint)?)),
		}
	}
}
impl Default for StoreDriver {
	fn default() -> Self {
		Self::Memory(MemoryBackend::default())
	}
}
