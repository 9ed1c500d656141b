//! Thread-safe in-memory [`TokenStore`] for single-process deployments and tests.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CredentialFingerprint},
	store::{StoreFuture, TokenStore},
};

type SlotMap = Arc<RwLock<HashMap<CredentialFingerprint, AccessToken>>>;

/// Shared map of tokens keyed by credential fingerprint.
///
/// Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend(SlotMap);
impl MemoryBackend {
	/// Returns a store cell scoped to `fingerprint`.
	pub fn scope(&self, fingerprint: CredentialFingerprint) -> MemoryStore {
		MemoryStore { slots: self.0.clone(), key: fingerprint }
	}

	/// Number of fingerprints currently holding a token.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no token is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}

/// In-memory token cell for one fingerprint.
#[derive(Clone, Debug)]
pub struct MemoryStore {
	slots: SlotMap,
	key: CredentialFingerprint,
}
impl MemoryStore {
	/// Creates a standalone store with its own private backend.
	pub fn new(fingerprint: CredentialFingerprint) -> Self {
		MemoryBackend::default().scope(fingerprint)
	}

	/// Fingerprint this cell is scoped to.
	pub fn fingerprint(&self) -> &CredentialFingerprint {
		&self.key
	}

	fn get_now(&self) -> Option<AccessToken> {
		self.slots.read().get(&self.key).cloned()
	}

	fn set_now(&self, token: AccessToken) {
		self.slots.write().insert(self.key.clone(), token);
	}

	fn clear_now(&self) {
		self.slots.write().remove(&self.key);
	}
}
impl TokenStore for MemoryStore {
	fn get(&self) -> StoreFuture<'_, Option<AccessToken>> {
		Box::pin(async move { Ok(self.get_now()) })
	}

	fn set(&self, token: AccessToken) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.set_now(token);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.clear_now();

			Ok(())
		})
	}
}
