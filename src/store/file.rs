//! File-backed [`TokenStore`] shared by every process that can see the same directory.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
	process,
	sync::atomic::{AtomicU64, Ordering},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, CredentialFingerprint},
	store::{StoreError, StoreFuture, TokenStore},
};

static TMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// On-disk snapshot of a stored token.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
	access_token: AccessToken,
	#[serde(with = "time::serde::timestamp")]
	saved_at: OffsetDateTime,
}

/// Persists the token of one fingerprint to `<dir>/token_<fingerprint>.json`.
///
/// Every read goes to disk so a token written by another process is picked up without a
/// restart. Writes go to a temporary file unique to the writer and then replace the file
/// atomically, so any number of stores and processes may share a fingerprint.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	write_lock: Arc<Mutex<()>>,
}
impl FileStore {
	/// Opens (or prepares) the store file for `fingerprint` inside `dir`.
	pub fn open(dir: impl AsRef<Path>, fingerprint: CredentialFingerprint) -> Result<Self, StoreError> {
		let dir = dir.as_ref();

		fs::create_dir_all(dir).map_err(|e| StoreError::Backend {
			message: format!("Failed to create store directory {}: {e}", dir.display()),
		})?;

		let path = dir.join(format!("token_{fingerprint}.json"));

		Ok(Self { path, write_lock: Default::default() })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load(&self) -> Result<Option<AccessToken>, StoreError> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) =>
				return Err(StoreError::Backend {
					message: format!("Failed to read {}: {e}", self.path.display()),
				}),
		};

		if bytes.is_empty() {
			return Ok(None);
		}

		let stored: StoredToken =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", self.path.display()),
			})?;

		Ok(Some(stored.access_token).filter(|token| !token.is_empty()))
	}

	fn persist(&self, token: AccessToken) -> Result<(), StoreError> {
		let stored = StoredToken { access_token: token, saved_at: OffsetDateTime::now_utc() };
		let serialized =
			serde_json::to_vec_pretty(&stored).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize token snapshot: {e}"),
			})?;
		let tmp_path = self.tmp_path();
		let _guard = self.write_lock.lock();

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| {
			let _ = fs::remove_file(&tmp_path);

			StoreError::Backend { message: format!("Failed to replace {}: {e}", self.path.display()) }
		})
	}

	fn tmp_path(&self) -> PathBuf {
		let sequence = TMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
		let name = format!(
			"{}.{}.{sequence}.tmp",
			self.path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("token"),
			process::id(),
		);

		self.path.with_file_name(name)
	}

	fn remove(&self) -> Result<(), StoreError> {
		let _guard = self.write_lock.lock();

		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to remove {}: {e}", self.path.display()),
			}),
		}
	}
}
impl TokenStore for FileStore {
	fn get(&self) -> StoreFuture<'_, Option<AccessToken>> {
		Box::pin(async move { self.load() })
	}

	fn set(&self, token: AccessToken) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.persist(token) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.remove() })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, thread};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;
	use crate::auth::Credentials;

	fn temp_dir() -> PathBuf {
		let unique = format!(
			"sendpulse_api_file_store_{}_{}",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn fingerprint() -> CredentialFingerprint {
		Credentials::new("file-client", "file-secret")
			.expect("Credential fixture should be valid.")
			.fingerprint()
	}

	#[test]
	fn set_and_reopen_round_trip() {
		let dir = temp_dir();
		let store = FileStore::open(&dir, fingerprint()).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.set(AccessToken::new("disk-token")))
			.expect("Failed to save token to file store.");
		drop(store);

		let reopened = FileStore::open(&dir, fingerprint()).expect("Failed to reopen file store.");
		let fetched = rt
			.block_on(reopened.get())
			.expect("Failed to read token from file store.")
			.expect("File store lost token after reopen.");

		assert_eq!(fetched.expose(), "disk-token");
		assert!(reopened.path().ends_with(format!("token_{}.json", fingerprint())));

		fs::remove_dir_all(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store directory {}: {e}", dir.display())
		});
	}

	#[test]
	fn clear_is_idempotent_and_missing_file_reads_as_absent() {
		let dir = temp_dir();
		let store = FileStore::open(&dir, fingerprint()).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		assert_eq!(rt.block_on(store.get()).expect("Empty store should read."), None);

		rt.block_on(store.set(AccessToken::new("short-lived"))).expect("Set should succeed.");
		rt.block_on(store.clear()).expect("First clear should succeed.");
		rt.block_on(store.clear()).expect("Second clear should succeed.");

		assert_eq!(rt.block_on(store.get()).expect("Cleared store should read."), None);

		fs::remove_dir_all(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store directory {}: {e}", dir.display())
		});
	}

	#[test]
	fn corrupt_file_is_a_serialization_error() {
		let dir = temp_dir();
		let store = FileStore::open(&dir, fingerprint()).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		fs::write(store.path(), b"{not json").expect("Failed to write corrupt fixture.");

		let err = rt.block_on(store.get()).expect_err("Corrupt snapshot should fail to parse.");

		assert!(matches!(err, StoreError::Serialization { .. }));

		fs::remove_dir_all(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store directory {}: {e}", dir.display())
		});
	}

	#[test]
	fn independent_stores_can_write_the_same_fingerprint_concurrently() {
		let dir = temp_dir();
		let writers = (0..4)
			.map(|writer| {
				let store = FileStore::open(&dir, fingerprint()).expect("Failed to open file store.");

				thread::spawn(move || {
					let rt =
						Runtime::new().expect("Failed to build Tokio runtime for file store test.");

					(0..200)
						.filter(|round| {
							let token = AccessToken::new(format!("writer-{writer}-{round}"));

							rt.block_on(store.set(token)).is_err()
						})
						.count()
				})
			})
			.collect::<Vec<_>>();
		let failures = writers
			.into_iter()
			.map(|writer| writer.join().expect("Writer thread should not panic."))
			.sum::<usize>();

		assert_eq!(failures, 0);

		let store = FileStore::open(&dir, fingerprint()).expect("Failed to reopen file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let last = rt
			.block_on(store.get())
			.expect("Store should read after concurrent writes.")
			.expect("One of the written tokens should be stored.");

		assert!(last.expose().starts_with("writer-"));

		let leftovers = fs::read_dir(&dir)
			.expect("Store directory should be listable.")
			.filter_map(|entry| entry.ok())
			.filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
			.count();

		assert_eq!(leftovers, 0);

		fs::remove_dir_all(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store directory {}: {e}", dir.display())
		});
	}
}
