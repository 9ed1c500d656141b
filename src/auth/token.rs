//! Bearer token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque bearer token issued by the token endpoint.
///
/// Expiry is owned by the service; the client only learns a token is stale when a call is
/// answered with `401`. Tokens are replaced wholesale and never mutated.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true when the token carries no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = AccessToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.expose(), "super-secret");
	}

	#[test]
	fn token_serializes_as_plain_string() {
		let token = AccessToken::new("abc");
		let json = serde_json::to_string(&token).expect("Token should serialize to JSON.");

		assert_eq!(json, "\"abc\"");
	}
}
