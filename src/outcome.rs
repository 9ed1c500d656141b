//! Uniform success/error contract shared by every endpoint helper.
//!
//! API-level failures (any status other than `200`) and local argument validation never
//! surface as Rust errors: they come back as [`ApiOutcome::Failure`] so callers inspect one
//! shape. Only connectivity problems travel through [`Error`].

// self
use crate::_prelude::*;

/// Status code and parsed body of a single HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
	/// HTTP status code.
	pub status: u16,
	/// Parsed JSON body; `Value::Null` when the body was empty or not JSON.
	pub payload: Value,
}
impl ResponseEnvelope {
	/// Parses a raw body, falling back to `null` for empty or non-JSON content.
	pub fn from_body(status: u16, body: &[u8]) -> Self {
		let payload = serde_json::from_slice(body).unwrap_or(Value::Null);

		Self { status, payload }
	}

	/// Returns true for `200 OK`.
	pub fn is_ok(&self) -> bool {
		self.status == 200
	}
}

/// Why a call did not produce a success payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
	/// Caller-supplied arguments were rejected locally; nothing was sent.
	Validation,
	/// The service answered with a status other than `200`.
	Api,
}

/// Error marker returned in place of a success payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiFailure {
	/// Failure class.
	pub kind: FailureKind,
	/// Human-readable message, when one is known.
	pub message: Option<String>,
	/// HTTP status for [`FailureKind::Api`] failures.
	pub http_code: Option<u16>,
	/// Body returned by the service (an empty object for validation failures).
	pub payload: Value,
}
impl ApiFailure {
	/// Builds a validation failure.
	pub fn validation(message: Option<String>) -> Self {
		Self { kind: FailureKind::Validation, message, http_code: None, payload: empty_object() }
	}

	/// Builds an API failure from a non-200 response.
	pub fn api(status: u16, payload: Value) -> Self {
		let message = payload
			.get("message")
			.or_else(|| payload.get("error_description"))
			.and_then(Value::as_str)
			.map(str::to_owned);

		Self { kind: FailureKind::Api, message, http_code: Some(status), payload }
	}

	/// Overrides the message.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());

		self
	}
}
impl Display for ApiFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match (self.kind, self.http_code, self.message.as_deref()) {
			(FailureKind::Validation, _, Some(message)) => write!(f, "Invalid arguments: {message}."),
			(FailureKind::Validation, _, None) => f.write_str("Invalid arguments."),
			(FailureKind::Api, Some(code), Some(message)) =>
				write!(f, "API returned status {code}: {message}."),
			(FailureKind::Api, Some(code), None) => write!(f, "API returned status {code}."),
			(FailureKind::Api, None, _) => f.write_str("API call failed."),
		}
	}
}

/// Result of an endpoint call: the service payload or an error marker.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiOutcome {
	/// `200 OK` with its payload (an empty object when the body was empty).
	Success(Value),
	/// Validation or API failure.
	Failure(ApiFailure),
}
impl ApiOutcome {
	/// Returns true for failures.
	pub fn is_error(&self) -> bool {
		matches!(self, Self::Failure(_))
	}

	/// Success payload, if any.
	pub fn payload(&self) -> Option<&Value> {
		match self {
			Self::Success(payload) => Some(payload),
			Self::Failure(_) => None,
		}
	}

	/// Failure marker, if any.
	pub fn failure(&self) -> Option<&ApiFailure> {
		match self {
			Self::Success(_) => None,
			Self::Failure(failure) => Some(failure),
		}
	}

	/// Converts into a standard `Result`.
	pub fn into_result(self) -> Result<Value, ApiFailure> {
		match self {
			Self::Success(payload) => Ok(payload),
			Self::Failure(failure) => Err(failure),
		}
	}

	/// Renders the flat JSON shape: the payload with `is_error`, `http_code`, and `message`
	/// merged in for failures.
	pub fn into_json(self) -> Value {
		let failure = match self {
			Self::Success(payload) => return payload,
			Self::Failure(failure) => failure,
		};
		let mut object = match failure.payload {
			Value::Object(map) => map,
			other if is_empty_payload(&other) => Map::new(),
			other => Map::from_iter([("data".to_owned(), other)]),
		};

		object.insert("is_error".into(), Value::Bool(true));

		if let Some(code) = failure.http_code {
			object.insert("http_code".into(), Value::from(code));
		}
		if let Some(message) = failure.message {
			object.entry("message").or_insert(Value::String(message));
		}

		Value::Object(object)
	}
}

/// Shapes a response into the uniform outcome.
///
/// Empty payloads become an empty object; any status other than `200` becomes a
/// [`FailureKind::Api`] failure carrying the status. The function is pure, so shaping the same
/// envelope twice yields the same classification.
pub fn handle_result(envelope: &ResponseEnvelope) -> ApiOutcome {
	let payload =
		if is_empty_payload(&envelope.payload) { empty_object() } else { envelope.payload.clone() };

	if envelope.is_ok() {
		ApiOutcome::Success(payload)
	} else {
		ApiOutcome::Failure(ApiFailure::api(envelope.status, payload))
	}
}

/// Builds a standalone validation failure; used before any request is sent.
pub fn handle_error<S>(message: Option<S>) -> ApiOutcome
where
	S: Into<String>,
{
	ApiOutcome::Failure(ApiFailure::validation(message.map(Into::into)))
}

fn empty_object() -> Value {
	Value::Object(Map::new())
}

fn is_empty_payload(value: &Value) -> bool {
	match value {
		Value::Null | Value::Bool(false) => true,
		Value::String(s) => s.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Bool(true) | Value::Number(_) => false,
	}
}
