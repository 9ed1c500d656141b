//! Request descriptions and their wire encoding.
//!
//! A [`RequestSpec`] is built fresh for every call and never mutated afterwards. Encoding
//! follows the service's conventions: `GET` parameters travel in the query string, every other
//! verb (including `DELETE`) sends them as an `application/x-www-form-urlencoded` body.

// crates.io
use url::form_urlencoded::{self, Serializer as FormSerializer};
// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError};

/// Content type used for encoded parameter bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP verbs understood by the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
	/// `GET`
	#[default]
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}

	/// Returns true when parameters belong in the query string rather than the body.
	pub const fn uses_query_string(self) -> bool {
		matches!(self, Self::Get)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = UnknownMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			"PUT" => Ok(Self::Put),
			"PATCH" => Ok(Self::Patch),
			"DELETE" => Ok(Self::Delete),
			_ => Err(UnknownMethod(s.to_owned())),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<HttpMethod> for reqwest::Method {
	fn from(method: HttpMethod) -> Self {
		match method {
			HttpMethod::Get => Self::GET,
			HttpMethod::Post => Self::POST,
			HttpMethod::Put => Self::PUT,
			HttpMethod::Patch => Self::PATCH,
			HttpMethod::Delete => Self::DELETE,
		}
	}
}

/// Error returned when parsing an unsupported HTTP verb.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unsupported HTTP method `{0}`.")]
pub struct UnknownMethod(pub String);

/// Ordered parameter list; insertion order is kept on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);
impl Params {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a parameter.
	pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
		self.0.push((key.into(), value.to_string()));
	}

	/// Appends a parameter and returns `self` for chaining.
	pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.push(key, value);

		self
	}

	/// Appends a parameter only when a value is present.
	pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
		if let Some(value) = value {
			self.push(key, value);
		}

		self
	}

	/// Returns the value of the first parameter named `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Form-encodes the parameters (`a=1&b=two`).
	pub fn to_form(&self) -> String {
		let mut serializer = FormSerializer::new(String::new());

		serializer.extend_pairs(self.iter());

		serializer.finish()
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: ToString,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.to_string())).collect())
	}
}

/// Request body handed to the transport unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestBody {
	/// `Content-Type` header value.
	pub content_type: String,
	/// Encoded payload.
	pub content: String,
}
impl RequestBody {
	/// Builds a form-encoded body.
	pub fn form(params: &Params) -> Self {
		Self { content_type: FORM_CONTENT_TYPE.into(), content: params.to_form() }
	}
}

/// Immutable description of a single API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
	path: String,
	method: HttpMethod,
	params: Params,
	raw_body: Option<RequestBody>,
	use_auth: bool,
}
impl RequestSpec {
	/// Describes an authenticated call with no parameters.
	pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
		Self { path: path.into(), method, params: Params::new(), raw_body: None, use_auth: true }
	}

	/// Shorthand for a `GET` call.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Get, path)
	}

	/// Shorthand for a `POST` call.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Post, path)
	}

	/// Shorthand for a `PUT` call.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Put, path)
	}

	/// Shorthand for a `PATCH` call.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Patch, path)
	}

	/// Shorthand for a `DELETE` call.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Delete, path)
	}

	/// Appends one percent-encoded path segment, so `/`, `?`, `#` and the like in `value` stay
	/// inside that segment.
	pub fn segment(mut self, value: impl AsRef<str>) -> Self {
		self.path.push('/');
		self.path.extend(form_urlencoded::byte_serialize(value.as_ref().as_bytes()).map(|chunk| {
			match chunk {
				"+" => "%20",
				chunk => chunk,
			}
		}));

		self
	}

	/// Replaces the parameter list.
	pub fn params(mut self, params: Params) -> Self {
		self.params = params;

		self
	}

	/// Appends a single parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.params.push(key, value);

		self
	}

	/// Appends a parameter only when a value is present.
	pub fn param_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
		if let Some(value) = value {
			self.params.push(key, value);
		}

		self
	}

	/// Sends a caller-encoded body verbatim. Parameters, if any, move to the query string.
	pub fn raw_body(mut self, content_type: impl Into<String>, content: impl Into<String>) -> Self {
		self.raw_body = Some(RequestBody { content_type: content_type.into(), content: content.into() });

		self
	}

	/// Sends the call without the bearer token.
	pub fn without_auth(mut self) -> Self {
		self.use_auth = false;

		self
	}

	/// Endpoint path relative to the base URL.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// HTTP verb.
	pub fn method(&self) -> HttpMethod {
		self.method
	}

	/// Parameter list.
	pub fn parameters(&self) -> &Params {
		&self.params
	}

	/// Whether the bearer token is attached.
	pub fn use_auth(&self) -> bool {
		self.use_auth
	}

	/// Resolves the final URL and body for this call.
	pub fn encode(&self, config: &ClientConfig) -> Result<(Url, Option<RequestBody>), ConfigError> {
		let mut url = config.endpoint_url(&self.path)?;
		let params_in_query = self.raw_body.is_some() || self.method.uses_query_string();

		if params_in_query {
			if !self.params.is_empty() {
				url.query_pairs_mut().extend_pairs(self.params.iter());
			}

			return Ok((url, self.raw_body.clone()));
		}

		Ok((url, Some(RequestBody::form(&self.params))))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> ClientConfig {
		ClientConfig::builder()
			.base_url("https://api.example.com")
			.build()
			.expect("Config fixture should be valid.")
	}

	#[test]
	fn segments_are_percent_encoded() {
		let spec = RequestSpec::get("emails").segment("a/b?c#d e+f@example.com").segment("campaigns");
		let (url, _) = spec.encode(&config()).expect("Segmented spec should encode.");

		assert_eq!(spec.path(), "emails/a%2Fb%3Fc%23d%20e%2Bf%40example.com/campaigns");
		assert_eq!(
			url.as_str(),
			"https://api.example.com/emails/a%2Fb%3Fc%23d%20e%2Bf%40example.com/campaigns"
		);
		assert_eq!(url.query(), None);
		assert_eq!(url.fragment(), None);
	}

	#[test]
	fn get_parameters_go_to_query_string() {
		let spec = RequestSpec::get("addressbooks").param("limit", 10).param("offset", 5);
		let (url, body) = spec.encode(&config()).expect("GET spec should encode.");

		assert_eq!(url.as_str(), "https://api.example.com/addressbooks?limit=10&offset=5");
		assert!(body.is_none());
	}

	#[test]
	fn write_verbs_send_form_bodies() {
		for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
			let spec = RequestSpec::new(method, "senders").param("email", "a+b@example.com");
			let (url, body) = spec.encode(&config()).expect("Spec should encode.");
			let body = body.expect("Write verbs should carry a body.");

			assert_eq!(url.as_str(), "https://api.example.com/senders");
			assert_eq!(body.content_type, FORM_CONTENT_TYPE);
			assert_eq!(body.content, "email=a%2Bb%40example.com");
		}
	}

	#[test]
	fn raw_bodies_are_left_untouched() {
		let spec = RequestSpec::post("smtp/emails")
			.param("dry_run", 1)
			.raw_body("application/json", "{\"a\": [1, 2]}");
		let (url, body) = spec.encode(&config()).expect("Raw spec should encode.");

		assert_eq!(url.query(), Some("dry_run=1"));
		assert_eq!(
			body,
			Some(RequestBody { content_type: "application/json".into(), content: "{\"a\": [1, 2]}".into() })
		);
	}

	#[test]
	fn methods_parse_case_insensitively() {
		assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
		assert_eq!(HttpMethod::default(), HttpMethod::Get);
		assert!("TRACE".parse::<HttpMethod>().is_err());
	}

	#[test]
	fn params_keep_insertion_order() {
		let params = Params::new().with("b", 2).with("a", 1).with_opt("c", None::<u32>);

		assert_eq!(params.to_form(), "b=2&a=1");
		assert_eq!(params.get("a"), Some("1"));
		assert_eq!(params.len(), 2);
	}
}
