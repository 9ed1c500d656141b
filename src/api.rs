//! Endpoint helpers grouped by API area.
//!
//! Each helper validates its required arguments locally, then goes through
//! [`ApiClient::request`](crate::client::ApiClient::request). Missing arguments come back as a
//! [`FailureKind::Validation`](crate::outcome::FailureKind::Validation) outcome and nothing is
//! sent.
//!
//! Bulk e-mail lists travel as a JSON array inside a single form field. Free-text bodies that the
//! service expects in base64 (campaign and template bodies, blacklist lists, SMTP html) are
//! encoded here, so callers always pass plain text.

pub mod address_books;
pub mod campaigns;
pub mod emails;
pub mod push;
pub mod senders;
pub mod smtp;
pub mod templates;

pub use address_books::EmailEntry;
pub use campaigns::CampaignDraft;
pub use push::PushTask;
pub use smtp::{Mailbox, SmtpEmail, SmtpEmailFilter, UnsubscribeEntry};

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, outcome::ApiOutcome, request::RequestSpec};

fn invalid(message: &str) -> Result<ApiOutcome> {
	Ok(crate::outcome::handle_error(Some(message)))
}

fn base64(text: &str) -> String {
	STANDARD.encode(text)
}

fn json_field<S>(value: &S) -> Result<String, ApiOutcome>
where
	S: ?Sized + Serialize,
{
	serde_json::to_string(value)
		.map_err(|e| crate::outcome::handle_error(Some(format!("Failed to encode request field: {e}"))))
}

fn paged(spec: RequestSpec, limit: Option<u32>, offset: Option<u32>) -> RequestSpec {
	spec.param_opt("limit", limit).param_opt("offset", offset)
}
