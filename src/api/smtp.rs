//! Transactional (SMTP) e-mail.

// self
use crate::{
	_prelude::*,
	api::{self, base64, json_field},
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::RequestSpec,
};

/// Name and address pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
	/// Display name.
	pub name: String,
	/// E-mail address.
	pub email: String,
}
impl Mailbox {
	/// Builds a mailbox.
	pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self { name: name.into(), email: email.into() }
	}
}

/// Transactional message.
///
/// `html` is plain markup; it is base64-encoded when the message is sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpEmail {
	/// HTML part.
	pub html: String,
	/// Plain-text part.
	pub text: String,
	/// Subject line.
	pub subject: String,
	/// Sender.
	pub from: Mailbox,
	/// Recipients.
	pub to: Vec<Mailbox>,
	/// Blind-copy recipients.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub bcc: Vec<Mailbox>,
	/// Attachments as file name to file content.
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub attachments: HashMap<String, String>,
}

/// Filters for [`ApiClient::smtp_list_emails`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmtpEmailFilter {
	/// Page size.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
	/// Earliest send date, `YYYY-MM-DD`.
	pub from: Option<String>,
	/// Latest send date, `YYYY-MM-DD`.
	pub to: Option<String>,
	/// Sender address.
	pub sender: Option<String>,
	/// Recipient address.
	pub recipient: Option<String>,
}

/// Unsubscribe-list entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeEntry {
	/// E-mail address.
	pub email: String,
	/// Reason shown in the dashboard.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists sent transactional messages.
	pub async fn smtp_list_emails(&self, filter: &SmtpEmailFilter) -> Result<ApiOutcome> {
		let spec = RequestSpec::get("smtp/emails")
			.param_opt("limit", filter.limit)
			.param_opt("offset", filter.offset)
			.param_opt("from", filter.from.as_deref())
			.param_opt("to", filter.to.as_deref())
			.param_opt("sender", filter.sender.as_deref())
			.param_opt("recipient", filter.recipient.as_deref());

		self.request(spec).await
	}

	/// Fetches one transactional message.
	pub async fn smtp_email_info(&self, message_id: &str) -> Result<ApiOutcome> {
		if message_id.is_empty() {
			return api::invalid("Empty id");
		}

		self.request(RequestSpec::get("smtp/emails").segment(message_id)).await
	}

	/// Adds addresses to the SMTP unsubscribe list.
	pub async fn smtp_unsubscribe_emails(&self, entries: &[UnsubscribeEntry]) -> Result<ApiOutcome> {
		if entries.is_empty() {
			return api::invalid("Empty emails");
		}

		let emails = match json_field(entries) {
			Ok(emails) => emails,
			Err(outcome) => return Ok(outcome),
		};

		self.request(RequestSpec::post("smtp/unsubscribe").param("emails", emails)).await
	}

	/// Removes addresses from the SMTP unsubscribe list.
	pub async fn smtp_remove_from_unsubscribe<S>(&self, emails: &[S]) -> Result<ApiOutcome>
	where
		S: AsRef<str>,
	{
		if emails.is_empty() {
			return api::invalid("Empty emails");
		}

		let emails = emails.iter().map(|email| email.as_ref()).collect::<Vec<&str>>();
		let emails = match json_field(&emails) {
			Ok(emails) => emails,
			Err(outcome) => return Ok(outcome),
		};

		self.request(RequestSpec::delete("smtp/unsubscribe").param("emails", emails)).await
	}

	/// Lists the account's sending IPs.
	pub async fn smtp_list_ips(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("smtp/ips")).await
	}

	/// Lists domains allowed as senders.
	pub async fn smtp_list_allowed_domains(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("smtp/domains")).await
	}

	/// Adds a sender domain; `email` is an address on that domain that receives the check.
	pub async fn smtp_add_domain(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::post("smtp/domains").param("email", email)).await
	}

	/// Re-sends the verification mail for a sender domain.
	pub async fn smtp_verify_domain(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::get("smtp/domains").segment(email)).await
	}

	/// Sends a transactional message.
	pub async fn smtp_send_mail(&self, email: &SmtpEmail) -> Result<ApiOutcome> {
		if email.to.is_empty() || email.from.email.is_empty() {
			return api::invalid("Empty email data");
		}

		let wire = SmtpEmail { html: base64(&email.html), ..email.clone() };
		let encoded = match json_field(&wire) {
			Ok(encoded) => encoded,
			Err(outcome) => return Ok(outcome),
		};

		self.request(RequestSpec::post("smtp/emails").param("email", encoded)).await
	}
}
