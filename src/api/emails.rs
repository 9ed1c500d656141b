//! Address-level lookups, the blacklist, and the account balance.

// self
use crate::{
	_prelude::*,
	api::{self, base64},
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::RequestSpec,
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Everything the account knows about an address, across address books.
	pub async fn email_global_info(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::get("emails").segment(email)).await
	}

	/// Removes an address from every address book.
	pub async fn remove_email_from_all_books(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::delete("emails").segment(email)).await
	}

	/// Per-campaign delivery statistics for an address.
	pub async fn email_stats_by_campaigns(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::get("emails").segment(email).segment("campaigns")).await
	}

	/// Lists blacklisted addresses.
	pub async fn blacklist(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("blacklist")).await
	}

	/// Blacklists addresses. `emails` is a comma-separated list.
	pub async fn add_to_blacklist(&self, emails: &str, comment: Option<&str>) -> Result<ApiOutcome> {
		if emails.is_empty() {
			return api::invalid("Empty email");
		}

		let spec = RequestSpec::post("blacklist")
			.param("emails", base64(emails))
			.param("comment", comment.unwrap_or_default());

		self.request(spec).await
	}

	/// Removes addresses from the blacklist. `emails` is a comma-separated list.
	pub async fn remove_from_blacklist(&self, emails: &str) -> Result<ApiOutcome> {
		if emails.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::delete("blacklist").param("emails", base64(emails))).await
	}

	/// Account balance, optionally converted to `currency` (case-insensitive ISO code).
	pub async fn balance(&self, currency: Option<&str>) -> Result<ApiOutcome> {
		let path = match currency.filter(|currency| !currency.is_empty()) {
			Some(currency) => format!("balance/{}", currency.to_ascii_uppercase()),
			None => "balance".to_owned(),
		};

		self.request(RequestSpec::get(path)).await
	}
}
