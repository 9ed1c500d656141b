//! Address books (mailing lists) and their members.

// self
use crate::{
	_prelude::*,
	api::{self, json_field, paged},
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::RequestSpec,
};

/// Address-book member with optional custom variables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailEntry {
	/// E-mail address.
	pub email: String,
	/// Custom variables stored with the address (`name`, `phone`, ...).
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub variables: Map<String, Value>,
}
impl EmailEntry {
	/// Member without variables.
	pub fn new(email: impl Into<String>) -> Self {
		Self { email: email.into(), variables: Map::new() }
	}

	/// Adds a custom variable.
	pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.variables.insert(name.into(), value.into());

		self
	}
}
impl From<&str> for EmailEntry {
	fn from(email: &str) -> Self {
		Self::new(email)
	}
}
impl From<String> for EmailEntry {
	fn from(email: String) -> Self {
		Self::new(email)
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates an address book.
	pub async fn create_address_book(&self, name: &str) -> Result<ApiOutcome> {
		if name.is_empty() {
			return api::invalid("Empty book name");
		}

		self.request(RequestSpec::post("addressbooks").param("bookName", name)).await
	}

	/// Renames an address book.
	pub async fn edit_address_book(&self, book_id: u64, new_name: &str) -> Result<ApiOutcome> {
		if book_id == 0 || new_name.is_empty() {
			return api::invalid("Empty new name or book id");
		}

		self.request(RequestSpec::put(format!("addressbooks/{book_id}")).param("name", new_name))
			.await
	}

	/// Deletes an address book.
	pub async fn remove_address_book(&self, book_id: u64) -> Result<ApiOutcome> {
		if book_id == 0 {
			return api::invalid("Empty book id");
		}

		self.request(RequestSpec::delete(format!("addressbooks/{book_id}"))).await
	}

	/// Lists address books.
	pub async fn list_address_books(
		&self,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<ApiOutcome> {
		self.request(paged(RequestSpec::get("addressbooks"), limit, offset)).await
	}

	/// Fetches one address book.
	pub async fn address_book_info(&self, book_id: u64) -> Result<ApiOutcome> {
		if book_id == 0 {
			return api::invalid("Empty book id");
		}

		self.request(RequestSpec::get(format!("addressbooks/{book_id}"))).await
	}

	/// Lists the members of an address book.
	pub async fn address_book_emails(&self, book_id: u64) -> Result<ApiOutcome> {
		if book_id == 0 {
			return api::invalid("Empty book id");
		}

		self.request(RequestSpec::get(format!("addressbooks/{book_id}/emails"))).await
	}

	/// Adds members to an address book.
	pub async fn add_emails(&self, book_id: u64, emails: &[EmailEntry]) -> Result<ApiOutcome> {
		if book_id == 0 || emails.is_empty() {
			return api::invalid("Empty book id or emails");
		}

		let emails = match json_field(emails) {
			Ok(emails) => emails,
			Err(outcome) => return Ok(outcome),
		};

		self.request(RequestSpec::post(format!("addressbooks/{book_id}/emails")).param("emails", emails))
			.await
	}

	/// Removes members from an address book.
	pub async fn remove_emails<S>(&self, book_id: u64, emails: &[S]) -> Result<ApiOutcome>
	where
		S: AsRef<str>,
	{
		if book_id == 0 || emails.is_empty() {
			return api::invalid("Empty book id or emails");
		}

		let emails = emails.iter().map(|email| email.as_ref()).collect::<Vec<&str>>();
		let emails = match json_field(&emails) {
			Ok(emails) => emails,
			Err(outcome) => return Ok(outcome),
		};

		self.request(
			RequestSpec::delete(format!("addressbooks/{book_id}/emails")).param("emails", emails),
		)
		.await
	}

	/// Fetches one member of an address book.
	pub async fn email_info(&self, book_id: u64, email: &str) -> Result<ApiOutcome> {
		if book_id == 0 || email.is_empty() {
			return api::invalid("Empty book id or email");
		}

		self.request(RequestSpec::get(format!("addressbooks/{book_id}/emails")).segment(email)).await
	}

	/// Estimates the cost of a campaign sent to an address book.
	pub async fn campaign_cost(&self, book_id: u64) -> Result<ApiOutcome> {
		if book_id == 0 {
			return api::invalid("Empty book id");
		}

		self.request(RequestSpec::get(format!("addressbooks/{book_id}/cost"))).await
	}
}
