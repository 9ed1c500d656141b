//! Sender addresses.

// self
use crate::{
	_prelude::*,
	api,
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::RequestSpec,
};

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists registered senders.
	pub async fn list_senders(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("senders")).await
	}

	/// Registers a sender; the service mails an activation code to it.
	pub async fn add_sender(&self, name: &str, email: &str) -> Result<ApiOutcome> {
		if name.is_empty() || email.is_empty() {
			return api::invalid("Empty sender name or email");
		}

		self.request(RequestSpec::post("senders").param("email", email).param("name", name)).await
	}

	/// Removes a sender.
	pub async fn remove_sender(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::delete("senders").param("email", email)).await
	}

	/// Activates a sender with the code it received.
	pub async fn activate_sender(&self, email: &str, code: &str) -> Result<ApiOutcome> {
		if email.is_empty() || code.is_empty() {
			return api::invalid("Empty email or activation code");
		}

		let spec = RequestSpec::post("senders").segment(email).segment("code").param("code", code);

		self.request(spec).await
	}

	/// Asks the service to mail the activation code again.
	pub async fn request_sender_activation_mail(&self, email: &str) -> Result<ApiOutcome> {
		if email.is_empty() {
			return api::invalid("Empty email");
		}

		self.request(RequestSpec::get("senders").segment(email).segment("code")).await
	}
}
