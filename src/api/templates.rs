//! Stored e-mail templates.

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
	/// Lists templates.
	pub async fn list_templates(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("templates")).await
	}

	/// Fetches one template.
	pub async fn template_info(&self, template_id: u64) -> Result<ApiOutcome> {
		if template_id == 0 {
			return api::invalid("Empty template id");
		}

		self.request(RequestSpec::get(format!("template/{template_id}"))).await
	}

	/// Stores a template. `lang` is the two-letter editor language code.
	pub async fn create_template(&self, name: &str, body: &str, lang: &str) -> Result<ApiOutcome> {
		if name.is_empty() || body.is_empty() {
			return api::invalid("Empty template name or body");
		}

		let spec = RequestSpec::post("template")
			.param("name", name)
			.param("body", base64(body))
			.param_opt("lang", Some(lang).filter(|lang| !lang.is_empty()));

		self.request(spec).await
	}

	/// Replaces the body of a template.
	pub async fn edit_template(&self, template_id: u64, body: &str) -> Result<ApiOutcome> {
		if template_id == 0 || body.is_empty() {
			return api::invalid("Empty template id or body");
		}

		let spec = RequestSpec::post(format!("template/edit/{template_id}"))
			.param("id", template_id)
			.param("body", base64(body));

		self.request(spec).await
	}

	/// Deletes a template.
	pub async fn remove_template(&self, template_id: u64) -> Result<ApiOutcome> {
		if template_id == 0 {
			return api::invalid("Empty template id");
		}

		self.request(RequestSpec::delete("template").param("template_id", template_id)).await
	}
}
