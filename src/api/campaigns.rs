//! E-mail campaigns.

// self
use crate::{
	_prelude::*,
	api::{self, base64, json_field, paged},
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::RequestSpec,
};

/// Campaign to schedule against an address book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignDraft {
	/// Display name of the sender.
	pub sender_name: String,
	/// Sender address; must be an activated sender.
	pub sender_email: String,
	/// Subject line.
	pub subject: String,
	/// HTML body, plain text. Base64-encoded on the wire.
	pub body: String,
	/// Stored template used instead of `body`.
	pub template_id: Option<u64>,
	/// Target address book.
	pub list_id: u64,
	/// Internal campaign name.
	pub name: Option<String>,
	/// Attachments as file name to file content.
	pub attachments: HashMap<String, String>,
	/// Delivery time, `YYYY-MM-DD HH:MM:SS`; immediate when absent.
	pub send_date: Option<String>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists campaigns.
	pub async fn list_campaigns(&self, limit: Option<u32>, offset: Option<u32>) -> Result<ApiOutcome> {
		self.request(paged(RequestSpec::get("campaigns"), limit, offset)).await
	}

	/// Fetches one campaign.
	pub async fn campaign_info(&self, campaign_id: u64) -> Result<ApiOutcome> {
		if campaign_id == 0 {
			return api::invalid("Empty campaign id");
		}

		self.request(RequestSpec::get(format!("campaigns/{campaign_id}"))).await
	}

	/// Lists the campaigns sent to an address book.
	pub async fn address_book_campaigns(&self, book_id: u64) -> Result<ApiOutcome> {
		if book_id == 0 {
			return api::invalid("Empty book id");
		}

		self.request(RequestSpec::get(format!("addressbooks/{book_id}/campaigns"))).await
	}

	/// Campaign statistics grouped by recipient country.
	pub async fn campaign_stats_by_countries(&self, campaign_id: u64) -> Result<ApiOutcome> {
		if campaign_id == 0 {
			return api::invalid("Empty campaign id");
		}

		self.request(RequestSpec::get(format!("campaigns/{campaign_id}/countries"))).await
	}

	/// Campaign statistics grouped by followed link.
	pub async fn campaign_stats_by_referrals(&self, campaign_id: u64) -> Result<ApiOutcome> {
		if campaign_id == 0 {
			return api::invalid("Empty campaign id");
		}

		self.request(RequestSpec::get(format!("campaigns/{campaign_id}/referrals"))).await
	}

	/// Creates a campaign.
	///
	/// Sender name, sender e-mail, subject, and address book are required. Either `body` or
	/// `template_id` carries the content.
	pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<ApiOutcome> {
		if draft.sender_name.is_empty()
			|| draft.sender_email.is_empty()
			|| draft.subject.is_empty()
			|| draft.list_id == 0
		{
			return api::invalid("Not all data.");
		}

		let attachments = if draft.attachments.is_empty() {
			None
		} else {
			match json_field(&draft.attachments) {
				Ok(attachments) => Some(attachments),
				Err(outcome) => return Ok(outcome),
			}
		};
		let spec = RequestSpec::post("campaigns")
			.param("sender_name", &draft.sender_name)
			.param("sender_email", &draft.sender_email)
			.param("subject", &draft.subject)
			.param("body", base64(&draft.body))
			.param_opt("template_id", draft.template_id)
			.param("list_id", draft.list_id)
			.param_opt("name", draft.name.as_deref())
			.param_opt("attachments", attachments)
			.param_opt("send_date", draft.send_date.as_deref());

		self.request(spec).await
	}

	/// Updates a scheduled campaign. `list_id` and `attachments` of the draft are not editable
	/// and are ignored.
	pub async fn edit_campaign(&self, campaign_id: u64, draft: &CampaignDraft) -> Result<ApiOutcome> {
		if campaign_id == 0 {
			return api::invalid("Empty campaign id");
		}

		let spec = RequestSpec::patch("campaigns")
			.param("id", campaign_id)
			.param_opt("name", draft.name.as_deref())
			.param("sender_name", &draft.sender_name)
			.param("sender_email", &draft.sender_email)
			.param("subject", &draft.subject)
			.param("body", base64(&draft.body))
			.param_opt("template_id", draft.template_id)
			.param_opt("send_date", draft.send_date.as_deref());

		self.request(spec).await
	}

	/// Cancels a scheduled campaign.
	pub async fn cancel_campaign(&self, campaign_id: u64) -> Result<ApiOutcome> {
		if campaign_id == 0 {
			return api::invalid("Empty campaign id");
		}

		self.request(RequestSpec::delete(format!("campaigns/{campaign_id}"))).await
	}
}
