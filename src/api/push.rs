//! Web push campaigns and subscriptions.

// self
use crate::{
	_prelude::*,
	api::{self, paged},
	client::ApiClient,
	http::ApiTransport,
	outcome::ApiOutcome,
	request::{Params, RequestSpec},
};

/// Push notification to schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushTask {
	/// Notification title.
	pub title: String,
	/// Target website.
	pub website_id: u64,
	/// Notification text.
	pub body: String,
	/// Lifetime in seconds; `0` lets the service pick.
	pub ttl: u64,
}

impl<T> ApiClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists push campaigns.
	pub async fn push_list_campaigns(
		&self,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<ApiOutcome> {
		self.request(paged(RequestSpec::get("push/tasks"), limit, offset)).await
	}

	/// Lists websites registered for push.
	pub async fn push_list_websites(
		&self,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<ApiOutcome> {
		self.request(paged(RequestSpec::get("push/websites"), limit, offset)).await
	}

	/// Number of registered websites.
	pub async fn push_count_websites(&self) -> Result<ApiOutcome> {
		self.request(RequestSpec::get("push/websites/total")).await
	}

	/// Variables defined for a website.
	pub async fn push_website_variables(&self, website_id: u64) -> Result<ApiOutcome> {
		self.request(RequestSpec::get(format!("push/websites/{website_id}/variables"))).await
	}

	/// Subscriptions of a website.
	pub async fn push_website_subscriptions(
		&self,
		website_id: u64,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<ApiOutcome> {
		let spec = RequestSpec::get(format!("push/websites/{website_id}/subscriptions"));

		self.request(paged(spec, limit, offset)).await
	}

	/// Number of subscriptions of a website.
	pub async fn push_count_website_subscriptions(&self, website_id: u64) -> Result<ApiOutcome> {
		self.request(RequestSpec::get(format!("push/websites/{website_id}/subscriptions/total")))
			.await
	}

	/// Activates or deactivates a subscription.
	pub async fn push_set_subscription_state(
		&self,
		subscription_id: u64,
		active: bool,
	) -> Result<ApiOutcome> {
		let spec = RequestSpec::post("push/subscriptions/state")
			.param("id", subscription_id)
			.param("state", u8::from(active));

		self.request(spec).await
	}

	/// Schedules a push notification. `extra` parameters (filters, links, icons) are appended
	/// as-is.
	pub async fn create_push_task(&self, task: &PushTask, extra: Params) -> Result<ApiOutcome> {
		if task.title.is_empty() || task.website_id == 0 || task.body.is_empty() {
			return api::invalid("Not all data");
		}

		let mut params = Params::new()
			.with("title", &task.title)
			.with("website_id", task.website_id)
			.with("body", &task.body)
			.with("ttl", task.ttl);

		for (key, value) in extra.iter() {
			params.push(key, value);
		}

		self.request(RequestSpec::post("push/tasks").params(params)).await
	}
}
