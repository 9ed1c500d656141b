#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use sendpulse_api::{
	api::{CampaignDraft, EmailEntry, Mailbox, PushTask, SmtpEmail},
	outcome::{ApiOutcome, FailureKind},
	request::Params,
	url::form_urlencoded::Serializer,
};

fn form(pairs: &[(&str, &str)]) -> String {
	let mut serializer = Serializer::new(String::new());

	serializer.extend_pairs(pairs.iter().copied());

	serializer.finish()
}

#[tokio::test]
async fn missing_required_arguments_never_reach_the_network() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let anything = server
		.mock_async(|_when, then| {
			then.status(500);
		})
		.await;
	let outcomes = [
		client.create_address_book("").await,
		client.remove_address_book(0).await,
		client.add_emails(7, &[]).await,
		client.add_sender("News", "").await,
		client.add_to_blacklist("", None).await,
		client.smtp_send_mail(&SmtpEmail::default()).await,
		client.create_campaign(&CampaignDraft::default()).await,
		client.edit_campaign(0, &CampaignDraft::default()).await,
		client.create_push_task(&PushTask::default(), Params::new()).await,
		client.remove_template(0).await,
	];

	for outcome in outcomes {
		let outcome = outcome.expect("Validation failures are outcomes, not errors.");
		let failure = outcome.failure().expect("Missing arguments should fail.");

		assert!(outcome.is_error());
		assert_eq!(failure.kind, FailureKind::Validation);
		assert!(failure.message.is_some());
	}

	anything.assert_calls_async(0).await;
}

#[tokio::test]
async fn create_address_book_reports_api_failures_with_status() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/addressbooks").body("bookName=Weekly");
			then.status(400).body("{\"error_code\":203,\"message\":\"Book name already in use\"}");
		})
		.await;
	let outcome = client.create_address_book("Weekly").await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(
		outcome.into_json(),
		json!({
			"error_code": 203,
			"message": "Book name already in use",
			"is_error": true,
			"http_code": 400,
		})
	);
}

#[tokio::test]
async fn bulk_email_lists_travel_as_json_arrays() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let expected = form(&[(
		"emails",
		r#"[{"email":"a@example.com"},{"email":"b@example.com","variables":{"name":"Bo"}}]"#,
	)]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/addressbooks/7/emails").body(expected);
			then.status(200).body("{\"result\":true}");
		})
		.await;
	let entries = [
		EmailEntry::from("a@example.com"),
		EmailEntry::new("b@example.com").variable("name", "Bo"),
	];
	let outcome = client.add_emails(7, &entries).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome, ApiOutcome::Success(json!({ "result": true })));
}

#[tokio::test]
async fn campaign_bodies_are_base64_encoded() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let expected = form(&[
		("sender_name", "News"),
		("sender_email", "news@example.com"),
		("subject", "Hello"),
		("body", "PHA+SGk8L3A+"),
		("list_id", "42"),
		("name", "launch"),
	]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/campaigns").body(expected);
			then.status(200).body("{\"id\":100,\"status\":13}");
		})
		.await;
	let draft = CampaignDraft {
		sender_name: "News".into(),
		sender_email: "news@example.com".into(),
		subject: "Hello".into(),
		body: "<p>Hi</p>".into(),
		list_id: 42,
		name: Some("launch".into()),
		..Default::default()
	};
	let outcome = client.create_campaign(&draft).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome.payload(), Some(&json!({ "id": 100, "status": 13 })));
}

#[tokio::test]
async fn campaign_edits_are_patched_as_a_form_body() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let expected = form(&[
		("id", "100"),
		("name", "launch"),
		("sender_name", "News"),
		("sender_email", "news@example.com"),
		("subject", "Hello again"),
		("body", "PHA+SGk8L3A+"),
		("send_date", "2026-11-01 09:00:00"),
	]);
	let mock = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/campaigns")
				.header("content-type", "application/x-www-form-urlencoded")
				.header("authorization", "Bearer T1")
				.body(expected);
			then.status(200).body("{\"result\":true}");
		})
		.await;
	let draft = CampaignDraft {
		sender_name: "News".into(),
		sender_email: "news@example.com".into(),
		subject: "Hello again".into(),
		body: "<p>Hi</p>".into(),
		list_id: 42,
		name: Some("launch".into()),
		send_date: Some("2026-11-01 09:00:00".into()),
		..Default::default()
	};
	let outcome = client.edit_campaign(100, &draft).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome, ApiOutcome::Success(json!({ "result": true })));
}

#[tokio::test]
async fn email_path_segments_are_percent_encoded() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/emails/odd%23name%3Fx%2Fy%40example.com/campaigns");
			then.status(200).body("[{\"task_id\":7}]");
		})
		.await;
	let outcome = client
		.email_stats_by_campaigns("odd#name?x/y@example.com")
		.await
		.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome, ApiOutcome::Success(json!([{ "task_id": 7 }])));
}

#[tokio::test]
async fn smtp_html_is_encoded_inside_the_json_message() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let email = SmtpEmail {
		html: "<b>Hi</b>".into(),
		text: "Hi".into(),
		subject: "Greetings".into(),
		from: Mailbox::new("Shop", "shop@example.com"),
		to: vec![Mailbox::new("Ann", "ann@example.com")],
		..Default::default()
	};
	let wire = serde_json::to_string(&SmtpEmail { html: "PGI+SGk8L2I+".into(), ..email.clone() })
		.expect("Message fixture should serialize.");
	let expected = form(&[("email", wire.as_str())]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/smtp/emails").body(expected);
			then.status(200).body("{\"result\":true,\"id\":\"y7sdfR\"}");
		})
		.await;
	let outcome = client.smtp_send_mail(&email).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert!(!outcome.is_error());
}

#[tokio::test]
async fn balance_upper_cases_the_currency() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/balance/USD");
			then.status(200).body("{\"currency\":\"USD\",\"balance_currency\":12.5}");
		})
		.await;
	let outcome = client.balance(Some("usd")).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome.payload().and_then(|p| p.get("currency")), Some(&json!("USD")));
}

#[tokio::test]
async fn push_tasks_default_ttl_and_append_extra_params() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let expected = form(&[
		("title", "Sale"),
		("website_id", "5"),
		("body", "50% off"),
		("ttl", "0"),
		("link", "https://example.com/sale"),
	]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/push/tasks").body(expected);
			then.status(200).body("{\"result\":true,\"id\":1}");
		})
		.await;
	let task = PushTask { title: "Sale".into(), website_id: 5, body: "50% off".into(), ttl: 0 };
	let outcome = client
		.create_push_task(&task, Params::new().with("link", "https://example.com/sale"))
		.await
		.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert!(!outcome.is_error());
}

#[tokio::test]
async fn template_removal_sends_the_id_in_the_delete_body() {
	let server = MockServer::start_async().await;
	let client =
		connect(&server, seeded_store("T1").await).await.expect("Cached token should build a client.");
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/template").body("template_id=9");
			then.status(200).body("");
		})
		.await;
	let outcome = client.remove_template(9).await.expect("Call should complete.");

	mock.assert_calls_async(1).await;

	assert_eq!(outcome, ApiOutcome::Success(json!({})));
}
