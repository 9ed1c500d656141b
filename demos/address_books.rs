//! Authenticates against a mock of the API, creates and fills an address book, then shows a second
//! client reusing the cached token.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use sendpulse_api::{
	api::EmailEntry,
	auth::Credentials,
	client::ReqwestApiClient,
	config::ClientConfig,
	store::{MemoryBackend, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}");
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/addressbooks").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body("{\"id\":42}");
		})
		.await;
	let add_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/addressbooks/42/emails");
			then.status(200).header("content-type", "application/json").body("{\"result\":true}");
		})
		.await;
	let backend = MemoryBackend::default();
	let credentials = Credentials::new("demo-client", "demo-secret")?;
	let store: Arc<dyn TokenStore> = Arc::new(backend.scope(credentials.fingerprint()));
	let config = ClientConfig::builder().base_url(server.base_url()).build()?;
	let client = ReqwestApiClient::connect_with(config.clone(), credentials.clone(), store).await?;
	let created = client.create_address_book("Weekly digest").await?;

	println!("Created address book: {}.", created.clone().into_json());

	let entries = [
		EmailEntry::new("ann@example.com").variable("name", "Ann"),
		EmailEntry::from("bo@example.com"),
	];
	let added = client.add_emails(42, &entries).await?;

	println!("Added members: {}.", added.into_json());

	// A second client over the same backend reuses the cached token.
	let reused_store: Arc<dyn TokenStore> = Arc::new(backend.scope(credentials.fingerprint()));
	let reused = ReqwestApiClient::connect_with(config, credentials, reused_store).await?;

	println!("Second client state: {:?}.", reused.state());

	token_mock.assert_calls_async(1).await;
	create_mock.assert_calls_async(1).await;
	add_mock.assert_calls_async(1).await;

	Ok(())
}
