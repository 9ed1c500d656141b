//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::{Mock, prelude::*};
// self
use sendpulse_api::{
	auth::{AccessToken, Credentials},
	client::ReqwestApiClient,
	config::ClientConfig,
	error::Result,
	store::{MemoryStore, TokenStore},
};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const TOKEN_PATH: &str = "/oauth/access_token";
pub const TOKEN_FORM: &str =
	"grant_type=client_credentials&client_id=test-client&client_secret=test-secret";

pub fn credentials() -> Credentials {
	Credentials::new(CLIENT_ID, CLIENT_SECRET).expect("Credential fixture should be valid.")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
	ClientConfig::builder()
		.base_url(server.base_url())
		.timeout(Duration::from_secs(5))
		.connect_timeout(Duration::from_secs(2))
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Mock server config should be valid.")
}

pub fn empty_store() -> Arc<MemoryStore> {
	Arc::new(MemoryStore::new(credentials().fingerprint()))
}

pub async fn seeded_store(token: &str) -> Arc<MemoryStore> {
	let store = empty_store();

	store.set(AccessToken::new(token)).await.expect("Seeding the memory store should succeed.");

	store
}

/// Token endpoint answering the fixture credentials with `token`.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
	let body = format!("{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":3600}}");

	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).body(TOKEN_FORM);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

pub async fn connect(server: &MockServer, store: Arc<dyn TokenStore>) -> Result<ReqwestApiClient> {
	ReqwestApiClient::connect_with(config_for(server), credentials(), store).await
}
