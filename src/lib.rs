//! Authenticated client core for the SendPulse REST API: client-credentials tokens, pluggable
//! token stores, and a bounded refresh-and-retry when the service answers `401`.
//!
//! Every endpoint helper in [`api`] is a thin layer over three primitives exposed by
//! [`client::ApiClient`]: [`call`](client::ApiClient::call),
//! [`handle_result`](client::handle_result), and [`handle_error`](client::handle_error).

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod outcome;
pub mod request;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, rand as _};
