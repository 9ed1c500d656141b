//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sendpulse_api.call` with the `kind` and
//!   `path` fields.
//! - Enable `metrics` to increment the `sendpulse_api_call_total` counter for every
//!   attempt/success/failure/refresh, labeled by `kind` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

/// Kinds of HTTP exchange performed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
	/// Client-credentials token acquisition.
	Token,
	/// First attempt of an endpoint call.
	Call,
	/// Replay of an endpoint call after a token refresh.
	Retry,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::Call => "call",
			CallKind::Retry => "retry",
		}
	}
}

/// Outcome labels recorded for each exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOutcome {
	/// Request about to be sent.
	Attempt,
	/// `200 OK` received.
	Success,
	/// Non-200 status or transport failure.
	Failure,
	/// `401` received and a token refresh was started.
	Refresh,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
			CallOutcome::Refresh => "refresh",
		}
	}
}
