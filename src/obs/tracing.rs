// self
use crate::{_prelude::*, obs::CallKind};

/// Span wrapped around one client exchange; a no-op without the `tracing` feature.
#[derive(Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens a `sendpulse_api.call` span with `kind` and `path` fields.
	pub fn new(kind: CallKind, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("sendpulse_api.call", kind = kind.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> impl Future<Output = Fut::Output>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
