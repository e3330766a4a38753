// Copyright 2024-2025 Irreducible Inc.

/// Installs a global subscriber printing spans and events to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Repeated calls are no-ops, so tests
/// and benchmarks can call this unconditionally.
pub fn init_tracing() {
	use tracing_subscriber::{
		fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_span_events(FmtSpan::CLOSE),
		)
		.try_init();
}
