// Copyright 2024-2025 Irreducible Inc.

use std::{env, sync::OnceLock};

/// Below this many elements the pointwise oracle loops and FFT recursions stay sequential.
pub const PARALLEL_THRESHOLD: usize = 1 << 10;

/// In case when number of threads is set to 1, use rayon thread pool with
/// `use_current_thread` set to true, so that single-threaded proving runs on the caller's
/// thread and profiles stay readable.
///
/// NOTE: rayon doesn't allow initializing the global thread pool several times, so if it was
/// initialized before, the function returns an error. The result is returned by reference because
/// `ThreadPoolBuildError` doesn't implement `Clone`.
pub fn adjust_thread_pool() -> &'static Result<(), rayon::ThreadPoolBuildError> {
	static ONCE_GUARD: OnceLock<Result<(), rayon::ThreadPoolBuildError>> = OnceLock::new();

	ONCE_GUARD.get_or_init(|| match env::var("RAYON_NUM_THREADS") {
		Ok(v) if v == "1" => rayon::ThreadPoolBuilder::new()
			.num_threads(1)
			.use_current_thread()
			.build_global(),
		_ => Ok(()),
	})
}

/// Whether a loop over `len` items is worth splitting across the thread pool.
pub fn should_parallelize(len: usize) -> bool {
	len >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1
}
