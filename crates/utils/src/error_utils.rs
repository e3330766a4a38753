// Copyright 2024-2025 Irreducible Inc.

/// Returns early with the given error converted into the function's error type.
///
/// With the `bail_panic` feature enabled the macro panics instead, which gives a backtrace at the
/// exact point a proof is rejected.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Bails with `$err` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
