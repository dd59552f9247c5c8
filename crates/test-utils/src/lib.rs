//! Shared test utilities for the sea-ice dashboard workspace.
//!
//! This crate provides common testing infrastructure including:
//! - GeoJSON and CSV fixtures shaped like the real inputs
//! - Synthetic temperature table generators
//! - Approximate-equality macros for coordinates and statistics
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.6000001_f64, 0.6_f64, 1e-6); // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of (lon, lat) pairs.
///
/// ```ignore
/// use test_utils::assert_lonlat_approx_eq;
///
/// assert_lonlat_approx_eq!((-210.0, 60.0), (-210.0, 60.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_lonlat_approx_eq {
    (($lon1:expr, $lat1:expr), ($lon2:expr, $lat2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($lon1, $lon2, $epsilon);
        $crate::assert_approx_eq!($lat1, $lat2, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(0.6000001, 0.6, 1e-6);
        assert_approx_eq!(-210.0, -210.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(0.61, 0.6, 0.001);
    }

    #[test]
    fn test_assert_lonlat_approx_eq_passes() {
        assert_lonlat_approx_eq!((-209.99999, 60.0), (-210.0, 60.0), 1e-4);
    }
}
