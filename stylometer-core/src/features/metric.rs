use std::fmt;

use serde::{Serialize, Serializer};

/// Rendering of [`Metric::Undefined`].
pub const UNDEFINED: &str = "N/A";

/// A single report value.
///
/// Metrics are emitted as fixed-precision decimal strings so that two runs
/// over the same corpus serialize byte-identically. A metric whose
/// denominator is zero, or whose formula is otherwise undefined, becomes
/// `Undefined` instead of carrying a NaN or an infinity.
///
/// # Invariants
/// - `Fixed::value` is finite and already rounded to `decimals`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
	Fixed { value: f64, decimals: usize },
	Undefined,
}

impl Metric {
	/// Rounds the exact binary `value` to `decimals` places.
	///
	/// Values that are exactly halfway between two results round away from
	/// zero (`0.125` → `0.13`); anything else rounds to nearest, so `1.115`,
	/// stored as `1.11499…`, gives `1.11`. Non-finite input yields `Undefined`.
	pub fn fixed(value: f64, decimals: usize) -> Self {
		if !value.is_finite() {
			return Metric::Undefined;
		}
		let nudged = if is_exact_tie(value, decimals) {
			// next representable value away from zero
			f64::from_bits(value.to_bits() + 1)
		} else {
			value
		};
		let mut rounded = match format!("{:.*}", decimals, nudged).parse::<f64>() {
			Ok(rounded) => rounded,
			Err(_) => return Metric::Undefined,
		};
		// -0.0 would render as "-0.00"
		if rounded == 0.0 {
			rounded = 0.0;
		}
		Metric::Fixed { value: rounded, decimals }
	}

	/// `numerator / denominator`, or `Undefined` when the denominator is zero.
	pub fn ratio(numerator: f64, denominator: f64, decimals: usize) -> Self {
		if denominator == 0.0 {
			Metric::Undefined
		} else {
			Metric::fixed(numerator / denominator, decimals)
		}
	}

	/// Rounded value, if defined.
	pub fn value(&self) -> Option<f64> {
		match self {
			Metric::Fixed { value, .. } => Some(*value),
			Metric::Undefined => None,
		}
	}

	pub fn is_defined(&self) -> bool {
		matches!(self, Metric::Fixed { .. })
	}
}

/// Whether `value` lies exactly halfway between two multiples of
/// `10^-decimals`.
///
/// That holds iff `value * 2^(decimals + 1)` is an odd integer; the product
/// is exact since it only shifts the exponent.
fn is_exact_tie(value: f64, decimals: usize) -> bool {
	let scaled = value * 2f64.powi(decimals as i32 + 1);
	scaled.is_finite() && scaled.fract() == 0.0 && (scaled % 2.0).abs() == 1.0
}

impl fmt::Display for Metric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Metric::Fixed { value, decimals } => write!(f, "{:.*}", *decimals, value),
			Metric::Undefined => f.write_str(UNDEFINED),
		}
	}
}

impl Serialize for Metric {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
