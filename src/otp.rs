// SPDX-License-Identifier: MIT OR Apache-2.0
use alloc::fmt::{self, Display, Formatter};
use constant_time_eq::constant_time_eq;
use core::{cmp::PartialEq, convert::AsRef, ops::Deref};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A one-time password.
///
/// Derefs to the numeric code. The [Display] implementation renders exactly
/// [digits](Otp::digits) decimal digits, padded with leading zeroes.
pub struct Otp {
	code: u32,
	digits: u32,
}

impl Otp {
	#[inline]
	pub(crate) fn new(code: u32, digits: u32) -> Self {
		Self { code, digits }
	}

	/// Number of decimal digits in the rendered code.
	#[inline]
	pub fn digits(&self) -> u32 {
		self.digits
	}
}

impl Deref for Otp {
	type Target = u32;

	#[inline]
	fn deref(&self) -> &Self::Target {
		&self.code
	}
}

impl AsRef<u32> for Otp {
	#[inline]
	fn as_ref(&self) -> &u32 {
		&self.code
	}
}

impl PartialEq<u32> for Otp {
	#[inline]
	fn eq(&self, other: &u32) -> bool {
		constant_time_eq(&self.code.to_ne_bytes(), &other.to_ne_bytes())
	}
}

impl PartialEq<&str> for Otp {
	/// Compares against the zero-padded rendering, so `"012345"` and
	/// `"12345"` are different codes.
	fn eq(&self, other: &&str) -> bool {
		let other = other.as_bytes();
		if other.len() != self.digits as usize || !other.iter().all(u8::is_ascii_digit) {
			return false;
		}
		let candidate = other
			.iter()
			.fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
		*self == candidate
	}
}

impl Display for Otp {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{:0width$}", self.code, width = self.digits as usize)
	}
}
