// SPDX-License-Identifier: MIT OR Apache-2.0
use alloc::{
	fmt::{self, Display, Formatter},
	string::String,
};
use data_encoding::DecodeError;
#[cfg(feature = "std")]
use std::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
	/// The requested code length is outside of `1..=9`.
	InvalidArgument(u32),
	/// The secret is not valid Base32.
	InvalidEncoding(DecodeError),
	/// The hash function identifier isn't one we have a MAC for.
	UnsupportedAlgorithm(String),
	/// The decoded secret can't be used as a MAC key.
	InvalidKey,
}

impl Display for OtpError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			OtpError::InvalidArgument(digits) => {
				write!(f, "wrong number of digits: {} (expected 1 to 9)", digits)
			}
			OtpError::InvalidEncoding(err) => write!(f, "the secret is not valid base32: {}", err),
			OtpError::UnsupportedAlgorithm(name) => {
				write!(f, "unsupported hash algorithm \"{}\"", name)
			}
			OtpError::InvalidKey => f.write_str("the decoded secret is not a usable HMAC key"),
		}
	}
}

impl From<DecodeError> for OtpError {
	#[inline]
	fn from(err: DecodeError) -> Self {
		OtpError::InvalidEncoding(err)
	}
}

#[cfg(feature = "std")]
impl Error for OtpError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			OtpError::InvalidEncoding(err) => Some(err),
			_ => None,
		}
	}
}
