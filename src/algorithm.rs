// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::OtpError;
use alloc::{
	fmt::{self, Display, Formatter},
	string::String,
};
use core::str::FromStr;

/// The hash function underneath the HMAC used to derive codes.
///
/// ```rust
/// use totpee::HashFunction;
///
/// let hash: HashFunction = "HmacSHA256".parse().unwrap();
/// assert_eq!(hash, HashFunction::Sha256);
/// assert_eq!(hash.algorithm().name, "HmacSHA256");
/// assert_eq!(hash.algorithm().output_size, 32);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum HashFunction {
	#[default]
	Sha1,
	Sha256,
	Sha512,
}

/// Everything a MAC provider needs to know about a [HashFunction].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Algorithm {
	/// Provider identifier, e.g. `HmacSHA1`.
	pub name: &'static str,
	/// Block size of the underlying hash, in bytes.
	pub block_size: usize,
	/// Length of the MAC tag, in bytes.
	pub output_size: usize,
}

const HMAC_SHA1: Algorithm = Algorithm {
	name: "HmacSHA1",
	block_size: 64,
	output_size: 20,
};

const HMAC_SHA256: Algorithm = Algorithm {
	name: "HmacSHA256",
	block_size: 64,
	output_size: 32,
};

const HMAC_SHA512: Algorithm = Algorithm {
	name: "HmacSHA512",
	block_size: 128,
	output_size: 64,
};

impl HashFunction {
	/// Every supported hash function, weakest first.
	pub const ALL: [HashFunction; 3] = [
		HashFunction::Sha1,
		HashFunction::Sha256,
		HashFunction::Sha512,
	];

	/// Returns the algorithm record for this hash function.
	#[inline]
	pub const fn algorithm(self) -> Algorithm {
		match self {
			HashFunction::Sha1 => HMAC_SHA1,
			HashFunction::Sha256 => HMAC_SHA256,
			HashFunction::Sha512 => HMAC_SHA512,
		}
	}
}

impl Display for HashFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.algorithm().name)
	}
}

impl FromStr for HashFunction {
	type Err = OtpError;

	/// Accepts `SHA1`, `SHA-256`, `HmacSHA512`, `HMACSHA1` and so on,
	/// ignoring case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s
			.chars()
			.filter(|c| *c != '-' && *c != '_')
			.map(|c| c.to_ascii_uppercase())
			.collect::<String>();
		let bare = normalized.strip_prefix("HMAC").unwrap_or(normalized.as_str());
		match bare {
			"SHA1" => Ok(HashFunction::Sha1),
			"SHA256" => Ok(HashFunction::Sha256),
			"SHA512" => Ok(HashFunction::Sha512),
			_ => Err(OtpError::UnsupportedAlgorithm(String::from(s))),
		}
	}
}
