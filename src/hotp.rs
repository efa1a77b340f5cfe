// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::{algorithm::HashFunction, counter, error::OtpError, otp::Otp};
use alloc::format;
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset, KeyInit};
use hmac::{Mac, SimpleHmac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Code length used when none is given.
pub const DEFAULT_DIGITS: u32 = 6;

/// Longest code whose modulus still fits the 31-bit truncated value.
pub const MAX_DIGITS: u32 = 9;

/// A hash-based One-Time Password (HOTP) generator.
///
/// Keyed once, it turns 8-byte challenges into codes using the dynamic
/// truncation of RFC 4226. It keeps no counter of its own; the caller
/// decides which challenge to sign.
///
/// ```rust
/// use totpee::Hotp;
/// use sha1::Sha1;
///
/// let mut hotp = Hotp::<Sha1>::new(b"12345678901234567890", 6).unwrap();
/// let otp = hotp.code_at_counter(1).unwrap();
/// assert_eq!(otp, 287082);
/// assert_eq!(otp.to_string(), "287082");
/// ```
#[derive(Debug, Clone)]
pub struct Hotp<D: Digest + BlockSizeUser + FixedOutputReset> {
	hasher: SimpleHmac<D>,
	digits: u32,
}

impl<D: Digest + BlockSizeUser + FixedOutputReset> Hotp<D> {
	/// Creates a new HOTP instance, using the given bytes as the secret.
	///
	/// `digits` defaults to 6 and must be within `1..=9`. An empty key is
	/// rejected with [OtpError::InvalidKey].
	pub fn new<A: AsRef<[u8]>, L: Into<Option<u32>>>(
		key: A,
		digits: L,
	) -> Result<Self, OtpError> {
		let digits = check_digits(digits.into().unwrap_or(DEFAULT_DIGITS))?;
		let key = key.as_ref();
		if key.is_empty() {
			return Err(OtpError::InvalidKey);
		}
		<SimpleHmac<D> as KeyInit>::new_from_slice(key)
			.map(|hasher| Hotp { hasher, digits })
			.map_err(|_| OtpError::InvalidKey)
	}

	/// Creates a new HOTP instance, using a hasher given by the caller.
	pub fn with_hasher<L: Into<Option<u32>>>(
		hasher: SimpleHmac<D>,
		digits: L,
	) -> Result<Self, OtpError> {
		let digits = check_digits(digits.into().unwrap_or(DEFAULT_DIGITS))?;
		Ok(Hotp { hasher, digits })
	}

	#[inline]
	pub fn digits(&self) -> u32 {
		self.digits
	}

	/// Calculate the OTP value for a raw 8-byte challenge.
	pub fn code(&mut self, challenge: &[u8; 8]) -> Result<Otp, OtpError> {
		self.hasher.update(challenge);
		let digest = self.hasher.finalize_fixed_reset();
		// The low nibble of the last byte picks a 4-byte window.
		let too_short = || OtpError::UnsupportedAlgorithm(format!("{}-byte digest", digest.len()));
		let offset = (*digest.last().ok_or_else(too_short)? & 0xF) as usize;
		let window = digest.get(offset..offset + 4).ok_or_else(too_short)?;
		let mut code = [0u8; 4];
		code.copy_from_slice(window);
		let binary = u32::from_be_bytes(code) & 0x7fff_ffff;
		let code = binary % 10_u32.pow(self.digits);
		Ok(Otp::new(code, self.digits))
	}

	/// Calculate the OTP value for a counter, encoded big-endian.
	#[inline]
	pub fn code_at_counter(&mut self, counter: i64) -> Result<Otp, OtpError> {
		self.code(&counter::challenge(counter))
	}
}

fn check_digits(digits: u32) -> Result<u32, OtpError> {
	if (1..=MAX_DIGITS).contains(&digits) {
		Ok(digits)
	} else {
		Err(OtpError::InvalidArgument(digits))
	}
}

/// Computes a HOTP code for an already-decoded secret, choosing the MAC
/// from `hash_function`.
///
/// ```rust
/// use totpee::{calculate_hotp, HashFunction};
///
/// let challenge = 1i64.to_be_bytes();
/// let otp = calculate_hotp(b"12345678901234567890", &challenge, 6, HashFunction::Sha1).unwrap();
/// assert_eq!(otp.to_string(), "287082");
/// ```
pub fn calculate_hotp(
	secret: &[u8],
	challenge: &[u8; 8],
	digits: u32,
	hash_function: HashFunction,
) -> Result<Otp, OtpError> {
	match hash_function {
		HashFunction::Sha1 => Hotp::<Sha1>::new(secret, digits)?.code(challenge),
		HashFunction::Sha256 => Hotp::<Sha256>::new(secret, digits)?.code(challenge),
		HashFunction::Sha512 => Hotp::<Sha512>::new(secret, digits)?.code(challenge),
	}
}
