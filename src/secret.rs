// SPDX-License-Identifier: MIT OR Apache-2.0
//! Decoding of Base32 (RFC 4648) secrets.
use crate::error::OtpError;
use alloc::vec::Vec;
use data_encoding::{Encoding, BASE32, BASE32_NOPAD};

/// Decodes a Base32 secret into raw key bytes.
///
/// Lowercase letters are accepted, and leftover bits in the last symbol
/// are ignored. Padding is optional, but if it is present it has to be
/// complete.
///
/// ```rust
/// use totpee::secret::decode;
///
/// assert_eq!(decode("GEZDGNBVGY3TQOJQ").unwrap(), b"1234567890");
/// assert_eq!(decode("mfrgg===").unwrap(), b"abc");
/// assert_eq!(decode("MFRGH").unwrap(), b"abc");
/// assert!(decode("GEZDGNBV1").is_err());
/// ```
pub fn decode(secret: &str) -> Result<Vec<u8>, OtpError> {
	let encoding = if secret.ends_with('=') {
		lenient(&BASE32)
	} else {
		lenient(&BASE32_NOPAD)
	};
	Ok(encoding.decode(secret.as_bytes())?)
}

/// `base` with lowercase input and non-zero trailing bits allowed.
fn lenient(base: &Encoding) -> Encoding {
	let mut spec = base.specification();
	spec.check_trailing_bits = false;
	spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
	spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
	spec.encoding().unwrap_or_else(|_| base.clone())
}
