// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time-based one-time passwords (RFC 6238) on top of the HOTP
//! dynamic truncation of RFC 4226.
//!
//! ```rust
//! use totpee::{generate, HashFunction};
//!
//! // "12345678901234567890", Base32-encoded
//! let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
//! let code = generate(secret, 0, 30, 59, 8, HashFunction::Sha1).unwrap();
//! assert_eq!(code, "94287082");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod algorithm;
pub mod counter;
pub mod error;
pub mod hotp;
pub mod otp;
pub mod secret;
pub mod totp;

pub use algorithm::{Algorithm, HashFunction};
pub use error::OtpError;
pub use hotp::{calculate_hotp, Hotp};
pub use otp::Otp;
pub use totp::{code_at, generate, remaining_validity_at, Totp};
#[cfg(feature = "std")]
pub use totp::{code, code_with, code_with_hash, remaining_validity};
