// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::{algorithm::HashFunction, counter, error::OtpError, hotp, secret};
use alloc::{
	boxed::Box,
	fmt::{self, Debug, Formatter},
	string::{String, ToString},
};
#[cfg(feature = "std")]
use std::time::{SystemTime, UNIX_EPOCH};

pub use crate::hotp::DEFAULT_DIGITS;

/// Unix time the intervals are counted from when none is given.
pub const DEFAULT_EPOCH: i64 = 0;

/// Seconds each code stays valid when no time step is given.
pub const DEFAULT_TIME_STEP: i32 = 30;

/// Computes the TOTP code for a Base32 `secret` with every parameter spelled out.
///
/// `time_step` must not be zero. The secret is decoded before `digits` is
/// checked, so a secret that isn't Base32 is reported first.
///
/// ```rust
/// use totpee::{generate, HashFunction};
///
/// let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
/// assert_eq!(
/// 	generate(secret, 0, 30, 1111111109, 8, HashFunction::Sha1).unwrap(),
/// 	"07081804"
/// );
/// ```
pub fn generate(
	secret: &str,
	epoch: i64,
	time_step: i32,
	timestamp: i64,
	digits: u32,
	hash_function: HashFunction,
) -> Result<String, OtpError> {
	let challenge = counter::challenge(counter::interval(epoch, time_step, timestamp));
	let key = secret::decode(secret)?;
	hotp::calculate_hotp(&key, &challenge, digits, hash_function).map(|otp| otp.to_string())
}

/// The default 6-digit SHA-1 code for `timestamp`, counted in 30 second steps from the Unix epoch.
pub fn code_at(secret: &str, timestamp: i64) -> Result<String, OtpError> {
	generate(
		secret,
		DEFAULT_EPOCH,
		DEFAULT_TIME_STEP,
		timestamp,
		DEFAULT_DIGITS,
		HashFunction::Sha1,
	)
}

/// The default 6-digit SHA-1 code for the current time.
#[cfg(feature = "std")]
pub fn code(secret: &str) -> Result<String, OtpError> {
	code_at(secret, system_time())
}

/// A 6-digit code for the current time, using the given hash function.
#[cfg(feature = "std")]
pub fn code_with_hash(secret: &str, hash_function: HashFunction) -> Result<String, OtpError> {
	code_with(secret, DEFAULT_DIGITS, hash_function)
}

/// A code of `digits` digits for the current time, using the given hash function.
#[cfg(feature = "std")]
pub fn code_with(
	secret: &str,
	digits: u32,
	hash_function: HashFunction,
) -> Result<String, OtpError> {
	generate(
		secret,
		DEFAULT_EPOCH,
		DEFAULT_TIME_STEP,
		system_time(),
		digits,
		hash_function,
	)
}

/// `(timestamp - epoch) % time_step`, see [counter::remaining_validity].
#[inline]
pub fn remaining_validity_at(epoch: i64, time_step: i32, timestamp: i64) -> i64 {
	counter::remaining_validity(epoch, time_step, timestamp)
}

/// [remaining_validity_at] for the current time with the default epoch and time step.
#[cfg(feature = "std")]
pub fn remaining_validity() -> i64 {
	remaining_validity_at(DEFAULT_EPOCH, DEFAULT_TIME_STEP, system_time())
}

/// A Time-based One-Time Password (TOTP) generator.
///
/// Holds the code parameters together with a callback that's asked for the
/// current Unix time (in seconds), so that time can come from anywhere:
/// the system clock, an embedded RTC, or a fixed value in tests.
///
/// ```rust
/// use totpee::{HashFunction, Totp};
///
/// let totp = Totp::new(|| 59)
/// 	.with_digits(8)
/// 	.with_hash_function(HashFunction::Sha256);
/// let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZA";
/// assert_eq!(totp.code(secret).unwrap(), "46119246");
/// assert_eq!(totp.remaining_validity(), 29);
/// ```
pub struct Totp {
	epoch: i64,
	time_step: i32,
	digits: u32,
	hash_function: HashFunction,
	time_callback: Box<dyn Fn() -> i64 + Send + Sync>,
}

impl Totp {
	/// Creates a TOTP generator with the default parameters (epoch 0,
	/// 30 second steps, 6 digits, SHA-1), using the given time callback.
	pub fn new<C: Fn() -> i64 + Send + Sync + 'static>(time_callback: C) -> Self {
		Totp {
			epoch: DEFAULT_EPOCH,
			time_step: DEFAULT_TIME_STEP,
			digits: DEFAULT_DIGITS,
			hash_function: HashFunction::default(),
			time_callback: Box::new(time_callback),
		}
	}

	#[cfg(feature = "std")]
	/// Creates a TOTP generator with the default parameters, using the
	/// [SystemTime](std::time::SystemTime) to determine the current time.
	pub fn new_from_system_time() -> Self {
		Self::new(system_time)
	}

	/// Sets the Unix time, in seconds, that intervals are counted from.
	pub fn with_epoch(mut self, epoch: i64) -> Self {
		self.epoch = epoch;
		self
	}

	/// Sets the time step, in seconds. It must not be zero.
	pub fn with_time_step(mut self, time_step: i32) -> Self {
		self.time_step = time_step;
		self
	}

	/// Sets the code length. Lengths outside `1..=9` are only reported once
	/// a code is requested.
	pub fn with_digits(mut self, digits: u32) -> Self {
		self.digits = digits;
		self
	}

	/// Sets the hash function underneath the HMAC.
	pub fn with_hash_function(mut self, hash_function: HashFunction) -> Self {
		self.hash_function = hash_function;
		self
	}

	#[inline]
	pub fn epoch(&self) -> i64 {
		self.epoch
	}

	#[inline]
	pub fn time_step(&self) -> i32 {
		self.time_step
	}

	#[inline]
	pub fn digits(&self) -> u32 {
		self.digits
	}

	#[inline]
	pub fn hash_function(&self) -> HashFunction {
		self.hash_function
	}

	/// Asks the time callback for the current Unix time.
	#[inline]
	pub fn now(&self) -> i64 {
		(*self.time_callback)()
	}

	/// The interval counter for the current time.
	pub fn counter(&self) -> i64 {
		counter::interval(self.epoch, self.time_step, self.now())
	}

	/// Calculate the code for the given time, represented as seconds from the Unix epoch.
	pub fn code_at(&self, secret: &str, timestamp: i64) -> Result<String, OtpError> {
		generate(
			secret,
			self.epoch,
			self.time_step,
			timestamp,
			self.digits,
			self.hash_function,
		)
	}

	#[cfg(feature = "std")]
	/// Calculate the code for the given [SystemTime](std::time::SystemTime).
	pub fn code_at_system_time(&self, secret: &str, time: SystemTime) -> Result<String, OtpError> {
		self.code_at(secret, unix_seconds(time))
	}

	/// Calculate the code for the current time.
	pub fn code(&self, secret: &str) -> Result<String, OtpError> {
		self.code_at(secret, self.now())
	}

	/// See [remaining_validity_at].
	pub fn remaining_validity(&self) -> i64 {
		remaining_validity_at(self.epoch, self.time_step, self.now())
	}
}

#[cfg(feature = "std")]
impl Default for Totp {
	fn default() -> Self {
		Self::new_from_system_time()
	}
}

impl Debug for Totp {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Totp")
			.field("epoch", &self.epoch)
			.field("time_step", &self.time_step)
			.field("digits", &self.digits)
			.field("hash_function", &self.hash_function)
			.finish_non_exhaustive()
	}
}

#[cfg(feature = "std")]
fn system_time() -> i64 {
	unix_seconds(SystemTime::now())
}

/// Whole seconds since the Unix epoch; negative before it.
#[cfg(feature = "std")]
fn unix_seconds(time: SystemTime) -> i64 {
	match time.duration_since(UNIX_EPOCH) {
		Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
		Err(err) => i64::try_from(err.duration().as_secs()).map_or(i64::MIN, |secs| -secs),
	}
}

#[cfg(test)]
mod tests {
	use super::{code_at, generate, remaining_validity_at, Totp};
	use crate::{algorithm::HashFunction, error::OtpError};
	use data_encoding::BASE32;

	const SEED_SHA1: &[u8] = b"12345678901234567890";
	const SEED_SHA256: &[u8] = b"12345678901234567890123456789012";
	const SEED_SHA512: &[u8] =
		b"1234567890123456789012345678901234567890123456789012345678901234";

	// (time, SHA-1, SHA-256, SHA-512)
	const RFC6238: [(i64, &str, &str, &str); 6] = [
		(59, "94287082", "46119246", "90693936"),
		(1111111109, "07081804", "68084774", "25091201"),
		(1111111111, "14050471", "67062674", "99943326"),
		(1234567890, "89005924", "91819424", "93441116"),
		(2000000000, "69279037", "90698825", "38618901"),
		(20000000000, "65353130", "77737706", "47863826"),
	];

	#[test]
	fn rfc6238_sha1() {
		let secret = BASE32.encode(SEED_SHA1);
		for (time, expected, _, _) in RFC6238 {
			assert_eq!(generate(&secret, 0, 30, time, 8, HashFunction::Sha1).unwrap(), expected);
		}
	}

	#[test]
	fn rfc6238_sha256() {
		let secret = BASE32.encode(SEED_SHA256);
		for (time, _, expected, _) in RFC6238 {
			assert_eq!(generate(&secret, 0, 30, time, 8, HashFunction::Sha256).unwrap(), expected);
		}
	}

	#[test]
	fn rfc6238_sha512() {
		let secret = BASE32.encode(SEED_SHA512);
		for (time, _, _, expected) in RFC6238 {
			assert_eq!(generate(&secret, 0, 30, time, 8, HashFunction::Sha512).unwrap(), expected);
		}
	}

	#[test]
	fn defaults_truncate_the_sha1_vector() {
		let secret = BASE32.encode(SEED_SHA1);
		// Last six digits of the 8-digit RFC code, since 10^6 divides 10^8.
		assert_eq!(code_at(&secret, 59).unwrap(), "287082");
		assert_eq!(code_at(&secret, 1111111109).unwrap(), "081804");
	}

	#[test]
	fn same_inputs_same_code() {
		let secret = BASE32.encode(SEED_SHA256);
		let first = generate(&secret, 17, 45, 1_700_000_000, 7, HashFunction::Sha256).unwrap();
		let second = generate(&secret, 17, 45, 1_700_000_000, 7, HashFunction::Sha256).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.len(), 7);
		assert!(first.bytes().all(|b| b.is_ascii_digit()));
	}

	#[test]
	fn code_is_stable_within_a_step() {
		let secret = BASE32.encode(SEED_SHA1);
		let start = generate(&secret, 0, 30, 60, 6, HashFunction::Sha1).unwrap();
		let end = generate(&secret, 0, 30, 89, 6, HashFunction::Sha1).unwrap();
		assert_eq!(start, end);
	}

	#[test]
	fn epoch_shifts_the_counter() {
		let secret = BASE32.encode(SEED_SHA1);
		assert_eq!(
			generate(&secret, 1_000, 30, 1_059, 8, HashFunction::Sha1).unwrap(),
			generate(&secret, 0, 30, 59, 8, HashFunction::Sha1).unwrap()
		);
	}

	#[test]
	fn before_epoch_uses_counter_minus_one() {
		let secret = BASE32.encode(SEED_SHA1);
		let challenge = (-1i64).to_be_bytes();
		let expected = crate::hotp::calculate_hotp(SEED_SHA1, &challenge, 6, HashFunction::Sha1)
			.unwrap()
			.to_string();
		assert_eq!(generate(&secret, 0, 30, -1, 6, HashFunction::Sha1).unwrap(), expected);
	}

	#[test]
	fn reports_bad_input() {
		let secret = BASE32.encode(SEED_SHA1);
		assert_eq!(
			generate(&secret, 0, 30, 59, 10, HashFunction::Sha1),
			Err(OtpError::InvalidArgument(10))
		);
		assert_eq!(
			generate(&secret, 0, 30, 59, 0, HashFunction::Sha1),
			Err(OtpError::InvalidArgument(0))
		);
		assert!(matches!(
			generate("not base32!", 0, 30, 59, 10, HashFunction::Sha1),
			Err(OtpError::InvalidEncoding(_))
		));
		assert_eq!(
			generate("", 0, 30, 59, 6, HashFunction::Sha1),
			Err(OtpError::InvalidKey)
		);
	}

	#[test]
	fn lowercase_secret_is_accepted() {
		let secret = BASE32.encode(SEED_SHA1).to_lowercase();
		assert_eq!(code_at(&secret, 59).unwrap(), "287082");
	}

	#[test]
	fn single_digit_code() {
		let secret = BASE32.encode(SEED_SHA1);
		let code = generate(&secret, 0, 30, 59, 1, HashFunction::Sha1).unwrap();
		assert_eq!(code, "2");
	}

	#[test]
	fn remaining_validity() {
		assert_eq!(remaining_validity_at(0, 30, 45), 15);
		assert_eq!(remaining_validity_at(0, 30, 30), 0);
		assert_eq!(remaining_validity_at(0, 30, -10), -10);
	}

	#[test]
	fn totp_uses_its_clock() {
		let secret = BASE32.encode(SEED_SHA512);
		let totp = Totp::new(|| 1234567890)
			.with_digits(8)
			.with_hash_function(HashFunction::Sha512);
		assert_eq!(totp.now(), 1234567890);
		assert_eq!(totp.counter(), 0x273EF07);
		assert_eq!(totp.code(&secret).unwrap(), "93441116");
		assert_eq!(totp.remaining_validity(), 0);
	}

	#[test]
	fn totp_defaults() {
		let totp = Totp::new(|| 0);
		assert_eq!(totp.epoch(), 0);
		assert_eq!(totp.time_step(), 30);
		assert_eq!(totp.digits(), 6);
		assert_eq!(totp.hash_function(), HashFunction::Sha1);
	}

	#[test]
	fn totp_matches_generate() {
		let secret = BASE32.encode(SEED_SHA1);
		let totp = Totp::new(|| 0).with_epoch(100).with_time_step(60);
		assert_eq!(
			totp.code_at(&secret, 1_000).unwrap(),
			generate(&secret, 100, 60, 1_000, 6, HashFunction::Sha1).unwrap()
		);
	}

	#[test]
	fn totp_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Totp>();
	}

	#[cfg(feature = "std")]
	#[test]
	fn system_time_conversion() {
		use std::time::{Duration, UNIX_EPOCH};

		assert_eq!(super::unix_seconds(UNIX_EPOCH + Duration::from_secs(59)), 59);
		assert_eq!(super::unix_seconds(UNIX_EPOCH - Duration::from_secs(31)), -31);

		let secret = BASE32.encode(SEED_SHA1);
		let totp = Totp::new_from_system_time();
		assert_eq!(
			totp.code_at_system_time(&secret, UNIX_EPOCH + Duration::from_secs(59)).unwrap(),
			"287082"
		);
	}

	#[cfg(feature = "std")]
	#[test]
	fn current_time_entry_points() {
		let secret = BASE32.encode(SEED_SHA1);
		assert_eq!(super::code(&secret).unwrap().len(), 6);
		assert_eq!(super::code_with(&secret, 8, HashFunction::Sha256).unwrap().len(), 8);
		assert_eq!(super::code_with_hash(&secret, HashFunction::Sha512).unwrap().len(), 6);
		assert!((0..30).contains(&super::remaining_validity()));
	}
}
