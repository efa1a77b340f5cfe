// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mapping timestamps onto HOTP counters.

/// Number of whole time steps between `epoch` and `timestamp`.
///
/// Rounds toward negative infinity, so a timestamp one second before the
/// epoch lands in interval `-1`, not `0`.
///
/// # Panics
///
/// Panics if `time_step` is zero.
///
/// ```rust
/// use totpee::counter::interval;
///
/// assert_eq!(interval(0, 30, 59), 1);
/// assert_eq!(interval(0, 30, -1), -1);
/// ```
#[inline]
pub fn interval(epoch: i64, time_step: i32, timestamp: i64) -> i64 {
	floor_div(timestamp.wrapping_sub(epoch), i64::from(time_step))
}

/// The 8-byte big-endian (two's complement) HOTP challenge for a counter.
#[inline]
pub fn challenge(interval: i64) -> [u8; 8] {
	interval.to_be_bytes()
}

/// `(timestamp - epoch) % time_step`.
///
/// This is a truncating remainder, so it goes negative for timestamps
/// before the epoch even though [interval] floors.
///
/// # Panics
///
/// Panics if `time_step` is zero.
#[inline]
pub fn remaining_validity(epoch: i64, time_step: i32, timestamp: i64) -> i64 {
	timestamp
		.wrapping_sub(epoch)
		.wrapping_rem(i64::from(time_step))
}

fn floor_div(x: i64, y: i64) -> i64 {
	let q = x.wrapping_div(y);
	if (x.wrapping_rem(y) != 0) && ((x < 0) != (y < 0)) {
		q - 1
	} else {
		q
	}
}
