//! Return-value mapping for the C platform hooks
//!
//! The firmware's `extern "C"` functions are thin wrappers around these. A
//! hook called before the platform is installed gets `None`: time reads as
//! zero, block fills fail with [`RNG_FAILURE_E`] and a single random word
//! request panics, since there is no status it could report.
//!
//! Block fills run in chunks that end on [`FILL_CHUNK`]-aligned addresses so
//! the caller can release its lock between chunks. Word writes never cross
//! such a boundary, so chunking does not change which bytes are filled a word
//! at a time.

use core::ffi::{c_int, c_uint};
use core::slice;

use super::{Platform, WallClock, WordSource};

/// wolfSSL `BAD_FUNC_ARG`
pub const BAD_FUNC_ARG: c_int = -173;
/// wolfSSL `RNG_FAILURE_E`
pub const RNG_FAILURE_E: c_int = -199;

/// Largest span filled per lock acquisition
pub const FILL_CHUNK: usize = 64;

/// Approximate seconds since the epoch, 0.0 without a platform
pub fn current_time<C: WallClock, S: WordSource>(platform: Option<&Platform<C, S>>, reset: c_int) -> f64 {
    platform.map_or(0.0, |p| p.current_time(reset != 0))
}

/// Whole seconds since the epoch, 0 without a platform
pub fn custom_time<C: WallClock, S: WordSource>(platform: Option<&Platform<C, S>>) -> u64 {
    platform.map_or(0, |p| p.custom_time())
}

/// One word from the entropy source.
///
/// # Panics
/// Without a platform, or if the source fails: the C signature has no way to
/// report either.
pub fn random_word<C, S>(platform: Option<&mut Platform<C, S>>) -> c_uint
where
    C: WallClock,
    S: WordSource<Word = u32>,
{
    let Some(platform) = platform else {
        panic!("random word requested before the platform was installed");
    };
    match platform.random_word() {
        Ok(word) => word,
        Err(_) => panic!("entropy source failed"),
    }
}

/// Fills `len` bytes at `output`, one [`FILL_CHUNK`]-bounded span per call
/// to `fill`, and maps the outcome to a wolfSSL status.
///
/// `fill` returns `None` when no platform is installed. A zero length returns
/// 0 without touching `output`, even if it is null.
///
/// # Safety
/// Unless `len` is 0 or `output` is null, `output` must be valid for writes
/// of `len` bytes.
pub unsafe fn block_status<E>(
    output: *mut u8,
    len: usize,
    mut fill: impl FnMut(&mut [u8]) -> Option<Result<(), E>>,
) -> c_int {
    if len == 0 {
        return 0;
    }
    if output.is_null() {
        return BAD_FUNC_ARG;
    }

    // SAFETY: caller guarantees `output` points to `len` writable bytes
    let mut rest = unsafe { slice::from_raw_parts_mut(output, len) };
    while !rest.is_empty() {
        let to_boundary = FILL_CHUNK - (rest.as_ptr() as usize % FILL_CHUNK);
        let take = to_boundary.min(rest.len());
        let (chunk, tail) = core::mem::take(&mut rest).split_at_mut(take);

        match fill(chunk) {
            Some(Ok(())) => {}
            Some(Err(_)) => {
                error!("entropy source failed");
                return RNG_FAILURE_E;
            }
            None => {
                error!("random block requested before the platform was installed");
                return RNG_FAILURE_E;
            }
        }
        rest = tail;
    }

    0
}
