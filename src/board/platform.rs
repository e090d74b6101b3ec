//! C ABI platform hooks for wolfCrypt
//!
//! The library calls these without any context argument, so the platform
//! built during bootstrap is parked in a critical-section mutex. Time and
//! single-word hooks borrow it for the whole call; block fills take the lock
//! once per [`hooks::FILL_CHUNK`] so interrupts are not masked for the length
//! of a large request. Status mapping lives in [`hooks`].

use core::cell::RefCell;
use core::ffi::{c_int, c_uint, c_ulong};

use crypt_self_test::platform::{hooks, Platform, SoftRtc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::time::EmbassyUptime;
use super::TrngSource;

pub type HarnessPlatform = Platform<SoftRtc<EmbassyUptime>, TrngSource>;

static PLATFORM: Mutex<CriticalSectionRawMutex, RefCell<Option<HarnessPlatform>>> = Mutex::new(RefCell::new(None));

/// Makes the platform available to the C hooks
pub fn install(platform: HarnessPlatform) {
    PLATFORM.lock(|cell| *cell.borrow_mut() = Some(platform));
}

/// Elapsed seconds since the epoch, approximate
#[no_mangle]
pub extern "C" fn current_time(reset: c_int) -> f64 {
    PLATFORM.lock(|cell| hooks::current_time(cell.borrow().as_ref(), reset))
}

/// `time()` replacement. The timer argument is ignored and never written.
#[no_mangle]
pub extern "C" fn custom_time(_timer: *mut c_ulong) -> c_ulong {
    PLATFORM.lock(|cell| hooks::custom_time(cell.borrow().as_ref())) as c_ulong
}

/// One 32-bit word from the TRNG. Panics if called before [`install`].
#[no_mangle]
pub extern "C" fn custom_rand_generate() -> c_uint {
    PLATFORM.lock(|cell| hooks::random_word(cell.borrow_mut().as_mut()))
}

/// Fills `sz` bytes at `output` from the TRNG, returns 0 on success.
///
/// # Safety
/// `output` must be valid for writes of `sz` bytes.
#[no_mangle]
pub unsafe extern "C" fn custom_rand_generate_block(output: *mut u8, sz: c_uint) -> c_int {
    // SAFETY: forwarded from the caller
    unsafe {
        hooks::block_status(output, sz as usize, |chunk| {
            PLATFORM.lock(|cell| cell.borrow_mut().as_mut().map(|p| p.random_block(chunk)))
        })
    }
}
