//! Bindings to the wolfCrypt test suite
//!
//! The static library is linked by `build.rs` from `WOLFSSL_LIB_DIR`. It must
//! be built with the platform hooks exported from [`super::platform`]
//! (`CUSTOM_RAND_GENERATE_BLOCK`, `XTIME`, `current_time`).

use core::ffi::{c_int, c_void};

use crypt_self_test::harness::{CryptoSuite, TestArgs};
use crypt_self_test::Error;

#[allow(non_snake_case)]
extern "C" {
    fn wolfCrypt_Init() -> c_int;
    fn wolfCrypt_Cleanup() -> c_int;
    fn wolfcrypt_test(args: *mut c_void) -> c_int;
}

/// wolfCrypt's full self-test
pub struct WolfCrypt;

impl CryptoSuite for WolfCrypt {
    fn init(&mut self) -> Result<(), Error> {
        // SAFETY: no preconditions, called once before any other wolfCrypt call
        match unsafe { wolfCrypt_Init() } {
            0 => Ok(()),
            code => Err(Error::Library(code)),
        }
    }

    fn run(&mut self, args: &mut TestArgs) {
        // SAFETY: `TestArgs` has the layout of wolfCrypt's `func_args` and
        // outlives the call. The verdict is read from `args.return_code`, the
        // function's own return value duplicates it.
        unsafe {
            wolfcrypt_test((args as *mut TestArgs).cast());
        }
    }

    fn cleanup(&mut self) -> Result<(), Error> {
        // SAFETY: paired with the successful init above
        match unsafe { wolfCrypt_Cleanup() } {
            0 => Ok(()),
            code => Err(Error::Library(code)),
        }
    }
}
