use core::ffi::{c_char, c_int};
use core::ptr;

/// Argument block handed to the external self-test entry point.
///
/// Layout matches the library's `func_args`; the entry point writes its
/// verdict into `return_code` (0 on success).
#[repr(C)]
#[derive(Debug)]
pub struct TestArgs {
    /// Number of entries in `argv`, always 0 here
    pub argc: c_int,
    /// Command line, null when `argc` is 0
    pub argv: *mut *mut c_char,
    /// Written by the entry point, 0 on success
    pub return_code: c_int,
}

impl TestArgs {
    /// No command line, return code cleared
    pub const fn new() -> Self {
        Self {
            argc: 0,
            argv: ptr::null_mut(),
            return_code: 0,
        }
    }

    /// Clears the return code ahead of the next invocation
    pub fn reset(&mut self) {
        self.return_code = 0;
    }

    /// Whether the last invocation reported success
    pub fn passed(&self) -> bool {
        self.return_code == 0
    }
}

impl Default for TestArgs {
    fn default() -> Self {
        Self::new()
    }
}
