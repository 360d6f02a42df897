//! Feature-gated diagnostics.
//!
//! With `esp32-log` enabled messages go to the ESP serial console through
//! `esp-println`. Without it the arguments are still type-checked but nothing
//! is formatted or printed.

/// Print a diagnostic line from anywhere in the crate.
macro_rules! show_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(not(feature = "esp32-log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use show_log;
