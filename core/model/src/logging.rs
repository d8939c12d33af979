//! FILENAME: core/model/src/logging.rs
// PURPOSE: Category-tagged logging macros shared by the workspace crates.
//
// Every line carries a category ("PARAM", "PARSE", "PIVOT", ...) which is
// passed to the `log` facade as the record target. The host application
// decides where records go; library code never installs a logger.

#[doc(hidden)]
pub use log as __log;

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::error!(target: $cat, $($arg)*)
    };
}
