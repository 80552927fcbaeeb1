//! Filesystem helpers for svnwatch.

mod atomic;

pub use atomic::atomic_write_file;
