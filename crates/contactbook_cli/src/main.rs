//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contactbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.
//!
//! This probe deliberately exposes no contact operations; the store is
//! consumed by the embedding UI, not by a command line.

fn main() {
    println!("contactbook_core ping={}", contactbook_core::ping());
    println!("contactbook_core version={}", contactbook_core::core_version());
}
