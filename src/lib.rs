#![doc(test(attr(deny(warnings))))]

//! Finch is a terminal picker for hierarchical spending categories. It loads
//! a taxonomy, lets the user drill down to a leaf, and reports the category
//! value a transaction form would store.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finch tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
