use flagrack::prelude::*;

/// Initializes a flag set with the canonical trio used across the test suite.
///
/// The names register as `cat = 1`, `dog = 2`, `bat = 4`, with nothing set.
///
/// # Panics
/// * If registration fails, the function will panic.
#[must_use]
pub fn setup_flags() -> FlagSet {
    FlagSet::with_names(["cat", "dog", "bat"]).expect("flag registration failed")
}
