//! # FlagSet Errors
//!
//! This module defines the [`FlagSetError`] enum used throughout the crate for
//! reporting misuse of the flag registry and its state mask.

use std::borrow::Cow;

/// A specialized [`FlagSetError`] enum for flag registry failures.
///
/// Every failure is a deterministic function of the call and the current registry,
/// so there is no transient or internal fallback variant.
#[flagrack_derive::flag_error]
pub enum FlagSetError {
    /// A mutation or query referenced a name that was never registered.
    #[error("Unknown flag{}: {message}", format_context(.context))]
    UnknownFlag { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Registration would exceed the 32-flag ceiling.
    #[error("Flag capacity exceeded{}: {message}", format_context(.context))]
    CapacityExceeded { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A raw-mask reset carried bits beyond every registered flag.
    #[error("Invalid mask{}: {message}", format_context(.context))]
    InvalidMask { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
