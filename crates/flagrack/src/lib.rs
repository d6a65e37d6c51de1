//! An insertion-ordered registry of up to 32 named boolean flags over one `u32` mask.
//!
//! This crate provides a single value type, [`FlagSet`], that owns a name-to-bit
//! registry and the current state mask, with registration, mutation, composite
//! boolean queries, and an ordered serialization contract on top.
//!
//! ## Bit Assignment & Ordering
//!
//! Names are assigned power-of-two bits in registration order, starting at `2^0`:
//!
//! ```text
//! register(["cat", "dog", "bat"])  =>  cat = 0b001, dog = 0b010, bat = 0b100
//! ```
//!
//! The order is part of the contract: serialization walks the registry in exactly
//! this order, and a set rebuilt from the same names in the same order reproduces
//! the same bit layout. At most [`MAX_FLAGS`] names fit; the 33rd registration
//! fails with [`FlagSetError::CapacityExceeded`].
//!
//! ## Selectors
//!
//! Queries and [`FlagSet::reset`] accept a [`Selector`]: a single name, a sequence
//! of names, or a raw bitmask. Mutations that create or target flags by name take
//! [`Names`] instead, so a raw mask can never sneak into registration. Both types
//! convert from literals, arrays, slices, and owned strings.
//!
//! ## Serialization
//!
//! A [`FlagSet`] serializes as the ordered map of every registered name to its
//! boolean state, and deserializes from the same shape:
//!
//! ```text
//! {"cat":true,"dog":false,"bat":true}
//! ```
//!
//! ## Thread Safety
//!
//! A `FlagSet` is a plain owned value. No operation locks or suspends, and none is
//! safe for unsynchronized concurrent mutation; wrap a shared set in a mutex.
//!
//! ## Examples
//!
//! ```rust
//! use flagrack::prelude::*;
//!
//! # fn main() -> Result<(), FlagSetError> {
//! let mut flags = FlagSet::with_names(["cat", "dog", "bat"])?;
//!
//! flags.set(["cat", "bat"])?;
//! assert_eq!(flags.mask(), 5);
//! assert!(flags.has_all(5)?);
//! assert!(!flags.has_any("dog")?);
//! assert_eq!(flags.active_names(), ["cat", "bat"]);
//!
//! flags.reset(6)?;
//! assert_eq!(flags.active_names(), ["dog", "bat"]);
//!
//! flags.unregister();
//! assert!(flags.is_empty());
//! # Ok(())
//! # }
//! ```

mod error;
mod selector;
mod set;
mod snapshot;

pub use error::{FlagSetError, FlagSetErrorExt};
pub use selector::{Names, Selector};
pub use set::{FlagSet, MAX_FLAGS};

pub mod prelude {
    pub use crate::error::{FlagSetError, FlagSetErrorExt};
    pub use crate::selector::{Names, Selector};
    pub use crate::set::{FlagSet, MAX_FLAGS};
}
