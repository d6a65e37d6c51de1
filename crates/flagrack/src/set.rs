use std::borrow::Cow;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use tracing::trace;

use crate::error::FlagSetError;
use crate::selector::{Names, Selector};

/// Maximum number of flags a single [`FlagSet`] can register.
///
/// Bit positions live in a `u32`, so the 33rd distinct name has nowhere to go.
pub const MAX_FLAGS: usize = 32;

/// An insertion-ordered registry of named boolean flags over a single `u32` mask.
///
/// Each registered name is assigned the next power-of-two bit starting at `2^0`,
/// in registration order. The order is load-bearing: serialization emits names in
/// exactly this order, and re-registering the same names in the same order always
/// reproduces the same bit layout.
///
/// ### Ownership & Threading
/// A `FlagSet` is a plain owned value with no interior mutability. Operations are
/// synchronous in-memory reads and writes; nothing synchronizes internally, so a
/// set shared across threads must sit behind a lock.
///
/// ### Example
/// ```rust
/// use flagrack::prelude::*;
///
/// # fn main() -> Result<(), FlagSetError> {
/// let mut flags = FlagSet::with_names(["read", "write", "exec"])?;
///
/// flags.set(["read", "exec"])?;
/// assert!(flags.has_any("read")?);
/// assert!(flags.not_any("write")?);
/// assert_eq!(flags.active_names(), ["read", "exec"]);
///
/// flags.reset(0)?;
/// assert!(flags.none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub(crate) registry: IndexMap<String, u32, FxBuildHasher>,
    pub(crate) state: u32,
}

// --- Construction ---

impl FlagSet {
    /// Creates an empty flag set with no registered names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag set pre-seeded with an initial list of names.
    ///
    /// Duplicates are skipped, exactly as with [`FlagSet::register`].
    ///
    /// # Results
    /// Returns a fresh set with every listed name registered and no flag set.
    ///
    /// # Errors
    /// * [`FlagSetError::CapacityExceeded`] If the list carries more than [`MAX_FLAGS`] distinct names.
    pub fn with_names<'a>(names: impl Into<Names<'a>>) -> Result<Self, FlagSetError> {
        let mut flags = Self::new();
        flags.register(names)?;
        Ok(flags)
    }
}

// --- Registration ---

impl FlagSet {
    /// Registers one or more flag names.
    ///
    /// Each new name is assigned the next power-of-two bit in registration order,
    /// starting at `2^0`. Names already present are skipped, so repeated
    /// registration is idempotent. The state mask is never touched.
    ///
    /// On failure, names registered earlier in the same call stay registered.
    ///
    /// # Errors
    /// * [`FlagSetError::CapacityExceeded`] If a new name would be the 33rd distinct flag.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let mut flags = FlagSet::new();
    /// flags.register("cat")?;
    /// flags.register(["dog", "bat"])?;
    ///
    /// assert_eq!(flags.len(), 3);
    /// assert_eq!(flags.bit_of("bat"), Some(4));
    /// # Ok(())
    /// # }
    /// ```
    pub fn register<'a>(&mut self, names: impl Into<Names<'a>>) -> Result<(), FlagSetError> {
        let names = names.into();
        for raw in names.as_slice() {
            let name: &str = raw.as_ref();
            if self.registry.contains_key(name) {
                trace!(flag = name, "already registered, skipping");
                continue;
            }
            if self.registry.len() >= MAX_FLAGS {
                return Err(FlagSetError::CapacityExceeded {
                    message: format!(
                        "'{name}' does not fit, the registry holds at most {MAX_FLAGS} flags"
                    )
                    .into(),
                    context: None,
                });
            }
            let bit = 1u32 << self.registry.len();
            self.registry.insert(name.to_owned(), bit);
            trace!(flag = name, bit, "flag registered");
        }
        Ok(())
    }

    /// Drops every registered name and clears the state to zero.
    ///
    /// The next registered name starts over at bit `2^0`.
    pub fn unregister(&mut self) {
        let dropped = self.registry.len();
        self.registry.clear();
        self.state = 0;
        trace!(dropped, "flag registry cleared");
    }
}

// --- Mutation ---

impl FlagSet {
    /// Sets every referenced flag.
    ///
    /// The whole argument is resolved to a mask before the state changes, so an
    /// unknown name leaves the set untouched. Setting an already-set flag is a
    /// no-op.
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If any referenced name is not registered.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let mut flags = FlagSet::with_names(["cat", "dog", "bat"])?;
    /// flags.set(["cat", "bat"])?;
    ///
    /// assert_eq!(flags.mask(), 0b101);
    /// # Ok(())
    /// # }
    /// ```
    pub fn set<'a>(&mut self, names: impl Into<Names<'a>>) -> Result<(), FlagSetError> {
        let mask = self.mask_for(names.into().as_slice())?;
        self.state |= mask;
        Ok(())
    }

    /// Clears every referenced flag.
    ///
    /// Symmetric to [`FlagSet::set`]: the argument is resolved to a mask first,
    /// and clearing an already-clear flag is a no-op.
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If any referenced name is not registered.
    pub fn clear<'a>(&mut self, names: impl Into<Names<'a>>) -> Result<(), FlagSetError> {
        let mask = self.mask_for(names.into().as_slice())?;
        self.state &= !mask;
        Ok(())
    }

    /// Replaces the state according to the selector shape.
    ///
    /// * [`Selector::Mask`] installs the mask verbatim after bounds-checking it
    ///   against the registered ceiling.
    /// * [`Selector::Name`] and [`Selector::Names`] clear the state to zero, then
    ///   set exactly the referenced flags.
    ///
    /// # Errors
    /// * [`FlagSetError::InvalidMask`] If a raw mask sets bits beyond every registered flag.
    /// * [`FlagSetError::UnknownFlag`] If any referenced name is not registered.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let mut flags = FlagSet::with_names(["cat", "dog", "bat"])?;
    ///
    /// flags.reset(6)?;
    /// assert_eq!(flags.active_names(), ["dog", "bat"]);
    ///
    /// flags.reset("cat")?;
    /// assert_eq!(flags.mask(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn reset<'a>(&mut self, selector: impl Into<Selector<'a>>) -> Result<(), FlagSetError> {
        let mask = match selector.into() {
            Selector::Mask(mask) => {
                let ceiling = self.full_mask();
                if mask > ceiling {
                    return Err(FlagSetError::InvalidMask {
                        message: format!(
                            "{mask:#b} sets bits beyond the registered ceiling {ceiling:#b}"
                        )
                        .into(),
                        context: None,
                    });
                }
                mask
            }
            Selector::Name(name) => self.bit(name.as_ref())?,
            Selector::Names(names) => self.mask_for(&names)?,
        };
        self.state = mask;
        trace!(mask, "state reset");
        Ok(())
    }
}

// --- Queries ---

impl FlagSet {
    /// Returns `true` if any selected flag is set.
    ///
    /// # Results
    /// Returns `state & mask != 0` for the resolved selector mask.
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If a name selector references an unregistered name.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let mut flags = FlagSet::with_names(["cat", "dog", "bat"])?;
    /// flags.set("bat")?;
    ///
    /// assert!(flags.has_any(["cat", "bat"])?);
    /// assert!(!flags.has_any("dog")?);
    /// assert!(flags.has_any(0b100)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn has_any<'a>(&self, selector: impl Into<Selector<'a>>) -> Result<bool, FlagSetError> {
        let mask = self.selector_mask(&selector.into())?;
        Ok(self.state & mask != 0)
    }

    /// Returns `true` if every selected flag is set.
    ///
    /// An empty selection resolves to mask `0`, which is vacuously contained in
    /// any state.
    ///
    /// # Results
    /// Returns `state & mask == mask` for the resolved selector mask.
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If a name selector references an unregistered name.
    pub fn has_all<'a>(&self, selector: impl Into<Selector<'a>>) -> Result<bool, FlagSetError> {
        let mask = self.selector_mask(&selector.into())?;
        Ok(self.state & mask == mask)
    }

    /// Boolean negation of [`FlagSet::has_any`].
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If a name selector references an unregistered name.
    pub fn not_any<'a>(&self, selector: impl Into<Selector<'a>>) -> Result<bool, FlagSetError> {
        self.has_any(selector).map(|hit| !hit)
    }

    /// Boolean negation of [`FlagSet::has_all`].
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If a name selector references an unregistered name.
    pub fn not_all<'a>(&self, selector: impl Into<Selector<'a>>) -> Result<bool, FlagSetError> {
        self.has_all(selector).map(|hit| !hit)
    }

    /// Returns `true` if every registered flag is set.
    ///
    /// With zero registered flags the ceiling is `0`, so an empty set reports
    /// `true` (vacuous truth).
    #[must_use]
    pub fn all(&self) -> bool {
        self.state == self.full_mask()
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub const fn none(&self) -> bool {
        self.state == 0
    }

    /// Builds the bitmask selecting the given names.
    ///
    /// # Results
    /// Returns the OR of every named flag's assigned bit.
    ///
    /// # Errors
    /// * [`FlagSetError::UnknownFlag`] If any name is not registered.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let flags = FlagSet::with_names(["cat", "dog", "bat"])?;
    /// assert_eq!(flags.mask_of(["cat", "dog"])?, 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn mask_of<'a>(&self, names: impl Into<Names<'a>>) -> Result<u32, FlagSetError> {
        self.mask_for(names.into().as_slice())
    }
}

// --- Inspection ---

impl FlagSet {
    /// Returns the number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns the raw state mask.
    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.state
    }

    /// Returns `true` if the name is registered, set or not.
    #[must_use]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.registry.contains_key(name.as_ref())
    }

    /// Returns the bit assigned to the name, if registered.
    #[must_use]
    pub fn bit_of(&self, name: impl AsRef<str>) -> Option<u32> {
        self.registry.get(name.as_ref()).copied()
    }

    /// Returns every registered name in registration order, set or not.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }
}

// --- Mask resolution ---

impl FlagSet {
    /// Looks up the bit for one name.
    fn bit(&self, name: &str) -> Result<u32, FlagSetError> {
        self.registry.get(name).copied().ok_or_else(|| FlagSetError::UnknownFlag {
            message: format!("'{name}' was never registered").into(),
            context: None,
        })
    }

    /// ORs together the bits of every name in the slice.
    fn mask_for(&self, names: &[Cow<'_, str>]) -> Result<u32, FlagSetError> {
        let mut mask = 0;
        for name in names {
            mask |= self.bit(name.as_ref())?;
        }
        Ok(mask)
    }

    /// Resolves any selector shape to a bitmask. Raw masks pass through unvalidated.
    fn selector_mask(&self, selector: &Selector<'_>) -> Result<u32, FlagSetError> {
        match selector {
            Selector::Mask(mask) => Ok(*mask),
            Selector::Name(name) => self.bit(name.as_ref()),
            Selector::Names(names) => self.mask_for(names),
        }
    }

    /// The "every registered flag set" ceiling: `2^len - 1` without overflowing at 32.
    fn full_mask(&self) -> u32 {
        match self.registry.len() {
            0 => 0,
            len if len >= MAX_FLAGS => u32::MAX,
            len => (1u32 << len) - 1,
        }
    }
}
