//! Data Memory Address type.
//!
//! This module defines a strong type for data memory addresses so that every access
//! goes through the same wrap-around rule. It provides the following:
//! 1. **Type Safety:** A `DataAddr` can only hold a value in `0..DATA_MEMORY_SIZE`.
//! 2. **Wrap Semantics:** Out-of-range and negative addresses fold back into range.

use std::fmt;

use serde::Serialize;

use super::constants::DATA_MEMORY_SIZE;

/// An address into data memory.
///
/// Constructed only through [`DataAddr::wrap`], which reduces any signed address
/// modulo the memory size, folding negative values to `size + addr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DataAddr(u16);

impl DataAddr {
    /// Wraps a signed address into the data memory range.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw, possibly negative, address.
    ///
    /// # Returns
    ///
    /// The address reduced modulo `DATA_MEMORY_SIZE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use harvsim_core::common::addr::DataAddr;
    ///
    /// assert_eq!(DataAddr::wrap(10).val(), 10);
    /// assert_eq!(DataAddr::wrap(-1).val(), 2047);
    /// assert_eq!(DataAddr::wrap(2048).val(), 0);
    /// ```
    #[inline]
    pub fn wrap(addr: i32) -> Self {
        Self(addr.rem_euclid(DATA_MEMORY_SIZE as i32) as u16)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u16 {
        self.0
    }

    /// Returns the address as a slice index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DataAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
