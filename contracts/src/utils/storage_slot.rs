//! Helper for reading and writing primitive types to specific storage slots.
use alloy_primitives::U256;
use stylus_sdk::{host::VMAccess, prelude::*};

const SLOT_BYTE_SPACE: u8 = 32;

/// Helper for reading and writing primitive types to specific storage slots.
///
/// Upgradeable contracts keep proxy bookkeeping (the ERC-1967 implementation
/// address, the UUPS logic flag) in slots derived from a hash, so they never
/// overlap with the fields of the `#[entrypoint]` struct.
///
/// ```rust,ignore
/// use marketplace_stylus::utils::storage_slot::StorageSlot;
/// use stylus_sdk::storage::StorageAddress;
///
/// let implementation = StorageSlot::get_slot::<StorageAddress>(
///     self,
///     IMPLEMENTATION_SLOT,
/// )
/// .get();
/// ```
pub struct StorageSlot;

impl StorageSlot {
    /// Returns a [`StorageType`] located at `slot`, bound to the host of
    /// `context`.
    ///
    /// # Arguments
    ///
    /// * `context` - Any storage type with access to the host.
    /// * `slot` - The slot to get the value from.
    #[must_use]
    pub fn get_slot<ST: StorageType>(
        context: &impl VMAccess,
        slot: impl Into<U256>,
    ) -> ST {
        // SAFETY: `ST::SLOT_BYTES` is never larger than 32, so the
        // subtraction cannot underflow and the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        unsafe {
            ST::new(
                slot.into(),
                SLOT_BYTE_SPACE - ST::SLOT_BYTES as u8,
                context.raw_vm(),
            )
        }
    }
}
