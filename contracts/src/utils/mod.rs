//! Low-level helpers shared by the proxy components.
pub mod address;
pub mod storage_slot;
