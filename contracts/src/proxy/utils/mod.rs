//! Components an implementation composes to live behind a proxy.
pub mod erc1822;
pub mod initializable;
pub mod uups_upgradeable;
