//! Command implementations.

pub mod profile;
pub mod sign;
pub mod sweep;
pub mod tip;
pub mod wallet;

pub use self::profile::execute_profile;
pub use self::sign::execute_sign;
pub use self::sweep::execute_sweep;
pub use self::tip::execute_tip;
pub use self::wallet::execute_wallet;
