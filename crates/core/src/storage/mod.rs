pub mod format;
pub mod manager;
pub mod memory;
pub mod traits;
