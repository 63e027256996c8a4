pub mod password;
pub mod session_ops;
pub mod settlement;
pub mod vault_ops;

pub use session_ops::SessionOps;
pub use settlement::{Settlement, SimulatedSettlement, WithdrawReceipt};
pub use vault_ops::VaultOps;
