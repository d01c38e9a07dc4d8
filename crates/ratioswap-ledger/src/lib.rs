mod ledger;
mod memory;

pub use ledger::{Ledger, LedgerSnapshot, NativeLedger, TokenLedger};
pub use memory::MemoryLedger;
