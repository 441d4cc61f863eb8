pub mod storage;
pub mod types;

pub use storage::ExchangeLog;
pub use types::Exchange;
