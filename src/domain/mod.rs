mod ledger;
mod money;
mod registration;
mod vehicle;

pub use ledger::*;
pub use money::*;
pub use registration::*;
pub use vehicle::*;
