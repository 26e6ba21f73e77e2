mod account;
mod money;
mod payment;
mod transfer;

pub use account::*;
pub use money::*;
pub use payment::*;
pub use transfer::*;
