mod credential;
mod currency;
mod deployment;
mod network;

pub use credential::*;
pub use currency::*;
pub use deployment::*;
pub use network::*;
