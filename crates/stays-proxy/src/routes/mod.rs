pub mod packages;
pub mod proxy;
