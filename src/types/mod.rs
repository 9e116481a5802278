pub mod audit;
pub mod dice;
pub mod error;
pub mod event;
