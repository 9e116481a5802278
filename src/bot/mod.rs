pub mod audit;
mod commands;
pub mod failure;
pub mod handlers;
mod state;
mod views;

pub use commands::Command;
pub use handlers::{dispatch_interaction, dispatch_message};
pub use state::BotState;
