//! The scripted chat shown in the bot preview tab.

mod script;
mod transcript;

pub use script::*;
pub use transcript::*;
