//! The long-running services: the root coordinator and the bot preview.

pub mod bot_preview;
pub mod shop_service;

pub use bot_preview::*;
pub use shop_service::*;
