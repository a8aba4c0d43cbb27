#[macro_use]
mod macros;

pub mod bot_client;
pub mod order_client;
pub mod shop_client;

pub use bot_client::*;
pub use order_client::*;
pub use shop_client::*;
