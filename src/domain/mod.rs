pub mod product;
pub mod cart;
pub mod order;
pub mod chat;

pub use product::*;
pub use cart::*;
pub use order::*;
pub use chat::*;
