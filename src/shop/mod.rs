//! Root coordinator state: the cart, the active view and the reducer over them.

pub mod pages;
pub mod state;

pub use pages::*;
pub use state::*;
