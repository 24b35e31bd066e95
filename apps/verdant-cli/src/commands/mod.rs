//! # Commands
//!
//! Entry points the shell exposes over the cart. Every command returns the
//! full [`CartResponse`](cart::CartResponse) so callers never have to
//! recompute totals themselves.

pub mod cart;
