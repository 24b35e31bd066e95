//! # Application State
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────┐   ┌──────────────────────────────────┐   │
//! │  │       SharedCart         │   │           AppConfig              │   │
//! │  │  Arc<Mutex<CartStore>>   │   │  limits • cost policy • symbol   │   │
//! │  └──────────────────────────┘   └──────────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SharedCart: every command holds the lock for its whole mutation     │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::SharedCart;
pub use config::{AppConfig, ConfigError};
