//! # Verdant CLI Entry Point
//!
//! ```text
//! verdant --file cart.json inc Fern dec Cactus rm Moss set Orchid 2
//!    │
//!    ├── init tracing (stderr)
//!    ├── AppConfig::from_env()
//!    ├── load cart file (optional; without it the cart reports "loading")
//!    ├── apply operations in order
//!    └── print CartResponse as JSON (stdout)
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    verdant_cli_lib::run()
}
