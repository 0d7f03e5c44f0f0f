//! Noughts - tic-tac-toe in the terminal against a perfect-play adversary.
//!
//! # Architecture
//!
//! - **Engine**: rules, minimax search and session state (`noughts_engine`)
//! - **Driver**: async loop feeding inputs and timers into the session
//! - **Config**: delays and the preference file location (`noughts.toml`)
//! - **Preferences**: the stored player mark, read once per session
//! - **Render**: text or JSON frames for whatever draws the board

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod input;
mod prefs;
mod render;

pub use config::{AppConfig, ConfigError};
pub use driver::drive;
pub use input::{Input, ParseInputError, read_inputs};
pub use prefs::{FilePreferences, PreferenceError};
pub use render::{FrameFormat, text_frame};
