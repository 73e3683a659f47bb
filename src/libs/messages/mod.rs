//! User-facing message catalogue and output macros.
//!
//! Every line todopad prints is a [`Message`] variant; the text lives in
//! `display.rs` and the `msg_*!` macros in `macros.rs` decide where it goes.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
