//! Player avatar for a top-down shooter: movement, pointer/stick aiming,
//! rate-limited fire with a finite magazine and timed reload.

pub mod config;
pub mod game;
pub mod plugins;
