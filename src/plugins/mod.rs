pub mod game_plugin;
pub mod input_plugin;
pub mod presentation_plugin;
