pub mod app_settings;
pub mod messages;
pub mod publisher;
pub mod reducer;
pub mod screen;
pub mod view_state;
