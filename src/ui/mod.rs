// ui/mod.rs - Screen projection of the editor state

pub mod message;
pub mod renderer;
pub mod status_bar;
pub mod theme;

pub use message::StatusMessage;
pub use renderer::Renderer;
pub use status_bar::StatusBar;
pub use theme::Theme;
