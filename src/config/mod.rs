pub mod core;
pub mod rendering;
pub mod window;

pub use self::core::{AppConfig, DEFAULT_CONFIG_PATH};
pub use rendering::RenderConfig;
pub use window::WindowConfig;
