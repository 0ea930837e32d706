pub mod constants;
pub mod fs;
pub mod logger;
pub mod reader;
pub mod render;
pub mod template;
