pub const PROGRAM_NAME: &str = "my-program";

pub const CONFIG_FILE: &str = include_str!("argbind.toml");
