//! Constant value definitions to use across the whole program

pub const DEFAULT_CONFIG_FILE: &str = "argbind.toml";

pub mod debug_messages {
    pub const MAPPING_CFG_TO_PARSER: &str =
        "Proceeding to map the configuration file to the declared arguments of the program";
}

pub mod error_messages {
    pub const READ_CFG_FILE: &str = "Could not read the configuration file";
    pub const PARSE_CFG_FILE: &str = "Could not parse the configuration file";
    pub const BUILD_PARSER: &str = "Could not declare the arguments of the configuration file";
    pub const PARSE_COMMAND_LINE: &str = "The command line doesn't match the declared arguments";
    pub const RENDER_VALUES: &str = "Could not render the resolved values";
    pub const CHOICES_ON_NON_STRING: &str =
        "The 'choices' attribute is only available for arguments of kind 'string'";
    pub const FALLBACK_WITHOUT_CHOICES: &str =
        "The 'fallback' attribute requires a list of 'choices'";
    pub const FLAG_WITH_VALUE_ATTRIBUTES: &str =
        "A 'flag' argument doesn't take 'kind', 'default', 'nargs' nor 'choices'";
    pub const CONFIG_FILE_ALREADY_EXISTS: &str =
        "A configuration file already exists on the target directory";
    pub const FAILURE_GATHERING_ROOT_ABS_PATH: &str =
        "Can't obtain the absolute path of the root directory";
}
