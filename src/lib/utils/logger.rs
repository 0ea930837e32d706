use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// [`config_logger`] The configuration for `env_logger`
pub fn config_logger(verbose_level: u8, target: Target) -> Result<()> {
    let mut builder = Builder::from_default_env();

    builder
        .target(target)
        .format_indent(Some(4))
        .format_module_path(false)
        .format_timestamp_millis()
        .filter(None, level_for(verbose_level)?);

    builder
        .try_init()
        .with_context(|| "argbind wasn't able to set up the logger")
}

#[allow(clippy::comparison_chain)]
fn level_for(verbose_level: u8) -> Result<LevelFilter> {
    if verbose_level == 1 {
        Ok(LevelFilter::Debug)
    } else if verbose_level > 1 {
        Err(eyre!("argbind maximum allowed verbosity level is: '-v'"))
    } else {
        Ok(LevelFilter::Info)
    }
}
