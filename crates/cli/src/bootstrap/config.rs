use ferrous_watch_domain::{CliOverrides, Config, EnvOverrides};

/// File, then environment, then command line; the result must validate.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, EnvOverrides::from_env(), cli_overrides)?;
    config.validate()?;
    Ok(config)
}
