//! Config subcommands handler

use anyhow::Result;

use wallsync::Config;

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    let toml_str = toml::to_string_pretty(config)?;
    println!("# {}", path.display());
    println!("{}", toml_str);
    Ok(())
}

/// Write the default configuration unless a file already exists.
pub fn handle_init() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    Config::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
