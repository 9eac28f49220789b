// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, DataSettings, ReportSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional: a missing file yields the built-in defaults, and a
/// partial file only overrides the sections it names. Command-line flags
/// take precedence over everything loaded here.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
