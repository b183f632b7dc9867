// Configuration module entry point
// Loads layered configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Port used when neither `PORT` nor the config sets one
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable that overrides the listening port
pub const PORT_ENV: &str = "PORT";

/// Prefix of the environment variables that override config keys
pub const ENV_PREFIX: &str = "STATIC";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Precedence, lowest first: built-in defaults, the config file (optional),
    /// `STATIC_*` environment variables (`STATIC_SITE__ROOT=dist`), then `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let env_port = port_from_env(std::env::var(PORT_ENV).ok().as_deref())?;
        Self::build(config_path, env_overrides(None), env_port)
    }

    fn build(
        config_path: &str,
        env: config::Environment,
        env_port: Option<u16>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("site.root", "public")?
            .set_default("site.default_document", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_override_option("server.port", env_port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// `STATIC_<SECTION>__<KEY>` variables, taken from `vars` when given instead of
/// the process environment.
fn env_overrides(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(vars)
}

/// Parse the value of the `PORT` environment variable.
///
/// Unset or blank means "use the configured port"; anything else must be a
/// valid TCP port number.
pub fn port_from_env(raw: Option<&str>) -> Result<Option<u16>, config::ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u16>().map(Some).map_err(|e| {
            config::ConfigError::Message(format!("Invalid {PORT_ENV} value '{value}': {e}"))
        }),
    }
}
