use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JWTSettings,
    pub catalog: CatalogSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub username: String,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub require_ssl: bool
}

impl DatabaseSettings {
    fn ssl_mode(&self) -> &'static str {
        if self.require_ssl {
            "require"
        } else {
            "prefer"
        }
    }

    // Url of the server itself, used to create databases
    pub fn get_database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}?sslmode={}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.ssl_mode()
        )
    }

    pub fn get_database_table_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.name,
            self.ssl_mode()
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JWTSettings{
    pub secret: String,
    pub expiry_hours: u64
}

#[derive(Deserialize, Debug, Clone)]
pub struct CatalogSettings{
    pub default_page_size: i64,
    pub max_page_size: i64
}

impl Settings{
    /// Layers `configuration/base.yaml`, the file named by `APP_ENVIRONMENT`
    /// (`local` when unset) and `APP_`-prefixed environment variables such as
    /// `APP_APPLICATION__PORT`.
    pub fn get() -> Result<Self, ConfigError>{
        let environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                File::with_name(&format!("configuration/{}.yaml", environment))
                    .required(false)
            )
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
