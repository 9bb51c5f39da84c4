use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};

use crate::domain::LocatorTable;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub browser: BrowserSettings,
    pub search: SearchSettings,
    pub output: OutputSettings,
    #[serde(default)]
    pub locators: LocatorTable,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    pub site_url: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub headless: bool,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub maximized: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub wait_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_interval_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub results_settle_secs: u64,
}

impl BrowserSettings {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }

    pub fn results_settle(&self) -> Duration {
        Duration::from_secs(self.results_settle_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchSettings {
    pub phrase: String,
    pub category: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub workbook_name: String,
    pub picture_prefix: String,
    pub log_file_name: Option<String>,
}

impl OutputSettings {
    pub fn workbook_path(&self) -> PathBuf {
        self.directory.join(&self.workbook_name)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file_name
            .as_ref()
            .map(|name| self.directory.join(name))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // E.g. `APP_SEARCH__PHRASE=floods` would set `Settings.search.phrase`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
