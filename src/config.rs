use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub survey: SurveySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Layout of the survey export
#[derive(Debug, Clone, Deserialize)]
pub struct SurveySettings {
    #[serde(default = "default_survey_path")]
    pub path: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_social_column")]
    pub social_column: String,
    #[serde(default = "default_gender_column")]
    pub gender_column: String,
    /// Ranked wish columns, best first. Their count is the wish list limit.
    #[serde(default = "default_wish_columns")]
    pub wish_columns: Vec<String>,
    #[serde(default = "default_partner_column")]
    pub partner_column: String,
    /// Literal answers meaning "yes" and "no" to the social component
    #[serde(default = "default_social_answers")]
    pub social_answers: [String; 2],
    /// Literal labels of the two gender categories (female, male)
    #[serde(default = "default_genders")]
    pub genders: [String; 2],
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            path: default_survey_path(),
            name_column: default_name_column(),
            social_column: default_social_column(),
            gender_column: default_gender_column(),
            wish_columns: default_wish_columns(),
            partner_column: default_partner_column(),
            social_answers: default_social_answers(),
            genders: default_genders(),
        }
    }
}

fn default_survey_path() -> String { "wishes.csv".to_string() }
fn default_name_column() -> String { "Hva er ditt navn?".to_string() }
fn default_social_column() -> String { "Skal du delta på sosial del?".to_string() }
fn default_gender_column() -> String { "Hvilket kjønn er du?".to_string() }
fn default_partner_column() -> String { "Sosialt ønske".to_string() }

fn default_wish_columns() -> Vec<String> {
    vec![
        "Førstevalg".to_string(),
        "Andrevalg".to_string(),
        "Tredjevalg".to_string(),
    ]
}

fn default_social_answers() -> [String; 2] {
    ["Ja".to_string(), "Nei".to_string()]
}

fn default_genders() -> [String; 2] {
    ["Jente".to_string(), "Gutt".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> String { "matching.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROOMMATE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROOMMATE__SURVEY__PATH -> survey.path
            .add_source(
                Environment::with_prefix("ROOMMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ROOMMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
