// Copyright (C) 2025-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::CliError;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables overriding the configuration, e.g.
/// `TDT_WINDOW_SIZE=10` or `TDT_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "TDT_";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
    /// JSON Lines file with the translation delivered events
    pub input_file: PathBuf,

    /// Size of the trailing window in minutes
    pub window_size: i64,

    /// Results file, stdout is used when not set
    #[serde(default, skip_serializing_if = "::std::option::Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values given on the command line. Unset values leave whatever the other
/// configuration sources provided untouched.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "::std::option::Option::is_none")]
    pub input_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "::std::option::Option::is_none")]
    pub window_size: Option<i64>,

    #[serde(skip_serializing_if = "::std::option::Option::is_none")]
    pub output: Option<PathBuf>,

    #[serde(skip_serializing_if = "::std::option::Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Build the configuration from, in increasing order of precedence, the
/// optional YAML file, the `TDT_` environment variables and the command line.
pub fn load_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, CliError> {
    let mut figment = Figment::new();
    if let Some(config_file) = config_file {
        if !config_file.is_file() {
            return Err(CliError::ConfigNotFound(config_file.to_path_buf()));
        }
        figment = figment.merge(Yaml::file(config_file));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Serialized::defaults(overrides))
        .extract()
        .map_err(|err| CliError::Config(Box::new(err)))
}
