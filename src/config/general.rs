// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

use log::Level;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_input")]
    input: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
    #[serde(default)]
    truncated: Truncation,
}

impl Default for General {
    fn default() -> General {
        General {
            input: default_input(),
            output: default_output(),
            logging: default_logging_level(),
            truncated: Default::default(),
        }
    }
}

impl General {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn set_output(&mut self, output: String) {
        self.output = output;
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }

    pub fn truncated(&self) -> Truncation {
        self.truncated
    }

    pub fn set_truncated(&mut self, truncated: Truncation) {
        self.truncated = truncated;
    }
}

fn default_input() -> String {
    "results".to_string()
}

fn default_output() -> String {
    ".".to_string()
}

#[derive(Deserialize)]
#[serde(remote = "Level")]
#[serde(rename_all = "lowercase")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> Level {
    Level::Info
}
