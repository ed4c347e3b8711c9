// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod chart;
mod general;

use crate::config::chart::Chart;
use crate::config::general::General;
use crate::plot::Series;
use crate::results::Truncation;
use crate::{Error, NAME, VERSION};

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::*;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    chart: Chart,
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config, Error> {
        Config::from_args(std::env::args_os())
    }

    /// build a `Config` from an explicit argument list, the first item being
    /// the program name
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Config::app().get_matches_from(args);
        Config::from_matches(&matches)
    }

    fn app() -> App<'static, 'static> {
        App::new(NAME)
            .version(VERSION)
            .author("Brian Martin <bmartin@twitter.com>")
            .about("Plot node discovery latency from nodeperf results")
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .value_name("FILE")
                    .help("TOML config file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("input")
                    .long("input")
                    .value_name("FILE")
                    .help("nodeperf results log to read")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .value_name("DIR")
                    .help("Directory to write the charts to")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("truncated")
                    .long("truncated")
                    .value_name("POLICY")
                    .help("How to treat an incomplete trailing record")
                    .possible_value("reject")
                    .possible_value("discard")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config, Error> {
        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(input) = matches.value_of("input") {
            config.general.set_input(input.to_string());
        }

        if let Some(output) = matches.value_of("output") {
            config.general.set_output(output.to_string());
        }

        if let Some(truncated) = matches.value_of("truncated") {
            let truncated = truncated.parse().map_err(|_| Error::Config {
                file: "--truncated".to_string(),
                reason: format!("unknown policy: {}", truncated),
            })?;
            config.general.set_truncated(truncated);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        Ok(config)
    }

    /// load a `Config` from a TOML file
    pub fn load_from_file(file: &str) -> Result<Config, Error> {
        let content = std::fs::read_to_string(file).map_err(|e| Error::Config {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
        Config::load_from_str(file, &content)
    }

    /// parse a `Config` from TOML text, `name` identifies the source in errors
    pub fn load_from_str(name: &str, content: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(content).map_err(|e| Error::Config {
            file: name.to_string(),
            reason: e.to_string(),
        })?;
        config.chart.validate().map_err(|reason| Error::Config {
            file: name.to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// the results log to read
    pub fn input(&self) -> PathBuf {
        PathBuf::from(self.general.input())
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.general.set_input(input.into());
    }

    /// the directory charts are written to
    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.general.output())
    }

    pub fn set_output(&mut self, output: impl Into<String>) {
        self.general.set_output(output.into());
    }

    /// the full path of the chart for `series`
    pub fn output_path(&self, series: Series) -> PathBuf {
        self.output().join(self.chart.filename(series))
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn truncation(&self) -> Truncation {
        self.general.truncated()
    }

    pub fn set_truncation(&mut self, truncation: Truncation) {
        self.general.set_truncated(truncation);
    }

    pub fn chart_size(&self) -> (u32, u32) {
        self.chart.size()
    }

    pub fn chart_caption(&self) -> Option<&str> {
        self.chart.caption()
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Input: {}", self.input().display());
        info!("Config: Output: {}", self.output().display());
        info!("Config: Truncated records: {}", self.truncation());
        let (width, height) = self.chart_size();
        info!(
            "Config: Chart: {}x{} Caption: {}",
            width,
            height,
            self.chart_caption().unwrap_or("None"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.input(), PathBuf::from("results"));
        assert_eq!(config.output(), PathBuf::from("."));
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.truncation(), Truncation::Reject);
        assert_eq!(config.chart_size(), (1024, 768));
        assert_eq!(config.chart_caption(), None);
        assert_eq!(
            config.output_path(Series::Init),
            PathBuf::from("./init.svg")
        );
        assert_eq!(
            config.output_path(Series::Additional),
            PathBuf::from("./additional.svg")
        );
    }

    #[test]
    fn empty_file() {
        let config = Config::load_from_str("empty", "").unwrap();
        assert_eq!(config.input(), PathBuf::from("results"));
        assert_eq!(config.truncation(), Truncation::Reject);
    }

    #[test]
    fn toml() {
        let content = r#"
            [general]
            input = "runs/results"
            output = "charts"
            logging = "debug"
            truncated = "discard"

            [chart]
            width = 640
            height = 480
            caption = "cilium nodeperf"
            init = "initial.svg"
        "#;
        let config = Config::load_from_str("test", content).unwrap();
        assert_eq!(config.input(), PathBuf::from("runs/results"));
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.truncation(), Truncation::Discard);
        assert_eq!(config.chart_size(), (640, 480));
        assert_eq!(config.chart_caption(), Some("cilium nodeperf"));
        assert_eq!(
            config.output_path(Series::Init),
            PathBuf::from("charts/initial.svg")
        );
        assert_eq!(
            config.output_path(Series::Additional),
            PathBuf::from("charts/additional.svg")
        );
    }

    #[test]
    fn unknown_key() {
        let content = "[general]\nthreads = 4\n";
        match Config::load_from_str("test", content) {
            Err(Error::Config { file, .. }) => assert_eq!(file, "test"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn zero_size() {
        for content in &["[chart]\nwidth = 0\n", "[chart]\nheight = 0\n"] {
            match Config::load_from_str("test", content) {
                Err(Error::Config { file, reason }) => {
                    assert_eq!(file, "test");
                    assert!(reason.contains("non-zero"));
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn bad_level() {
        let content = "[general]\nlogging = \"loud\"\n";
        assert!(Config::load_from_str("test", content).is_err());
    }

    #[test]
    fn missing_file() {
        match Config::load_from_file("/nonexistent/nodeperf.toml") {
            Err(Error::Config { file, .. }) => assert_eq!(file, "/nonexistent/nodeperf.toml"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn arguments() {
        let config = Config::from_args(vec![
            "nodeperf-plot",
            "--input",
            "other",
            "--output",
            "out",
            "--truncated",
            "discard",
            "-vv",
        ])
        .unwrap();
        assert_eq!(config.input(), PathBuf::from("other"));
        assert_eq!(config.output(), PathBuf::from("out"));
        assert_eq!(config.truncation(), Truncation::Discard);
        assert_eq!(config.logging(), Level::Trace);

        let config = Config::from_args(vec!["nodeperf-plot", "-v"]).unwrap();
        assert_eq!(config.logging(), Level::Debug);
        assert_eq!(config.input(), PathBuf::from("results"));
    }

    #[test]
    fn arguments_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nodeperf.toml");
        std::fs::write(
            &file,
            "[general]\ninput = \"from-file\"\noutput = \"charts\"\nlogging = \"warn\"\n",
        )
        .unwrap();

        let config = Config::from_args(vec![
            "nodeperf-plot",
            "--config",
            file.to_str().unwrap(),
            "--input",
            "from-args",
        ])
        .unwrap();
        assert_eq!(config.input(), PathBuf::from("from-args"));
        assert_eq!(config.output(), PathBuf::from("charts"));
        assert_eq!(config.logging(), Level::Warn);
    }
}
