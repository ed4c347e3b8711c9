// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plots node discovery latency, as measured by `nodeperf`, against the
//! number of nodes in the cluster.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

mod config;
mod error;
mod logger;
mod plot;
mod results;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::logger::{Level, Logger};
pub use crate::plot::{Chart, Series};
pub use crate::results::*;

use strum::IntoEnumIterator;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Extracts the results log named by `config` and renders one chart per
/// `Series` into the output directory.
pub fn run(config: &Config) -> Result<Results, Error> {
    let results = Extractor::new()
        .truncation(config.truncation())
        .extract_file(config.input())?;

    info!("nodes: {:?}", results.nodes());
    info!("init discovery: {:?}", results.init_discovery());
    info!("additional discovery: {:?}", results.additional_discovery());

    let output = config.output();
    std::fs::create_dir_all(&output).map_err(|e| Error::Render {
        path: output.clone(),
        reason: e.to_string(),
    })?;

    for series in Series::iter() {
        let path = config.output_path(series);

        let mut chart = Chart::new();
        chart.size(config.chart_size()).colour(series.colour());
        if let Some(caption) = config.chart_caption() {
            chart.caption(caption);
        }

        chart.plot(&path, &series.points(&results))?;
        info!("{} chart: {}", series, path.display());
    }

    Ok(results)
}
