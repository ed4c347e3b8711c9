// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;
#[macro_use]
extern crate nodeperf_plot;

use nodeperf_plot::{Config, Logger, NAME, VERSION};

fn main() {
    let config = Config::new().unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    });

    Logger::new()
        .label(NAME)
        .level(config.logging())
        .init()
        .unwrap_or_else(|e| {
            eprintln!("ERROR: failed to initialize logger: {}", e);
            std::process::exit(1);
        });

    info!("{} {} initializing...", NAME, VERSION);
    config.print();

    match nodeperf_plot::run(&config) {
        Ok(results) => info!("plotted {} record(s)", results.len()),
        Err(e) => fatal!("{}", e),
    }
}
