// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extraction of node discovery results from a `nodeperf` results log.
//!
//! The log carries no delimiters: every three consecutive lines form one
//! record, and each line contributes one value at a fixed field index.
//!
//! ```text
//! 10 nodes
//! Mean discovery time: 1.5s, variance: 0.2s
//! After adding 5 nodes: Mean discovery time: 2.75s, variance: 0.1s
//! ```

mod slot;

pub use self::slot::{Slot, RECORD_WIDTH};

use crate::Error;

use serde_derive::*;
use strum_macros::{Display, EnumString};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// What to do with a trailing record that has fewer than `RECORD_WIDTH` lines
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
#[serde(deny_unknown_fields)]
pub enum Truncation {
    /// fail with `Error::Truncated`
    #[strum(serialize = "reject")]
    Reject,
    /// drop the incomplete record
    #[strum(serialize = "discard")]
    Discard,
}

impl Default for Truncation {
    fn default() -> Self {
        Truncation::Reject
    }
}

/// One benchmark observation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultRecord {
    pub nodes: u64,
    pub init_discovery: f64,
    pub additional_discovery: f64,
}

impl ResultRecord {
    /// Parses one record from its lines. `first_line` is the 1-based line
    /// number of `lines[0]`.
    fn parse<S: AsRef<str>>(first_line: usize, lines: &[S]) -> Result<Self, Error> {
        Ok(Self {
            nodes: Slot::NodeCount.integer(first_line, lines[0].as_ref())?,
            init_discovery: Slot::InitDiscovery.seconds(first_line + 1, lines[1].as_ref())?,
            additional_discovery: Slot::AdditionalDiscovery
                .seconds(first_line + 2, lines[2].as_ref())?,
        })
    }
}

/// Records in the order they appear in the log
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Results {
    records: Vec<ResultRecord>,
}

impl Results {
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn nodes(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.nodes).collect()
    }

    pub fn init_discovery(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.init_discovery).collect()
    }

    pub fn additional_discovery(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.additional_discovery).collect()
    }

    /// Splits the records into the parallel `(nodes, init_discovery,
    /// additional_discovery)` sequences
    pub fn into_columns(self) -> (Vec<u64>, Vec<f64>, Vec<f64>) {
        let mut nodes = Vec::with_capacity(self.records.len());
        let mut init = Vec::with_capacity(self.records.len());
        let mut additional = Vec::with_capacity(self.records.len());
        for record in self.records {
            nodes.push(record.nodes);
            init.push(record.init_discovery);
            additional.push(record.additional_discovery);
        }
        (nodes, init, additional)
    }
}

/// Reads `Results` from line oriented sources
#[derive(Clone, Copy, Debug, Default)]
pub struct Extractor {
    truncation: Truncation,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Results, Error> {
        let file = File::open(path.as_ref())?;
        debug!("reading results from: {}", path.as_ref().display());
        self.extract(BufReader::new(file))
    }

    pub fn extract<R: BufRead>(&self, reader: R) -> Result<Results, Error> {
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        self.extract_lines(lines)
    }

    /// Extracts records from an in-memory sequence of lines. The line count
    /// is checked before any line is parsed.
    pub fn extract_lines<I, S>(&self, lines: I) -> Result<Results, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();

        let partial = lines.len() % RECORD_WIDTH;
        if partial != 0 {
            match self.truncation {
                Truncation::Reject => {
                    return Err(Error::Truncated { lines: lines.len() });
                }
                Truncation::Discard => {
                    warn!(
                        "discarding incomplete record: {} trailing line(s) after line {}",
                        partial,
                        lines.len() - partial
                    );
                }
            }
        }
        let complete = &lines[..lines.len() - partial];

        let mut records = Vec::with_capacity(complete.len() / RECORD_WIDTH);
        for (i, group) in complete.chunks(RECORD_WIDTH).enumerate() {
            let record = ResultRecord::parse(i * RECORD_WIDTH + 1, group)?;
            trace!("record {}: {:?}", i, record);
            records.push(record);
        }

        debug!("extracted {} record(s)", records.len());
        Ok(Results { records })
    }
}

/// Extracts results from a reader, rejecting truncated input
pub fn extract<R: BufRead>(reader: R) -> Result<Results, Error> {
    Extractor::new().extract(reader)
}

/// Extracts results from in-memory lines, rejecting truncated input
pub fn extract_lines<I, S>(lines: I) -> Result<Results, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Extractor::new().extract_lines(lines)
}

/// Extracts results from the file at `path`, rejecting truncated input
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Results, Error> {
    Extractor::new().extract_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "10 a b c
x x x 1.5s, y y z
x x x x x x x 2.75s,
20 a b c
x x x 3.0s, y y z
x x x x x x x 4.25s,
";

    #[test]
    fn scenario() {
        let results = extract(SCENARIO.as_bytes()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.nodes(), vec![10, 20]);
        assert_eq!(results.init_discovery(), vec![1.5, 3.0]);
        assert_eq!(results.additional_discovery(), vec![2.75, 4.25]);
    }

    #[test]
    fn nodeperf_output() {
        let lines = vec![
            "3 nodes",
            "Mean discovery time: 1.002341s, variance: 0.000112s",
            "After adding 2 nodes: Mean discovery time: 2.5s, variance: 0.01s",
        ];
        let results = extract_lines(lines).unwrap();
        assert_eq!(
            results.records(),
            &[ResultRecord {
                nodes: 3,
                init_discovery: 1.002341,
                additional_discovery: 2.5,
            }]
        );
    }

    #[test]
    fn empty() {
        let results = extract("".as_bytes()).unwrap();
        assert!(results.is_empty());
        let (nodes, init, additional) = results.into_columns();
        assert!(nodes.is_empty());
        assert!(init.is_empty());
        assert!(additional.is_empty());
    }

    #[test]
    fn record_count() {
        for k in 0..8 {
            let mut lines = Vec::new();
            for i in 0..k {
                lines.push(format!("{}", i));
                lines.push(format!("a b c {}s,", i));
                lines.push(format!("a b c d e f g {}s,", i));
            }
            let (nodes, init, additional) = extract_lines(lines).unwrap().into_columns();
            assert_eq!(nodes.len(), k);
            assert_eq!(init.len(), k);
            assert_eq!(additional.len(), k);
        }
    }

    #[test]
    fn order_preserved() {
        let lines = vec![
            "30", "a b c 9s", "a b c d e f g 1s",
            "10", "a b c 3s", "a b c d e f g 2s",
            "20", "a b c 6s", "a b c d e f g 3s",
        ];
        let results = extract_lines(lines).unwrap();
        assert_eq!(results.nodes(), vec![30, 10, 20]);
        assert_eq!(results.init_discovery(), vec![9.0, 3.0, 6.0]);
        assert_eq!(results.additional_discovery(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn truncated_rejected() {
        let lines: Vec<&str> = SCENARIO.lines().take(4).collect();
        match extract_lines(lines) {
            Err(Error::Truncated { lines }) => assert_eq!(lines, 4),
            other => panic!("unexpected: {:?}", other),
        }

        let lines: Vec<&str> = SCENARIO.lines().take(5).collect();
        assert!(matches!(
            extract_lines(lines),
            Err(Error::Truncated { lines: 5 })
        ));
    }

    #[test]
    fn truncated_before_parse() {
        // a bad value in a complete record is not reported when the line
        // count is already wrong
        let lines = vec!["ten", "a b c 1s", "a b c d e f g 1s", "20"];
        assert!(matches!(
            extract_lines(lines),
            Err(Error::Truncated { lines: 4 })
        ));
    }

    #[test]
    fn truncated_discarded() {
        let extractor = Extractor::new().truncation(Truncation::Discard);
        let lines: Vec<&str> = SCENARIO.lines().take(5).collect();
        let results = extractor.extract_lines(lines).unwrap();
        assert_eq!(results.nodes(), vec![10]);
        assert_eq!(results.init_discovery(), vec![1.5]);
        assert_eq!(results.additional_discovery(), vec![2.75]);
    }

    #[test]
    fn line_numbers() {
        let lines = vec![
            "10", "a b c 1s", "a b c d e f g 1s",
            "20", "a b c", "a b c d e f g 1s",
        ];
        match extract_lines(lines) {
            Err(Error::MissingField { line, slot, .. }) => {
                assert_eq!(line, 5);
                assert_eq!(slot, Slot::InitDiscovery);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let lines = vec![
            "10", "a b c 1s", "a b c d e f g 1s",
            "20", "a b c 1s", "a b c d e f g soon",
        ];
        match extract_lines(lines) {
            Err(Error::InvalidNumber { line, slot, token }) => {
                assert_eq!(line, 6);
                assert_eq!(slot, Slot::AdditionalDiscovery);
                assert_eq!(token, "soon");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn truncation_names() {
        assert_eq!("reject".parse::<Truncation>().unwrap(), Truncation::Reject);
        assert_eq!("discard".parse::<Truncation>().unwrap(), Truncation::Discard);
        assert!("drop".parse::<Truncation>().is_err());
        assert_eq!(Truncation::Discard.to_string(), "discard");
    }
}
