// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;

use strum_macros::Display;

/// Number of lines that make up one record
pub const RECORD_WIDTH: usize = 3;

/// The position a line occupies within its record. Each slot holds exactly
/// one value, found at a fixed field index when the line is split on single
/// spaces.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum Slot {
    /// `<nodes> ...`
    #[strum(serialize = "node count")]
    NodeCount,
    /// `Mean discovery time: 1.5s, variance: 0.2s`
    #[strum(serialize = "initial discovery")]
    InitDiscovery,
    /// `After adding 5 nodes: Mean discovery time: 2.75s, variance: 0.1s`
    #[strum(serialize = "additional discovery")]
    AdditionalDiscovery,
}

impl Slot {
    /// Index of the field holding this slot's value
    pub fn index(self) -> usize {
        match self {
            Slot::NodeCount => 0,
            Slot::InitDiscovery => 3,
            Slot::AdditionalDiscovery => 7,
        }
    }

    /// Returns this slot's field from `text`. `line` is the 1-based line
    /// number, used for error reporting only.
    pub fn field(self, line: usize, text: &str) -> Result<&str, Error> {
        let text = text.strip_suffix('\r').unwrap_or(text);
        text.split(' ')
            .nth(self.index())
            .ok_or_else(|| Error::MissingField {
                line,
                slot: self,
                index: self.index(),
                found: text.split(' ').count(),
            })
    }

    pub fn integer(self, line: usize, text: &str) -> Result<u64, Error> {
        let token = self.field(line, text)?;
        token.parse().map_err(|_| self.invalid(line, token))
    }

    /// Parses a duration in seconds, ignoring any trailing `s` and `,`.
    /// `NaN` and infinities are not durations and are rejected.
    pub fn seconds(self, line: usize, text: &str) -> Result<f64, Error> {
        let token = self.field(line, text)?;
        token
            .trim_end_matches(|c: char| c == 's' || c == ',')
            .parse::<f64>()
            .ok()
            .filter(|seconds| seconds.is_finite())
            .ok_or_else(|| self.invalid(line, token))
    }

    fn invalid(self, line: usize, token: &str) -> Error {
        Error::InvalidNumber {
            line,
            slot: self,
            token: token.to_owned(),
        }
    }
}
