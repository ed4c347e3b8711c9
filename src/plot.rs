// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::results::Results;
use crate::Error;

use plotters::prelude::*;
use strum_macros::{Display, EnumIter};

use std::ops::Range;
use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

pub const COLOURS: &[RGBColor] = &[hexcolour!(0xAA0000), hexcolour!(0x0000FF)];

const X_DESC: &str = "nodes";
const Y_DESC: &str = "seconds";

/// The latency series that get their own chart
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq, Hash)]
pub enum Series {
    #[strum(serialize = "init")]
    Init,
    #[strum(serialize = "additional")]
    Additional,
}

impl Series {
    /// Default output file name
    pub fn filename(self) -> String {
        format!("{}.svg", self)
    }

    pub fn colour(self) -> RGBColor {
        match self {
            Series::Init => COLOURS[0],
            Series::Additional => COLOURS[1],
        }
    }

    /// Pairs each node count with this series' latency
    pub fn points(self, results: &Results) -> Vec<(u64, f64)> {
        results
            .records()
            .iter()
            .map(|r| match self {
                Series::Init => (r.nodes, r.init_discovery),
                Series::Additional => (r.nodes, r.additional_discovery),
            })
            .collect()
    }
}

/// Renders a nodes/seconds line series to an SVG file
#[derive(Clone, Debug)]
pub struct Chart {
    caption: Option<String>,
    size: (u32, u32),
    colour: RGBColor,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            caption: None,
            size: (1024, 768),
            colour: COLOURS[0],
        }
    }

    pub fn caption(&mut self, caption: impl AsRef<str>) -> &mut Self {
        self.caption = Some(caption.as_ref().to_owned());
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    pub fn colour(&mut self, colour: RGBColor) -> &mut Self {
        self.colour = colour;
        self
    }

    /// Draws a single line through `points` in the order given
    pub fn plot(&self, path: &Path, points: &[(u64, f64)]) -> Result<(), Error> {
        self.draw(path, points).map_err(|e| Error::Render {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        debug!("plotted {} point(s) to: {}", points.len(), path.display());
        Ok(())
    }

    fn draw(
        &self,
        path: &Path,
        points: &[(u64, f64)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40);
        if let Some(caption) = &self.caption {
            builder.caption(caption, ("sans-serif", 30));
        }

        let mut chart = builder.build_cartesian_2d(x_range(points), y_range(points))?;

        chart
            .configure_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            self.colour.stroke_width(2),
        ))?;

        root.present()?;

        Ok(())
    }
}

/// Node count axis, widened by one on each side when all points share an x
fn x_range(points: &[(u64, f64)]) -> Range<u64> {
    let min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let max = points.iter().map(|p| p.0).max().unwrap_or(1);
    if min == max {
        min.saturating_sub(1)..max.saturating_add(1)
    } else {
        min..max
    }
}

/// Latency axis, anchored at zero unless the data goes negative
fn y_range(points: &[(u64, f64)]) -> Range<f64> {
    let finite = points.iter().map(|p| p.1).filter(|y| y.is_finite());
    let (min, max) = finite.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if max - min > 0.0 {
        min..max * 1.1
    } else {
        min..min + 1.0
    }
}
