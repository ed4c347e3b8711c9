// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::*;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chart {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    caption: Option<String>,
    #[serde(default = "default_init")]
    init: String,
    #[serde(default = "default_additional")]
    additional: String,
}

impl Default for Chart {
    fn default() -> Chart {
        Chart {
            width: default_width(),
            height: default_height(),
            caption: None,
            init: default_init(),
            additional: default_additional(),
        }
    }
}

impl Chart {
    /// check values that deserialize but cannot be rendered
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "chart size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }

    /// image size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// file name of the chart for `series`, relative to the output directory
    pub fn filename(&self, series: Series) -> &str {
        match series {
            Series::Init => &self.init,
            Series::Additional => &self.additional,
        }
    }
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

fn default_init() -> String {
    Series::Init.filename()
}

fn default_additional() -> String {
    Series::Additional.filename()
}
