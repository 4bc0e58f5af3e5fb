use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::tracker::layout::Layout;

lazy_static! {
    static ref LENGTH_REGEX: Regex =
        Regex::new(r"^\s*(-?(?:\d+\.?\d*|\.\d+))\s*(px|rem|em|vh|vw|pt|%)?\s*$").unwrap();
}

/// Style that keeps the probe out of sight and out of the flow
const PROBE_STYLE: &str = "position:absolute;visibility:hidden;pointer-events:none;margin:0;padding:0;border:0";

/// Scroll offset tolerance: a pixel count or any CSS length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Margin {
    Pixels(f64),
    Length(String),
}

impl Default for Margin {
    fn default() -> Self {
        Margin::Pixels(0.0)
    }
}

impl Margin {
    /// Resolve to pixels. Lengths are measured once with a hidden probe in the body.
    pub fn resolve(&self, doc: &mut Document, layout: &dyn Layout) -> f64 {
        match self {
            Margin::Pixels(px) => *px,
            Margin::Length(length) => {
                let probe = doc.create_element("div");
                doc.set_attribute(probe, "style", &format!("{};height:{}", PROBE_STYLE, length));
                if let Err(e) = doc.append_child(doc.body(), probe) {
                    warn!("Could not insert margin probe: {}", e);
                    return 0.0;
                }

                let height = layout.bounding_rect(doc, probe).height;
                doc.detach(probe);

                match accept_measurement(length, height) {
                    Some(px) => {
                        debug!("Resolved margin '{}' to {}px", length, px);
                        px
                    }
                    None => {
                        warn!("Margin '{}' did not resolve to a length, using 0", length);
                        0.0
                    }
                }
            }
        }
    }
}

/// A probe height counts unless it is not finite, or it is zero for a length
/// that does not itself parse as zero.
fn accept_measurement(length: &str, height: f64) -> Option<f64> {
    if !height.is_finite() {
        return None;
    }
    if height == 0.0 && parse_length(length, &LengthContext::default()) != Some(0.0) {
        return None;
    }
    Some(height)
}

/// Reference sizes for relative CSS units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    pub font_size: f64,
    pub root_font_size: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for LengthContext {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            root_font_size: 16.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

/// Convert a CSS length to pixels. Percentages are taken against the viewport height.
pub fn parse_length(value: &str, context: &LengthContext) -> Option<f64> {
    let caps = LENGTH_REGEX.captures(value)?;
    let number: f64 = caps[1].parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("px");

    let px = match unit {
        "px" => number,
        "rem" => number * context.root_font_size,
        "em" => number * context.font_size,
        "vh" | "%" => number * context.viewport_height / 100.0,
        "vw" => number * context.viewport_width / 100.0,
        "pt" => number * 96.0 / 72.0,
        _ => return None,
    };
    Some(px)
}
