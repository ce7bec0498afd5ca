//! CLI definitions for kodegen-segment.

use clap::{Parser, ValueEnum};

use kodegen_tools_segmenter::segmenter::BandOverflow;
use kodegen_tools_segmenter::utils::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Segment a live page and print its bands as JSON.
#[derive(Parser, Debug)]
#[command(name = "kodegen-segment")]
#[command(about = "Labeled, band-partitioned regions of a rendered page")]
#[command(version)]
pub(crate) struct Cli {
    /// Page to load
    pub url: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels; also the band height
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: u32,

    /// Placement of regions below the open band
    #[arg(long, value_enum, default_value_t = Overflow::Reassign)]
    pub overflow: Overflow,

    /// Re-query each region at its center point
    #[arg(long)]
    pub refine: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Overflow {
    /// Place every region in the band holding its top edge
    Reassign,
    /// Discard the region that closes a band
    Drop,
}

impl From<Overflow> for BandOverflow {
    fn from(value: Overflow) -> Self {
        match value {
            Overflow::Reassign => BandOverflow::Reassign,
            Overflow::Drop => BandOverflow::Drop,
        }
    }
}
