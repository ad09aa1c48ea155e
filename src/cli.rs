use clap::{Parser, Subcommand};

use crate::scheme::ColorRole;

/// Extract card color palettes from logos and other images.
#[derive(Parser, Debug)]
#[command(name = "cardtone", version, about)]
pub struct Args {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract primary, accent and palette from an image path or http(s) URL
    Extract {
        /// Image file path or URL
        source: String,

        /// Print the result as JSON
        #[arg(long, conflicts_with = "tui")]
        json: bool,

        /// Print colored swatch rows of the palette
        #[arg(long)]
        preview: bool,

        /// Open the interactive shade picker seeded with the extraction
        #[arg(long)]
        tui: bool,

        /// Role selected when the picker opens
        #[arg(long, value_enum, default_value_t = ColorRole::Primary)]
        role: ColorRole,
    },

    /// Print the 15-step tint/base/shade ramp of a color
    Shades {
        /// Color as #RRGGBB or RRGGBB
        hex: String,

        /// Print colored swatches instead of plain hex
        #[arg(long)]
        preview: bool,
    },

    /// Print the text color (#000000 or #FFFFFF) readable on a color
    Contrast {
        /// Color as #RRGGBB or RRGGBB
        hex: String,
    },
}
