use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cardtone::cli::{Args, Command};
use cardtone::color::{contrast_color, Color};
use cardtone::pipeline::extract_palette;
use cardtone::pipeline::sample::ImageSource;
use cardtone::pipeline::shades::TonalRamp;
use cardtone::scheme::ColorScheme;
use cardtone::tui::{self, PickerApp};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Extract {
            source,
            json,
            preview,
            tui: interactive,
            role,
        } => {
            let source = ImageSource::parse(&source);
            info!(source = %source.describe(), "extracting palette");
            let result = extract_palette(&source).await;

            if interactive {
                let mut scheme = ColorScheme::default();
                scheme.apply_extraction(&result);
                let scheme = tui::run(PickerApp::new(scheme, role))?;
                serde_json::to_writer_pretty(&mut out, &scheme)
                    .context("failed to write scheme")?;
                writeln!(out)?;
                return Ok(());
            }

            if json {
                serde_json::to_writer_pretty(&mut out, &result)
                    .context("failed to write result")?;
                writeln!(out)?;
            } else {
                writeln!(out, "primary = {}", result.primary)?;
                writeln!(out, "accent = {}", result.accent)?;
                for c in &result.palette {
                    writeln!(out, "palette = {c}")?;
                }
            }

            if preview {
                tui::print_preview(&mut out, &result.palette)?;
            }
        }
        Command::Shades { hex, preview } => {
            let base = Color::from_hex(&hex).context("invalid color argument")?;
            let ramp = TonalRamp::new(base);
            if preview {
                tui::print_preview(&mut out, ramp.as_slice())?;
            } else {
                for c in ramp.iter() {
                    writeln!(out, "{c}")?;
                }
            }
        }
        Command::Contrast { hex } => {
            let color = Color::from_hex(&hex).context("invalid color argument")?;
            writeln!(out, "{}", contrast_color(&color.to_hex()))?;
        }
    }

    Ok(())
}
