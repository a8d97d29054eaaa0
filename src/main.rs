use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

use thumbnail_compositor::{
    composition::{render_preview, Compositor},
    config::Config,
    layers::{write_png_atomic, SourcePaths},
    layout::{LayoutParameters, SLIDERS},
    CompositorError,
};

#[derive(Parser)]
#[command(
    name = "thumbnail-compositor",
    version,
    about = "Compose YouTube thumbnails from layered images",
    long_about = "Thumbnail-Compositor stacks a background, a framed center image, a logo and a title banner into a single PNG thumbnail."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full-size thumbnail
    Render(RenderArgs),

    /// Render the scaled-down preview surface
    Preview(RenderArgs),

    /// Write the default configuration to a TOML file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },

    /// List the layout controls with their ranges and defaults
    Sliders,
}

#[derive(Args)]
struct RenderArgs {
    /// Background image
    #[arg(short, long)]
    background: PathBuf,

    /// Image placed inside the margin
    #[arg(short = 'C', long)]
    center: PathBuf,

    /// Logo image
    #[arg(short, long)]
    logo: PathBuf,

    /// Title banner image
    #[arg(short = 'B', long)]
    banner: PathBuf,

    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,
}

/// Per-render overrides of the configured layout
#[derive(Args)]
struct LayoutArgs {
    /// Banner width, percent of the background width (10-100)
    #[arg(long)]
    banner_size: Option<i32>,

    /// Logo horizontal position (0-100)
    #[arg(long)]
    logo_position: Option<i32>,

    /// Logo vertical offset in pixels (-100-300)
    #[arg(long, allow_negative_numbers = true)]
    logo_y: Option<i32>,

    /// Banner vertical offset in pixels (-100-300)
    #[arg(long, allow_negative_numbers = true)]
    banner_y: Option<i32>,

    /// Logo size, percent (10-200)
    #[arg(long)]
    logo_size: Option<i32>,

    /// Logo rotation in degrees, counter-clockwise (-180-180)
    #[arg(long, allow_negative_numbers = true)]
    logo_rotation: Option<i32>,

    /// Logo opacity, percent (0-100)
    #[arg(long)]
    logo_opacity: Option<i32>,
}

impl LayoutArgs {
    fn apply(&self, base: LayoutParameters) -> Result<LayoutParameters, CompositorError> {
        let overrides = [
            ("banner_size", self.banner_size),
            ("logo_position", self.logo_position),
            ("logo_y", self.logo_y),
            ("banner_y", self.banner_y),
            ("logo_size", self.logo_size),
            ("logo_rotation", self.logo_rotation),
            ("logo_opacity", self.logo_opacity),
        ];

        let mut params = base;
        for (key, value) in overrides {
            if let Some(value) = value {
                params = params.with(key, value)?;
            }
        }
        params.validate()?;
        Ok(params)
    }
}

impl RenderArgs {
    fn sources(&self) -> SourcePaths {
        SourcePaths {
            background: self.background.clone(),
            center: self.center.clone(),
            logo: self.logo.clone(),
            banner: self.banner.clone(),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, CompositorError> {
    let config = match path {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn run(command: Command) -> Result<(), CompositorError> {
    match command {
        Command::Render(args) => {
            let config = load_config(args.config.as_ref())?;
            let params = args.layout.apply(config.layout)?;
            info!("Layout: {:?}", params);

            let compositor = Compositor::new(config.render);
            let report = compositor.render(&args.sources(), &params, &args.output)?;

            info!(
                "Done! Logo at ({}, {}), banner at ({}, {}), saved to {:?}",
                report.layout.logo.x,
                report.layout.logo.y,
                report.layout.banner.x,
                report.layout.banner.y,
                report.output
            );
        }
        Command::Preview(args) => {
            let config = load_config(args.config.as_ref())?;
            let params = args.layout.apply(config.layout)?;

            let compositor = Compositor::new(config.render);
            let preview = render_preview(&compositor, &args.sources(), &params, &config.preview)?;
            write_png_atomic(&args.output, &preview.image)?;

            info!(
                "Preview {}x{} saved to {:?}",
                preview.image.width(),
                preview.image.height(),
                args.output
            );
        }
        Command::InitConfig { path } => {
            Config::default().save_to_file(&path)?;
            info!("Default configuration written to {:?}", path);
        }
        Command::Sliders => {
            for slider in SLIDERS {
                println!(
                    "{:<15} {:<28} {:>5} ..= {:<5} default {}",
                    slider.key, slider.label, slider.min, slider.max, slider.default
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Thumbnail-Compositor v{}", env!("CARGO_PKG_VERSION"));

    run(cli.command).map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_offsets_parse() {
        let cli = Cli::try_parse_from([
            "thumbnail-compositor",
            "render",
            "-b", "bg.png",
            "-C", "center.png",
            "-l", "logo.png",
            "-B", "banner.png",
            "-o", "out.png",
            "--logo-y", "-40",
            "--logo-rotation", "-90",
        ])
        .unwrap();

        let Command::Render(args) = cli.command else {
            panic!("expected render subcommand");
        };
        let params = args.layout.apply(LayoutParameters::default()).unwrap();
        assert_eq!(params.logo_y, -40);
        assert_eq!(params.logo_rotation, -90);
        assert_eq!(params.banner_size, 80);
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let args = LayoutArgs {
            banner_size: None,
            logo_position: None,
            logo_y: None,
            banner_y: None,
            logo_size: Some(500),
            logo_rotation: None,
            logo_opacity: None,
        };
        assert!(args.apply(LayoutParameters::default()).is_err());
    }
}
