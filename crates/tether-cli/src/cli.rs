use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tether_config::PlacementOverrides;
use tether_core::{Align, Component, Placement, Rect, Size};
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Lifecycle transitions and anchor loss
    Debug,
    /// Per-resolve flip and clamp decisions
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per result
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "tether - position floating panels against an anchor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/tether/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` wins over `--verbose`; the default is off.
    pub fn log_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::OFF,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one panel position from explicit geometry
    Resolve(ResolveArgs),

    /// List the effective component presets
    Presets {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Anchor rect in viewport coordinates as X,Y,W,H
    #[arg(
        long,
        value_parser = parse_rect,
        allow_hyphen_values = true,
        required_unless_present = "point",
        conflicts_with = "point"
    )]
    pub anchor: Option<Rect>,

    /// Pointer location X,Y to anchor a zero-size rect at (context menus)
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pub point: Option<(f64, f64)>,

    /// Measured panel size as WxH (0x0 when not yet rendered)
    #[arg(long, value_parser = parse_size)]
    pub content: Size,

    /// Viewport size as WxH
    #[arg(long, value_parser = parse_size)]
    pub viewport: Size,

    /// Document scroll offsets as X,Y
    #[arg(long, value_parser = parse_pair)]
    pub scroll: Option<(f64, f64)>,

    /// Start from a component preset instead of the engine defaults
    #[arg(short = 'p', long)]
    pub preset: Option<Component>,

    /// Preferred side of the anchor
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Cross-axis alignment
    #[arg(long)]
    pub align: Option<Align>,

    /// Main-axis gap between anchor and panel
    #[arg(long)]
    pub offset: Option<f64>,

    /// Extra cross-axis shift after alignment
    #[arg(long, allow_hyphen_values = true)]
    pub align_offset: Option<f64>,

    /// Force the panel width to the anchor width
    #[arg(long)]
    pub match_width: bool,

    /// Never mirror to the opposite side
    #[arg(long)]
    pub no_flip: bool,

    /// Skip viewport clamping
    #[arg(long)]
    pub no_avoid_edges: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ResolveArgs {
    pub fn anchor_rect(&self) -> Rect {
        match (self.anchor, self.point) {
            (Some(anchor), _) => anchor,
            (None, Some((x, y))) => Rect::point(x, y),
            (None, None) => Rect::ZERO,
        }
    }

    /// Flags given on the command line, layered over the preset.
    pub fn overrides(&self) -> PlacementOverrides {
        PlacementOverrides {
            placement: self.placement,
            align: self.align,
            offset: self.offset,
            align_offset: self.align_offset,
            flip: self.no_flip.then_some(false),
            avoid_edges: self.no_avoid_edges.then_some(false),
            match_width: self.match_width.then_some(true),
            edge_padding: None,
        }
    }
}

fn parse_numbers<const N: usize>(s: &str, sep: char) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} values separated by '{sep}', got '{s}'"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        let value: f64 = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if !value.is_finite() {
            return Err(format!("'{part}' is not a finite number"));
        }
        *slot = value;
    }
    Ok(out)
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_numbers::<4>(s, ',')?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("rect size must not be negative, got '{s}'"));
    }
    Ok(Rect::new(y, x, width, height))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let [width, height] = parse_numbers::<2>(&s.to_ascii_lowercase(), 'x')?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("size must not be negative, got '{s}'"));
    }
    Ok(Size::new(width, height))
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let [x, y] = parse_numbers::<2>(s, ',')?;
    Ok((x, y))
}
