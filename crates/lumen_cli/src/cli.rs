use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::RenderSettings;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Ray trace a scene of spheres, planes and meshes to a PNG")]
pub struct Args {
    /// Scene description (JSON). Renders the built-in demo scene when omitted.
    pub scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "raytraced.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Ambient light level (0-1)
    #[arg(long)]
    pub ambient: Option<f32>,

    /// Divisor applied to every light's intensity
    #[arg(long)]
    pub falloff: Option<f32>,

    /// Blinn-Phong specular exponent
    #[arg(long)]
    pub phong_power: Option<f32>,

    /// Hide the named object before rendering (repeatable)
    #[arg(long = "hide", value_name = "NAME")]
    pub hidden: Vec<String>,

    /// Render on the calling thread only
    #[arg(long, conflicts_with = "bucket_size")]
    pub serial: bool,

    /// Render in square tiles of this size instead of by rows
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of the scene's settings.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(ambient) = self.ambient {
            settings.ambient_strength = ambient;
        }
        if let Some(falloff) = self.falloff {
            settings.light_falloff = falloff;
        }
        if let Some(power) = self.phong_power {
            settings.phong_power = power;
        }
    }
}
