//! Error types for galaxy-bg.
//!
//! A missing GPU is not represented here: the capability probe reports it as
//! [`MountState::Unsupported`](crate::background::MountState::Unsupported),
//! which is an expected runtime state rather than a failure.

use std::fmt;

/// Invalid galaxy or camera parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A spiral galaxy needs at least one arm.
    ZeroBranches,
    /// Field must be strictly greater than zero.
    NotPositive { field: &'static str, value: f32 },
    /// Field must be zero or greater.
    Negative { field: &'static str, value: f32 },
    /// Field is NaN or infinite.
    NotFinite { field: &'static str },
    /// Colour component outside of [0, 1].
    ColorOutOfRange { value: f32 },
    /// Colour string is not `#rrggbb`.
    InvalidHex(String),
    /// Camera zoom limits are inverted.
    CameraRange { min: f32, max: f32 },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::ZeroBranches => write!(f, "branch count must be at least 1"),
            ParamError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            ParamError::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            ParamError::NotFinite { field } => write!(f, "{} must be a finite number", field),
            ParamError::ColorOutOfRange { value } => {
                write!(f, "colour component {} is outside of [0, 1]", value)
            }
            ParamError::InvalidHex(s) => write!(f, "invalid colour '{}', expected #rrggbb", s),
            ParamError::CameraRange { min, max } => write!(
                f,
                "camera min_distance ({}) must not exceed max_distance ({})",
                min, max
            ),
        }
    }
}

impl std::error::Error for ParamError {}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    Io(std::io::Error),
    /// File is not valid JSON for a [`GalaxyConfig`](crate::config::GalaxyConfig).
    Parse(serde_json::Error),
    /// File parsed but holds values the generator cannot use.
    Invalid(ParamError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Errors that can occur while setting up the GPU after the probe ran.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// A scene was requested from a host whose probe never succeeded.
    NoContext,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoContext => write!(f, "Scene requested without a GPU context"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors from mounting the background or changing its parameters.
#[derive(Debug)]
pub enum BackgroundError {
    /// Parameters were rejected before anything was generated.
    Invalid(ParamError),
    /// Scene construction failed after a successful capability probe.
    Gpu(GpuError),
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::Invalid(e) => write!(f, "Invalid galaxy parameters: {}", e),
            BackgroundError::Gpu(e) => write!(f, "Failed to build galaxy scene: {}", e),
        }
    }
}

impl std::error::Error for BackgroundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackgroundError::Invalid(e) => Some(e),
            BackgroundError::Gpu(e) => Some(e),
        }
    }
}

impl From<ParamError> for BackgroundError {
    fn from(e: ParamError) -> Self {
        BackgroundError::Invalid(e)
    }
}

impl From<GpuError> for BackgroundError {
    fn from(e: GpuError) -> Self {
        BackgroundError::Gpu(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Scene construction failed after a successful capability probe.
    Gpu(GpuError),
    /// Configuration rejected before start-up.
    Config(ParamError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

impl From<ParamError> for RunError {
    fn from(e: ParamError) -> Self {
        RunError::Config(e)
    }
}

impl From<BackgroundError> for RunError {
    fn from(e: BackgroundError) -> Self {
        match e {
            BackgroundError::Invalid(e) => RunError::Config(e),
            BackgroundError::Gpu(e) => RunError::Gpu(e),
        }
    }
}
