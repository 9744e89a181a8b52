//! # Core Module
//!
//! Shared configuration for every subsystem of the body renderer.

pub mod config;

pub use config::{
    BodyConfig,
    EngineConfig,
    CameraConfig,
    LightingConfig,
    PointLightConfig,
    GeometryConfig,
    LimbConfig,
    RendererConfig,
    TorsoPolicy,
    HandednessPolicy,
};
pub use crate::config::{Config, ConfigError};
