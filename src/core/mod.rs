//! Platform-agnostic core module - shared between the egui app and the CLI

pub mod camera;
pub mod chain;
pub mod config;
pub mod generator;
pub mod noise;
pub mod projector;
pub mod renderer;
pub mod world;

pub use camera::{find_guide, Viewpoint};
pub use chain::{Ring, RingChain};
pub use config::{ConfigError, TunnelConfig, CONFIG_ENV};
pub use generator::{next_ring, GrowOutcome, Generator};
pub use noise::{NoiseField, ValueNoise};
pub use projector::{project, Point2, ProjectedRing, MIN_DEPTH};
pub use renderer::{render_chain, Quad, QuadList, QuadSink, RenderStats, Rgba};
pub use world::{InvariantViolation, TickReport, Viewport, World, WorldStats};
