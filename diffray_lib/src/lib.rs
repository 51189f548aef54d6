pub mod collection_rules;
pub mod collector_layout;
pub mod constants;
pub mod diffusion;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ray_source;
pub mod reflection;
pub mod simulator;
pub mod tracker;

pub use glam::Vec3;

pub use collection_rules::CollectionRule;
pub use collector_layout::{CollectorLayout, LayoutKind};
pub use diffusion::DiffusionResult;
pub use error::{Error, Result};
pub use geometry::{Ray, RayHitData};
pub use mesh::Mesh;
pub use ray_source::RaySource;
pub use reflection::ReflectionEngine;
pub use simulator::{run_all, run_all_with, SimulationConfig, SimulationReport, Simulator};
pub use tracker::{CollectorsTracker, NoopTracker, PositionTracker};

pub type Point3 = Vec3;
pub type Float = f32;
