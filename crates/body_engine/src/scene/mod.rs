//! # Body Scene
//!
//! Scene storage, the labelled body parts, the geometry factory for the head
//! and torso, and the registry that maps part labels to live scene nodes.

pub mod scene_graph;
pub mod renderable_object;
pub mod part;
pub mod geometry;
pub mod registry;

pub use scene_graph::{NodeKey, Scene};
pub use renderable_object::{NodeKind, SceneNode, Shape, StaticMesh};
pub use part::BodyPart;
pub use geometry::{GeometryError, TorsoShape};
pub use registry::{ComponentRegistry, PartParams, Resolution};
