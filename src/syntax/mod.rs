//! JSON-LD syntax layer: vocabulary, normalisation and typed node views.

pub mod jsonld;
pub mod types;

pub use jsonld::normalize_array;
pub use types::{
    ComponentId, ComponentNode, ConditionNode, ConditionResolver, LevelNode, ModelNode,
    PathwayNode, SyntheticLevel,
};
