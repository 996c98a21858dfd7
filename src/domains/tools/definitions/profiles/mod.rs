//! Tools answered in-process from static profile and pattern tables.

pub mod agent;
pub mod common;
pub mod patterns;

pub use agent::{AgentDefinition, AgentProfile, CreateAgentParams, CreateAgentTool};
pub use common::Resolution;
pub use patterns::{ActivatePatternsParams, ActivatePatternsTool, Intensity, PatternActivation};
