//! Specialized agent creation tool definition.
//!
//! Answered entirely in-process from a static table of agent profiles. The
//! table is `'static` borrowed data; each call builds its own owned
//! [`AgentDefinition`] and customizes that, so one caller's extra
//! capabilities can never show up in another caller's result.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::common::{Resolution, dedup_preserving_order, split_list};
use crate::domains::tools::arguments::{object_schema, optional_text, parse_arguments, require_text};
use crate::domains::tools::error::ToolResult;

const NO_CONTEXT: &str = "No specific context provided";

// ============================================================================
// Static Agent Profiles
// ============================================================================

/// A predefined agent profile.
#[derive(Debug, PartialEq, Eq)]
pub struct AgentProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
    pub tools: &'static [&'static str],
}

/// Baseline profile for agent types that are not in [`AGENT_PROFILES`].
pub static GENERAL_PROFILE: AgentProfile = AgentProfile {
    key: "general",
    name: "General Development Agent",
    description: "Generalist for everyday development work across languages and stacks",
    capabilities: &["code-review", "debugging", "testing", "documentation"],
    tools: &["filesystem", "git"],
};

pub static AGENT_PROFILES: &[AgentProfile] = &[
    AgentProfile {
        key: "nodejs",
        name: "NodeJS Specialist",
        description: "Expert in Node.js development, npm packages, and backend APIs",
        capabilities: &["express", "fastify", "testing", "deployment", "security"],
        tools: &["filesystem", "git", "puppeteer", "docker"],
    },
    AgentProfile {
        key: "python",
        name: "Python Expert",
        description: "Specialist in Python development, Django, FastAPI, and data science",
        capabilities: &["django", "fastapi", "pandas", "testing", "ml"],
        tools: &["filesystem", "git", "postgres", "memory"],
    },
    AgentProfile {
        key: "react",
        name: "React/Frontend Specialist",
        description: "Expert in React, TypeScript, modern frontend development",
        capabilities: &["react", "typescript", "testing", "performance", "ui/ux"],
        tools: &["filesystem", "git", "puppeteer", "browser"],
    },
    AgentProfile {
        key: "devops",
        name: "DevOps Engineer",
        description: "Infrastructure, containerization, and deployment specialist",
        capabilities: &["docker", "kubernetes", "ci/cd", "monitoring", "security"],
        tools: &["filesystem", "git", "docker", "kubernetes"],
    },
    AgentProfile {
        key: "security",
        name: "Security Auditor",
        description: "Security analysis, vulnerability assessment, and secure coding",
        capabilities: &[
            "security-audit",
            "vulnerability-scan",
            "secure-coding",
            "compliance",
        ],
        tools: &["filesystem", "git", "sentry"],
    },
];

/// Look up the profile for `agent_type` (case-insensitive), falling back to
/// [`GENERAL_PROFILE`]. Never fails.
pub fn resolve_profile(agent_type: &str) -> Resolution<&'static AgentProfile> {
    let key = agent_type.trim();
    match AGENT_PROFILES
        .iter()
        .find(|profile| profile.key.eq_ignore_ascii_case(key))
    {
        Some(profile) => Resolution::Matched(profile),
        None => Resolution::Defaulted(&GENERAL_PROFILE),
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the create-agent tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAgentParams {
    /// Agent type to create (nodejs, python, react, ...).
    #[serde(default)]
    pub agent_type: Option<String>,

    #[serde(default)]
    pub project_context: Option<String>,

    /// Comma-separated extra capabilities.
    #[serde(default)]
    pub capabilities: Option<String>,

    #[serde(default)]
    pub specialization: Option<String>,
}

// ============================================================================
// Output
// ============================================================================

/// A fully resolved agent, owned by the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDefinition {
    /// The agent type as requested by the caller.
    pub agent_type: String,
    pub profile: &'static AgentProfile,
    /// Whether the requested type was unknown and the baseline profile was used.
    pub defaulted: bool,
    pub capabilities: Vec<String>,
    pub tools: Vec<String>,
    pub context: String,
    pub specialization: Option<String>,
}

impl AgentDefinition {
    /// Human-readable summary returned to the client.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("✅ Created {}", self.profile.name)];
        if self.defaulted {
            lines.push(format!(
                "ℹ️ Unknown agent type '{}', using the {} baseline",
                self.agent_type, self.profile.key
            ));
        }
        lines.push(format!("📋 Capabilities: {}", self.capabilities.join(", ")));
        lines.push(format!("🔧 Tools: {}", self.tools.join(", ")));
        lines.push(format!("📝 Context: {}", self.context));
        if let Some(specialization) = &self.specialization {
            lines.push(format!("🎯 Specialization: {}", specialization));
        }
        lines.push("🚀 Agent is now active and ready for specialized tasks!".to_string());
        lines.join("\n")
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create-agent tool - assembles a specialized agent from a static profile.
pub struct CreateAgentTool;

impl CreateAgentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_create_agent";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create specialized agents for specific programming languages and contexts";

    /// Resolve the agent described by `params`.
    pub fn build(params: &CreateAgentParams) -> ToolResult<AgentDefinition> {
        let agent_type = require_text(&params.agent_type, "agent_type")?;

        let resolution = resolve_profile(agent_type);
        let defaulted = !resolution.is_matched();
        let profile = match resolution {
            Resolution::Matched(profile) | Resolution::Defaulted(profile) => profile,
            Resolution::Ignored => &GENERAL_PROFILE,
        };
        if defaulted {
            warn!(
                "Unknown agent type '{}', falling back to '{}'",
                agent_type, profile.key
            );
        }

        let extra: Vec<String> = optional_text(&params.capabilities)
            .map(|raw| split_list(raw).map(str::to_string).collect())
            .unwrap_or_default();
        let capabilities = dedup_preserving_order(
            profile
                .capabilities
                .iter()
                .map(|c| c.to_string())
                .chain(extra),
        );

        Ok(AgentDefinition {
            agent_type: agent_type.to_string(),
            profile,
            defaulted,
            capabilities,
            tools: profile.tools.iter().map(|t| t.to_string()).collect(),
            context: optional_text(&params.project_context)
                .unwrap_or(NO_CONTEXT)
                .to_string(),
            specialization: optional_text(&params.specialization).map(str::to_string),
        })
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(arguments: JsonObject) -> ToolResult<String> {
        let params: CreateAgentParams = parse_arguments(arguments)?;
        let agent = Self::build(&params)?;
        info!(
            "Create-agent tool called: type={} -> {}",
            agent.agent_type, agent.profile.name
        );
        Ok(agent.summary())
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "agent_type": {
                    "type": "string",
                    "description": "Type of agent to create (nodejs, python, react, etc.)",
                    "required": true
                },
                "project_context": {
                    "type": "string",
                    "description": "Current project context and requirements"
                },
                "capabilities": {
                    "type": "string",
                    "description": "Comma-separated list of required capabilities"
                },
                "specialization": {
                    "type": "string",
                    "description": "Specific specialization focus (testing, security, performance, etc.)"
                }
            }),
            &["agent_type"],
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: Arc::new(Self::input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
