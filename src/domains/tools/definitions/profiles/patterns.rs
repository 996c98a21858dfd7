//! UNIVERSAL MODE pattern activation tool definition.
//!
//! Combines three static sources into one ordered, duplicate-free list:
//! the intensity tier, the project-type set, and patterns named by focus
//! area keywords.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::common::{Resolution, dedup_preserving_order, split_list};
use crate::domains::tools::arguments::{object_schema, optional_text, parse_arguments, require_text};
use crate::domains::tools::error::ToolResult;

// ============================================================================
// Static Pattern Tables
// ============================================================================

/// How many patterns to switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Minimal,
    Medium,
    High,
    Maximum,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Minimal,
        Intensity::Medium,
        Intensity::High,
        Intensity::Maximum,
    ];

    /// Tier used when the caller gives none or an unknown one.
    pub const DEFAULT: Intensity = Intensity::Medium;

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Minimal => "minimal",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::Maximum => "maximum",
        }
    }

    /// Base patterns for this tier. Each tier extends the one below it.
    pub fn base_patterns(&self) -> &'static [&'static str] {
        match self {
            Intensity::Minimal => &["Checkpoint-Strategy"],
            Intensity::Medium => &["Checkpoint-Strategy", "Assumption-Tracking"],
            Intensity::High => &[
                "Checkpoint-Strategy",
                "Assumption-Tracking",
                "TDD-Patterns",
                "Documentation-Synthesis",
            ],
            Intensity::Maximum => &[
                "Checkpoint-Strategy",
                "Assumption-Tracking",
                "TDD-Patterns",
                "Documentation-Synthesis",
                "Visual-Iteration",
                "Auto-Accept-Mode",
            ],
        }
    }

    /// Resolve a caller-supplied tier name.
    pub fn resolve(requested: Option<&str>) -> Resolution<Intensity> {
        let Some(requested) = requested else {
            return Resolution::Defaulted(Self::DEFAULT);
        };
        let requested = requested.trim();
        match Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(requested))
        {
            Some(tier) => Resolution::Matched(tier),
            None => {
                warn!(
                    "Unknown intensity '{}', using '{}'",
                    requested,
                    Self::DEFAULT.as_str()
                );
                Resolution::Defaulted(Self::DEFAULT)
            }
        }
    }
}

pub static PROJECT_PATTERNS: &[(&str, &[&str])] = &[
    (
        "react",
        &["Visual-Iteration", "TDD-Patterns", "Performance-Optimization"],
    ),
    (
        "nodejs",
        &["TDD-Patterns", "Security-Patterns", "API-Development"],
    ),
    (
        "python",
        &[
            "Slot-Machine-Methodology",
            "Data-Science-Patterns",
            "TDD-Patterns",
        ],
    ),
    (
        "infrastructure",
        &[
            "Security-Patterns",
            "Documentation-Synthesis",
            "Checkpoint-Strategy",
        ],
    ),
    (
        "security",
        &[
            "Security-Patterns",
            "Documentation-Synthesis",
            "Compliance-Audit",
        ],
    ),
];

pub static FOCUS_PATTERNS: &[(&str, &str)] = &[
    ("security", "Security-Patterns"),
    ("performance", "Performance-Optimization"),
    ("testing", "TDD-Patterns"),
    ("documentation", "Documentation-Synthesis"),
    ("visual", "Visual-Iteration"),
];

/// Project-specific patterns. Unknown project types contribute nothing.
pub fn project_patterns(project_type: &str) -> Resolution<&'static [&'static str]> {
    let key = project_type.trim();
    match PROJECT_PATTERNS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
    {
        Some((_, patterns)) => Resolution::Matched(*patterns),
        None => Resolution::Ignored,
    }
}

/// Pattern for a single focus-area keyword. Unknown keywords are dropped.
pub fn focus_pattern(keyword: &str) -> Resolution<&'static str> {
    match FOCUS_PATTERNS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(keyword))
    {
        Some((_, pattern)) => Resolution::Matched(*pattern),
        None => Resolution::Ignored,
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the pattern activation tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivatePatternsParams {
    /// Detected project type (react, nodejs, python, ...).
    #[serde(default)]
    pub project_type: Option<String>,

    #[serde(default)]
    pub intensity: Option<String>,

    /// Comma-separated focus areas (security, performance, testing, ...).
    #[serde(default)]
    pub focus_areas: Option<String>,
}

// ============================================================================
// Output
// ============================================================================

/// The resolved set of active patterns for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternActivation {
    pub project_type: String,
    pub intensity: Intensity,
    pub patterns: Vec<String>,
}

impl PatternActivation {
    /// Human-readable summary returned to the client.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "🌐 UNIVERSAL MODE Patterns Activated ({})\n\n",
            self.intensity.as_str().to_uppercase()
        );
        out.push_str(&format!("📋 Project Type: {}\n", self.project_type));
        out.push_str(&format!("⚡ Intensity Level: {}\n", self.intensity.as_str()));
        out.push_str(&format!("🎯 Active Patterns ({}):\n", self.patterns.len()));
        for pattern in &self.patterns {
            out.push_str(&format!("  ✅ {}\n", pattern));
        }
        out.push_str("\n🚀 Your development environment is now optimized for maximum productivity!");
        out
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Activate-patterns tool - picks development patterns for a project.
pub struct ActivatePatternsTool;

impl ActivatePatternsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_activate_patterns";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Intelligently activate UNIVERSAL MODE patterns based on project analysis";

    /// Resolve the active patterns described by `params`.
    pub fn build(params: &ActivatePatternsParams) -> ToolResult<PatternActivation> {
        let project_type = require_text(&params.project_type, "project_type")?;

        let intensity = Intensity::resolve(optional_text(&params.intensity))
            .value()
            .unwrap_or(Intensity::DEFAULT);

        let project: &'static [&'static str] = match project_patterns(project_type) {
            Resolution::Matched(patterns) | Resolution::Defaulted(patterns) => patterns,
            Resolution::Ignored => {
                debug!("No project-specific patterns for '{}'", project_type);
                &[]
            }
        };

        let mut focus = Vec::new();
        for keyword in optional_text(&params.focus_areas)
            .map(split_list)
            .into_iter()
            .flatten()
        {
            match focus_pattern(keyword) {
                Resolution::Matched(pattern) | Resolution::Defaulted(pattern) => {
                    focus.push(pattern)
                }
                Resolution::Ignored => debug!("Ignoring unknown focus area '{}'", keyword),
            }
        }

        let patterns = dedup_preserving_order(
            intensity
                .base_patterns()
                .iter()
                .chain(project.iter())
                .chain(focus.iter())
                .copied(),
        );

        Ok(PatternActivation {
            project_type: project_type.to_string(),
            intensity,
            patterns,
        })
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(arguments: JsonObject) -> ToolResult<String> {
        let params: ActivatePatternsParams = parse_arguments(arguments)?;
        let activation = Self::build(&params)?;
        info!(
            "Activate-patterns tool called: project={} intensity={} -> {} patterns",
            activation.project_type,
            activation.intensity.as_str(),
            activation.patterns.len()
        );
        Ok(activation.summary())
    }

    pub fn input_schema() -> JsonObject {
        let intensities: Vec<_> = Intensity::ALL.iter().map(|i| i.as_str()).collect();
        object_schema(
            json!({
                "project_type": {
                    "type": "string",
                    "description": "Detected project type (react, nodejs, python, etc.)",
                    "required": true
                },
                "intensity": {
                    "type": "string",
                    "description": "Pattern activation intensity (minimal, medium, high, maximum)",
                    "enum": intensities
                },
                "focus_areas": {
                    "type": "string",
                    "description": "Comma-separated focus areas (security, performance, testing, etc.)"
                }
            }),
            &["project_type"],
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
