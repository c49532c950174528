use serde::{Deserialize, Serialize};

use crate::plan::PlanSet;
use crate::report::ToolInfo;
use crate::wire::{tool_to_wire, ToolInfoV1, WireError};

/// Internal plan document: every plan set produced by one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub plan_sets: Vec<PlanSet>,
}

impl PlanDocument {
    pub fn new(tool: ToolInfo, plan_sets: Vec<PlanSet>) -> Self {
        Self {
            schema: crate::schema::BEANWIRE_PLANS_V1.to_string(),
            tool,
            plan_sets,
        }
    }
}

/// Schema-exact wire representation of beanwire.plans.v1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansV1 {
    pub schema: String,
    pub tool: ToolInfoV1,

    #[serde(default)]
    pub plan_sets: Vec<PlanSet>,
}

impl TryFrom<&PlanDocument> for PlansV1 {
    type Error = WireError;

    fn try_from(doc: &PlanDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            schema: doc.schema.clone(),
            tool: tool_to_wire(&doc.tool, "plans")?,
            plan_sets: doc.plan_sets.clone(),
        })
    }
}

impl From<PlansV1> for PlanDocument {
    fn from(wire: PlansV1) -> Self {
        PlanDocument {
            schema: wire.schema,
            tool: ToolInfo {
                name: wire.tool.name,
                version: Some(wire.tool.version),
                commit: wire.tool.commit,
            },
            plan_sets: wire.plan_sets,
        }
    }
}
