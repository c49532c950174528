use serde::{Deserialize, Serialize};

use crate::report::{BeanwireReport, ClassReport, ReportRunInfo, ReportVerdict};
use crate::wire::{tool_to_wire, ToolInfoV1, WireError};

/// Schema-exact wire representation of beanwire.report.v1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportV1 {
    pub schema: String,
    pub tool: ToolInfoV1,
    pub run: ReportRunInfo,
    pub verdict: ReportVerdict,

    #[serde(default)]
    pub classes: Vec<ClassReport>,
}

impl TryFrom<&BeanwireReport> for ReportV1 {
    type Error = WireError;

    fn try_from(report: &BeanwireReport) -> Result<Self, Self::Error> {
        Ok(Self {
            schema: report.schema.clone(),
            tool: tool_to_wire(&report.tool, "report")?,
            run: report.run.clone(),
            verdict: report.verdict.clone(),
            classes: report.classes.clone(),
        })
    }
}
