use serde::Serialize;
use std::fmt::Write;

use crate::lib::classifier::TargetType;
use crate::lib::consolidation::{ConsolidatedLb, ConsolidationReport};

/// Top-level output structure containing metadata and recommendations
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidationOutput {
    pub metadata: OutputMetadata,
    pub recommendations: Vec<TierOutput>,
}

/// Metadata about the consolidation run
#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub timestamp: String,
    pub total_load_balancers: usize,
    pub total_tiers: usize,
    pub proposed_albs: usize,
    pub proposed_nlbs: usize,
    pub retained_elbs: usize,
    pub estimated_savings_percent: f64,
}

/// One tier's recommendation
#[derive(Debug, Clone, Serialize)]
pub struct TierOutput {
    pub subnets: Vec<String>,
    pub albs: Vec<LbOutput>,
    pub nlbs: Vec<LbOutput>,
    pub elbs: Vec<LbOutput>,
}

/// One proposed replacement load balancer
#[derive(Debug, Clone, Serialize)]
pub struct LbOutput {
    pub replaces: Vec<String>,
    pub ports: Vec<String>,
    pub security_groups: Vec<String>,
}

impl From<&ConsolidatedLb> for LbOutput {
    fn from(clb: &ConsolidatedLb) -> Self {
        Self {
            replaces: clb.replaces().to_vec(),
            ports: clb.ports(),
            security_groups: clb.security_groups(),
        }
    }
}

impl ConsolidationOutput {
    pub fn new(report: &ConsolidationReport) -> Self {
        let recommendations = report
            .recommendations()
            .iter()
            .map(|r| TierOutput {
                subnets: r.subnets().to_vec(),
                albs: r.albs().iter().map(LbOutput::from).collect(),
                nlbs: r.nlbs().iter().map(LbOutput::from).collect(),
                elbs: r.elbs().iter().map(LbOutput::from).collect(),
            })
            .collect();

        Self {
            metadata: OutputMetadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
                total_load_balancers: report.original(),
                total_tiers: report.recommendations().len(),
                proposed_albs: report.albs(),
                proposed_nlbs: report.nlbs(),
                retained_elbs: report.elbs(),
                estimated_savings_percent: report.savings_percent(),
            },
            recommendations,
        }
    }
}

/// Render the human-readable consolidation report
pub fn render_report(report: &ConsolidationReport) -> String {
    let mut out = String::new();

    for recommendation in report.recommendations() {
        let _ = writeln!(
            out,
            "The subnets \"{}\" could contain the following load balancer(s):",
            recommendation.subnets().join(", ")
        );

        for target in [TargetType::Alb, TargetType::Nlb, TargetType::Elb] {
            for clb in recommendation.lbs_of(target) {
                let action = if clb.replaces().len() == 1 && target == TargetType::Elb {
                    "Retaining"
                } else {
                    "Replacing"
                };
                let _ = write!(
                    out,
                    "\n{} the following load balancers:\n- {}\n\n -> an {} with security groups:\n\t- {}\nexposing the ports:\n\t- {}\n",
                    action,
                    clb.replaces().join("\n- "),
                    target,
                    clb.security_groups().join("\n\t- "),
                    clb.ports().join("\n\t- "),
                );
            }
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "So {} ELBs would become {} ALBs, {} NLBs and {} ELBs\nwith a potential saving of {:.0}%\n",
        report.original(),
        report.albs(),
        report.nlbs(),
        report.elbs(),
        report.savings_percent(),
    );

    out
}
