//! ELB Consolidation Recommender Library
//!
//! This library analyzes an inventory of classic AWS load balancers and
//! recommends how to consolidate them into a minimal set of ALBs and NLBs
//! per network tier, without mutating anything.

pub mod lib {
    pub mod classifier;
    pub mod cli;
    pub mod config;
    pub mod consolidation;
    pub mod error;
    pub mod ingress;
    pub mod inventory;
    pub mod logger;
    pub mod output;
    pub mod tiers;
    pub mod tui;
}

// Re-export commonly used types at the root level for convenience
pub use lib::classifier::{TargetType, classify};
pub use lib::cli::{Cli, OutputFormat};
pub use lib::config::EngineConfig;
pub use lib::consolidation::{
    ConsolidatedLb, ConsolidationReport, Recommendation, generate_recommendations,
};
pub use lib::error::{ConfigError, ConsolidatorError, InventoryError, Result};
pub use lib::ingress::IngressIndex;
pub use lib::inventory::{Inventory, Listener, LoadBalancer, SecurityGroup};
pub use lib::logger::init_logger;
pub use lib::output::{ConsolidationOutput, OutputMetadata, render_report};
pub use lib::tiers::TierIndex;
pub use lib::tui::display_recommendations_table;
