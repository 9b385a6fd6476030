/// Relative cost of one ALB/NLB unit against one classic load balancer
pub const DEFAULT_ELBV2_COST_RATIO: f64 = 0.9;

/// Knobs for the consolidation engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub elbv2_cost_ratio: f64,
}

impl EngineConfig {
    pub fn new(elbv2_cost_ratio: f64) -> Self {
        Self { elbv2_cost_ratio }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ELBV2_COST_RATIO)
    }
}
