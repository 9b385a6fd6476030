use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use crate::lib::classifier::{TargetType, classify};
use crate::lib::config::EngineConfig;
use crate::lib::ingress::IngressIndex;
use crate::lib::tiers::TierIndex;
use crate::{LoadBalancer, Result, SecurityGroup};

/// A proposed ALB or NLB that can replace one or more classic load
/// balancers, or a classic one retained because its protocols mix.
#[derive(Debug, Clone)]
pub struct ConsolidatedLb {
    replaces: Vec<String>,
    ports: BTreeSet<u16>,
    security_groups: BTreeSet<String>,
}

impl ConsolidatedLb {
    /// Seed a new replacement from a load balancer. It exposes the same
    /// listener ports and carries the same security groups.
    fn replacing(lb: &LoadBalancer) -> Self {
        let mut clb = Self {
            replaces: Vec::new(),
            ports: BTreeSet::new(),
            security_groups: BTreeSet::new(),
        };
        clb.absorb(lb);
        clb
    }

    /// Add a load balancer to the set this replacement covers
    fn absorb(&mut self, lb: &LoadBalancer) {
        self.replaces.push(lb.name.clone());
        self.ports.extend(lb.listeners.iter().map(|l| l.port));
        self.security_groups
            .extend(lb.security_groups.iter().cloned());
    }

    /// True if any of the load balancer's listener ports is already taken
    fn has_port_collision(&self, lb: &LoadBalancer) -> bool {
        lb.listeners.iter().any(|l| self.ports.contains(&l.port))
    }

    /// Names of the replaced load balancers, in merge order
    pub fn replaces(&self) -> &[String] {
        &self.replaces
    }

    /// Listener ports in ascending order, formatted as strings
    pub fn ports(&self) -> Vec<String> {
        self.ports.iter().map(|p| p.to_string()).collect()
    }

    /// Attached security group ids, sorted lexicographically
    pub fn security_groups(&self) -> Vec<String> {
        self.security_groups.iter().cloned().collect()
    }
}

/// A summary of how the load balancers in one tier could be restructured
#[derive(Debug, Clone, Default)]
pub struct Recommendation {
    pub(crate) subnets: Vec<String>,
    albs: Vec<ConsolidatedLb>,
    albs_by_sg: HashMap<String, usize>,
    nlbs: Vec<ConsolidatedLb>,
    nlbs_by_sg: HashMap<String, usize>,
    elbs: Vec<ConsolidatedLb>,
    elbs_by_sg: HashMap<String, usize>,
}

impl Recommendation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subnets(&self) -> &[String] {
        &self.subnets
    }

    pub fn albs(&self) -> &[ConsolidatedLb] {
        &self.albs
    }

    pub fn nlbs(&self) -> &[ConsolidatedLb] {
        &self.nlbs
    }

    pub fn elbs(&self) -> &[ConsolidatedLb] {
        &self.elbs
    }

    pub fn lbs_of(&self, target: TargetType) -> &[ConsolidatedLb] {
        match target {
            TargetType::Alb => &self.albs,
            TargetType::Nlb => &self.nlbs,
            TargetType::Elb => &self.elbs,
        }
    }

    /// The CLB list and its security-group index for one target type.
    /// Indices into the list stay valid because CLBs are only ever appended.
    fn pool_mut(
        &mut self,
        target: TargetType,
    ) -> (&mut Vec<ConsolidatedLb>, &mut HashMap<String, usize>) {
        match target {
            TargetType::Alb => (&mut self.albs, &mut self.albs_by_sg),
            TargetType::Nlb => (&mut self.nlbs, &mut self.nlbs_by_sg),
            TargetType::Elb => (&mut self.elbs, &mut self.elbs_by_sg),
        }
    }
}

/// Place one load balancer into the tier's recommendation: merge it into an
/// existing replacement of the right type, or start a new one.
fn place(
    recommendation: &mut Recommendation,
    ingress: &mut IngressIndex,
    lb: &LoadBalancer,
    target: TargetType,
) -> Result<()> {
    let allow_collisions = target.tolerates_port_collisions();
    let (pool, by_sg) = recommendation.pool_mut(target);

    if pool.is_empty() {
        start_new(pool, by_sg, lb);
        return Ok(());
    }

    for group in &lb.security_groups {
        // Fast path: an existing replacement already carries this group.
        if let Some(&idx) = by_sg.get(group) {
            if allow_collisions || !pool[idx].has_port_collision(lb) {
                merge_into(pool, by_sg, idx, lb);
                return Ok(());
            }
        }

        // Have we already indexed a group with the same ingress? Candidates
        // are scanned in sorted id order so repeated runs pick the same one.
        let mut seen: Vec<String> = by_sg.keys().cloned().collect();
        seen.sort();

        for candidate in &seen {
            if ingress.equivalent(candidate, group)? {
                let idx = by_sg[candidate];
                if allow_collisions || !pool[idx].has_port_collision(lb) {
                    merge_into(pool, by_sg, idx, lb);
                    return Ok(());
                }
            }
        }
    }

    // Distinctly new security groups, then a new replacement.
    start_new(pool, by_sg, lb);
    Ok(())
}

fn start_new(
    pool: &mut Vec<ConsolidatedLb>,
    by_sg: &mut HashMap<String, usize>,
    lb: &LoadBalancer,
) {
    let idx = pool.len();
    pool.push(ConsolidatedLb::replacing(lb));
    for group in &lb.security_groups {
        by_sg.insert(group.clone(), idx);
    }
}

fn merge_into(
    pool: &mut [ConsolidatedLb],
    by_sg: &mut HashMap<String, usize>,
    idx: usize,
    lb: &LoadBalancer,
) {
    pool[idx].absorb(lb);
    // Last writer wins: every group on this load balancer now points at the
    // replacement it merged into.
    for group in &lb.security_groups {
        by_sg.insert(group.clone(), idx);
    }
}

/// The full output of one consolidation run
#[derive(Debug, Clone)]
pub struct ConsolidationReport {
    recommendations: Vec<Recommendation>,
    original: usize,
    albs: usize,
    nlbs: usize,
    elbs: usize,
    savings_percent: f64,
}

impl ConsolidationReport {
    fn new(recommendations: Vec<Recommendation>, original: usize, config: &EngineConfig) -> Self {
        let albs = recommendations.iter().map(|r| r.albs.len()).sum();
        let nlbs = recommendations.iter().map(|r| r.nlbs.len()).sum();
        let elbs = recommendations.iter().map(|r| r.elbs.len()).sum();

        Self {
            recommendations,
            original,
            albs,
            nlbs,
            elbs,
            savings_percent: savings(original, albs, nlbs, elbs, config.elbv2_cost_ratio),
        }
    }

    /// Recommendations in tier discovery order
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Number of classic load balancers in the input
    pub fn original(&self) -> usize {
        self.original
    }

    pub fn albs(&self) -> usize {
        self.albs
    }

    pub fn nlbs(&self) -> usize {
        self.nlbs
    }

    pub fn elbs(&self) -> usize {
        self.elbs
    }

    pub fn savings_percent(&self) -> f64 {
        self.savings_percent
    }
}

/// Estimated cost saving, modelling each ALB/NLB unit as costing `ratio` of
/// one classic unit and each retained classic unit as costing one.
fn savings(original: usize, albs: usize, nlbs: usize, elbs: usize, ratio: f64) -> f64 {
    if original == 0 {
        return 0.0;
    }

    (original as f64 - ((albs + nlbs) as f64 * ratio + elbs as f64)) / original as f64 * 100.0
}

/// Run the consolidation over an already-fetched inventory.
///
/// This is an online, single-pass greedy algorithm: each load balancer is
/// committed to a tier and a replacement as it is processed, in the order
/// supplied, and decisions are never revisited. It is not a global
/// optimization and is not meant to be one.
pub fn generate_recommendations(
    load_balancers: &[LoadBalancer],
    security_groups: &HashMap<String, &SecurityGroup>,
    config: &EngineConfig,
) -> Result<ConsolidationReport> {
    let mut tiers = TierIndex::new();
    let mut ingress = IngressIndex::new(security_groups);

    for lb in load_balancers {
        let target = classify(lb)?;
        debug!("{} classifies as {}", lb.name, target);

        let recommendation = tiers.resolve(lb)?;
        place(recommendation, &mut ingress, lb, target)?;
    }

    let report = ConsolidationReport::new(
        tiers.into_recommendations(),
        load_balancers.len(),
        config,
    );

    info!(
        "{} classic load balancers would become {} ALBs, {} NLBs and {} ELBs",
        report.original(),
        report.albs(),
        report.nlbs(),
        report.elbs()
    );

    Ok(report)
}
