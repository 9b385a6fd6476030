use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::lib::consolidation::Recommendation;
use crate::{ConsolidatorError, LoadBalancer, Result};

/// A tier is a set of one or more subnets. In an AWS account, we might have
/// a public subnet, an app subnet, a private subnet, a database subnet, etc.
/// Each tier owns exactly one recommendation.
struct Tier {
    subnets: BTreeSet<String>,
    recommendation: Recommendation,
}

/// Holder for all of the tiers discovered so far, keyed by subnet.
///
/// Known limitation, kept for compatibility with the original tool: when a
/// load balancer bridges two independently-seeded tiers, its subnets are
/// re-pointed at the first subnet's tier but the older tier's accumulated
/// recommendation is not migrated. Both tiers stay in the output.
pub struct TierIndex {
    by_subnet: HashMap<String, usize>,
    tiers: Vec<Tier>,
}

impl TierIndex {
    pub fn new() -> Self {
        Self {
            by_subnet: HashMap::new(),
            tiers: Vec::new(),
        }
    }

    /// Resolve the tier for a load balancer and return its recommendation.
    ///
    /// The first subnet picks (or creates) the tier; every subsequent subnet
    /// in the list is force-associated with that tier, overwriting any
    /// existing subnet mapping.
    pub fn resolve(&mut self, lb: &LoadBalancer) -> Result<&mut Recommendation> {
        let mut tier = None;

        for subnet in &lb.subnets {
            match tier {
                Some(idx) => self.associate(idx, subnet),
                None => tier = Some(self.find_or_create(subnet)),
            }
        }

        let idx = tier.ok_or_else(|| {
            ConsolidatorError::InvalidInput(format!(
                "load balancer {:?} has no subnets",
                lb.name
            ))
        })?;

        Ok(&mut self.tiers[idx].recommendation)
    }

    fn find_or_create(&mut self, subnet: &str) -> usize {
        if let Some(&idx) = self.by_subnet.get(subnet) {
            return idx;
        }

        debug!("Subnet {} starts a new tier", subnet);
        let idx = self.tiers.len();
        self.tiers.push(Tier {
            subnets: BTreeSet::new(),
            recommendation: Recommendation::new(),
        });
        self.associate(idx, subnet);

        idx
    }

    fn associate(&mut self, tier: usize, subnet: &str) {
        self.tiers[tier].subnets.insert(subnet.to_string());
        self.by_subnet.insert(subnet.to_string(), tier);
    }

    /// All recommendations in tier-creation order, each with its subnet list
    /// sorted lexicographically for presentation.
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        self.tiers
            .into_iter()
            .map(|tier| {
                let mut recommendation = tier.recommendation;
                recommendation.subnets = tier.subnets.into_iter().collect();
                recommendation
            })
            .collect()
    }
}

impl Default for TierIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lb(name: &str, subnets: &[&str]) -> LoadBalancer {
        LoadBalancer {
            name: name.to_string(),
            subnets: subnets.iter().map(|s| s.to_string()).collect(),
            listeners: Vec::new(),
            security_groups: Vec::new(),
        }
    }

    #[test]
    fn shared_subnet_converges_to_one_tier() {
        let mut tiers = TierIndex::new();
        tiers.resolve(&lb("first", &["a"])).unwrap();
        tiers.resolve(&lb("second", &["a"])).unwrap();

        assert_eq!(1, tiers.into_recommendations().len());
    }

    #[test]
    fn intersecting_subnet_lists_converge_to_one_tier() {
        let mut tiers = TierIndex::new();
        tiers.resolve(&lb("first", &["a", "b"])).unwrap();
        tiers.resolve(&lb("second", &["b", "c"])).unwrap();

        let recommendations = tiers.into_recommendations();
        assert_eq!(1, recommendations.len());
        assert_eq!(vec!["a", "b", "c"], recommendations[0].subnets);
    }

    #[test]
    fn disjoint_subnet_lists_stay_in_separate_tiers() {
        let mut tiers = TierIndex::new();
        tiers.resolve(&lb("first", &["a"])).unwrap();
        tiers.resolve(&lb("second", &["z"])).unwrap();

        assert_eq!(2, tiers.into_recommendations().len());
    }

    #[test]
    fn subnet_lists_come_out_sorted() {
        let mut tiers = TierIndex::new();
        tiers.resolve(&lb("first", &["c", "a", "b"])).unwrap();

        let recommendations = tiers.into_recommendations();
        assert_eq!(vec!["a", "b", "c"], recommendations[0].subnets);
    }

    #[test]
    fn empty_subnet_list_is_an_error() {
        let mut tiers = TierIndex::new();
        assert!(tiers.resolve(&lb("first", &[])).is_err());
    }

    #[test]
    fn late_bridge_leaves_earlier_tier_in_place() {
        // "a" and "z" seed separate tiers; a third load balancer bridging
        // them re-points "z" at the first tier but does not migrate the
        // second tier's recommendation. Order-dependent, by compatibility.
        let mut tiers = TierIndex::new();
        tiers.resolve(&lb("first", &["a"])).unwrap();
        tiers.resolve(&lb("second", &["z"])).unwrap();
        tiers.resolve(&lb("bridge", &["a", "z"])).unwrap();

        let recommendations = tiers.into_recommendations();
        assert_eq!(2, recommendations.len());
        assert_eq!(vec!["a", "z"], recommendations[0].subnets);
        assert_eq!(vec!["z"], recommendations[1].subnets);
    }
}
