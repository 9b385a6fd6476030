use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::{ConsolidatorError, Result, SecurityGroup};

/// Lazily computed, run-scoped view of security groups as their flattened
/// ingress source ranges.
///
/// Two groups are considered equivalent when their flattened CIDR sets are
/// exactly equal. We don't consider set operations in terms of one ingress
/// being a proper subset of another. Equality only at this time.
pub struct IngressIndex<'a> {
    groups: &'a HashMap<String, &'a SecurityGroup>,
    ranges_by_sg: HashMap<String, BTreeSet<String>>,
}

impl<'a> IngressIndex<'a> {
    pub fn new(groups: &'a HashMap<String, &'a SecurityGroup>) -> Self {
        Self {
            groups,
            ranges_by_sg: HashMap::new(),
        }
    }

    /// The canonical set of source CIDRs a security group allows, flattened
    /// across all of its ingress rules and stripped of port/protocol detail.
    ///
    /// Computed on first use and cached for the lifetime of the run. A group
    /// id with no supplied ingress data is a contract violation by the
    /// caller, not a soft failure.
    pub fn ranges_for(&mut self, group_id: &str) -> Result<&BTreeSet<String>> {
        if !self.ranges_by_sg.contains_key(group_id) {
            let group =
                self.groups
                    .get(group_id)
                    .ok_or_else(|| ConsolidatorError::MissingIngressData {
                        group_id: group_id.to_string(),
                    })?;

            let ranges: BTreeSet<String> = group
                .ip_permissions
                .iter()
                .flat_map(|permission| permission.ip_ranges.iter())
                .map(|range| range.cidr_ip.clone())
                .collect();

            debug!("Flattened {} into {} source ranges", group_id, ranges.len());
            self.ranges_by_sg.insert(group_id.to_string(), ranges);
        }

        Ok(&self.ranges_by_sg[group_id])
    }

    /// Exact set equality of the two groups' flattened source ranges
    pub fn equivalent(&mut self, sg1: &str, sg2: &str) -> Result<bool> {
        self.ranges_for(sg1)?;
        self.ranges_for(sg2)?;

        Ok(self.ranges_by_sg[sg1] == self.ranges_by_sg[sg2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::inventory::{IpPermission, IpRange};

    fn group(id: &str, cidrs_per_rule: &[&[&str]]) -> SecurityGroup {
        SecurityGroup {
            group_id: id.to_string(),
            ip_permissions: cidrs_per_rule
                .iter()
                .map(|cidrs| IpPermission {
                    ip_ranges: cidrs
                        .iter()
                        .map(|c| IpRange {
                            cidr_ip: c.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn index_of(groups: &[SecurityGroup]) -> HashMap<String, &SecurityGroup> {
        groups.iter().map(|g| (g.group_id.clone(), g)).collect()
    }

    #[test]
    fn same_source_ranges_across_different_rules_are_equivalent() {
        // Port 443 from a source and port 80 from the same source flatten to
        // the same canonical range set.
        let groups = vec![
            group("sg-1", &[&["10.0.0.0/8"]]),
            group("sg-2", &[&["10.0.0.0/8"], &["10.0.0.0/8"]]),
        ];
        let by_id = index_of(&groups);
        let mut index = IngressIndex::new(&by_id);

        assert!(index.equivalent("sg-1", "sg-2").unwrap());
    }

    #[test]
    fn subset_of_source_ranges_is_not_equivalence() {
        let groups = vec![
            group("sg-1", &[&["10.0.0.1/32"]]),
            group(
                "sg-2",
                &[&["10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32", "10.0.0.4/32"]],
            ),
        ];
        let by_id = index_of(&groups);
        let mut index = IngressIndex::new(&by_id);

        assert!(!index.equivalent("sg-1", "sg-2").unwrap());
    }

    #[test]
    fn missing_ingress_data_is_an_error() {
        let groups = vec![group("sg-1", &[&["10.0.0.0/8"]])];
        let by_id = index_of(&groups);
        let mut index = IngressIndex::new(&by_id);

        let err = index.equivalent("sg-1", "sg-absent").unwrap_err();
        assert!(matches!(
            err,
            ConsolidatorError::MissingIngressData { group_id } if group_id == "sg-absent"
        ));
    }
}
