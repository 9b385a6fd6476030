use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::{InventoryError, Result};

/// A classic load balancer as it exists in the account today.
///
/// The shape mirrors the DescribeLoadBalancers response: a unique name, the
/// subnets it is attached to, its listeners, and its security groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub name: String,
    pub subnets: Vec<String>,
    #[serde(default)]
    pub listeners: Vec<Listener>,
    #[serde(default)]
    pub security_groups: Vec<String>,
}

/// A single listener on a classic load balancer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listener {
    pub port: u16,
    pub protocol: String,
}

/// A security group reduced to its ingress permissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub group_id: String,
    #[serde(default)]
    pub ip_permissions: Vec<IpPermission>,
}

/// One ingress rule; only the source ranges matter for consolidation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpPermission {
    #[serde(default)]
    pub ip_ranges: Vec<IpRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpRange {
    pub cidr_ip: String,
}

/// A fully-fetched snapshot of the load balancers and security groups to
/// analyze. The engine never talks to the network; whatever produced this
/// file owns pagination, authentication, and retries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(default)]
    pub security_groups: Vec<SecurityGroup>,
}

impl Inventory {
    /// Load an inventory from a JSON or YAML file, picking the parser from
    /// the file extension (`.yaml`/`.yml` are YAML, anything else is JSON).
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading inventory from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|e| InventoryError::Unreadable {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let inventory: Inventory = if is_yaml {
            serde_yaml::from_str(&raw).map_err(|e| InventoryError::Unparseable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            serde_json::from_str(&raw).map_err(|e| InventoryError::Unparseable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        inventory.validate()?;

        info!(
            "Loaded {} load balancers and {} security groups",
            inventory.load_balancers.len(),
            inventory.security_groups.len()
        );

        Ok(inventory)
    }

    /// Check the input contract: unique non-empty names, at least one subnet
    /// per load balancer, and listener ports in 1-65535.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for lb in &self.load_balancers {
            if lb.name.is_empty() {
                return Err(
                    InventoryError::InvalidRecord("load balancer with empty name".into()).into(),
                );
            }
            if !seen.insert(lb.name.as_str()) {
                return Err(InventoryError::InvalidRecord(format!(
                    "duplicate load balancer name {:?}",
                    lb.name
                ))
                .into());
            }
            if lb.subnets.is_empty() {
                return Err(InventoryError::InvalidRecord(format!(
                    "load balancer {:?} has no subnets",
                    lb.name
                ))
                .into());
            }
            for listener in &lb.listeners {
                if listener.port == 0 {
                    return Err(InventoryError::InvalidRecord(format!(
                        "load balancer {:?} has a listener on port 0",
                        lb.name
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Index the security groups by id for the ingress lookups
    pub fn security_groups_by_id(&self) -> HashMap<String, &SecurityGroup> {
        self.security_groups
            .iter()
            .map(|sg| (sg.group_id.clone(), sg))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn inventory_with(lbs: Vec<LoadBalancer>) -> Inventory {
        Inventory {
            load_balancers: lbs,
            security_groups: Vec::new(),
        }
    }

    fn lb(name: &str, subnets: &[&str]) -> LoadBalancer {
        LoadBalancer {
            name: name.to_string(),
            subnets: subnets.iter().map(|s| s.to_string()).collect(),
            listeners: vec![Listener {
                port: 80,
                protocol: "HTTP".to_string(),
            }],
            security_groups: Vec::new(),
        }
    }

    #[test]
    fn valid_inventory_passes_validation() {
        let inventory = inventory_with(vec![lb("first", &["a"]), lb("second", &["b"])]);
        assert!(inventory.validate().is_ok());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let inventory = inventory_with(vec![lb("first", &["a"]), lb("first", &["b"])]);
        assert!(inventory.validate().is_err());
    }

    #[test]
    fn empty_subnet_list_is_rejected() {
        let inventory = inventory_with(vec![lb("first", &[])]);
        assert!(inventory.validate().is_err());
    }

    #[test]
    fn port_zero_is_rejected() {
        let mut bad = lb("first", &["a"]);
        bad.listeners[0].port = 0;
        assert!(inventory_with(vec![bad]).validate().is_err());
    }

    #[test]
    fn loads_json_inventory_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "load_balancers": [
                    {{
                        "name": "web",
                        "subnets": ["subnet-1"],
                        "listeners": [{{"port": 443, "protocol": "HTTPS"}}],
                        "security_groups": ["sg-1"]
                    }}
                ],
                "security_groups": [
                    {{
                        "group_id": "sg-1",
                        "ip_permissions": [
                            {{"ip_ranges": [{{"cidr_ip": "10.0.0.0/8"}}]}}
                        ]
                    }}
                ]
            }}"#
        )
        .unwrap();

        let inventory = Inventory::from_file(file.path()).unwrap();
        assert_eq!(1, inventory.load_balancers.len());
        assert_eq!("web", inventory.load_balancers[0].name);
        assert_eq!(1, inventory.security_groups.len());
        assert_eq!(
            "10.0.0.0/8",
            inventory.security_groups[0].ip_permissions[0].ip_ranges[0].cidr_ip
        );
    }

    #[test]
    fn loads_yaml_inventory_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "load_balancers:\n\
             - name: web\n\
             \x20 subnets: [subnet-1]\n\
             \x20 listeners:\n\
             \x20 - port: 80\n\
             \x20   protocol: HTTP\n"
        )
        .unwrap();

        let inventory = Inventory::from_file(file.path()).unwrap();
        assert_eq!(1, inventory.load_balancers.len());
        assert_eq!(vec!["subnet-1"], inventory.load_balancers[0].subnets);
    }
}
