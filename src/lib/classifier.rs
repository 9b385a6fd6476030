use std::collections::BTreeSet;
use std::fmt;

use crate::{ConsolidatorError, LoadBalancer, Result};

/// The kind of load balancer that could replace a classic one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetType {
    /// Application Load Balancer; only speaks HTTP(S)
    Alb,
    /// Network Load Balancer; only speaks TCP
    Nlb,
    /// Classic load balancer, retained because its listeners mix protocols
    Elb,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Alb => "ALB",
            TargetType::Nlb => "NLB",
            TargetType::Elb => "ELB",
        }
    }

    /// ALBs can merge load balancers with colliding ports because host and
    /// path based routing can still select a backend. NLBs and classic ELBs
    /// have no routing layer to disambiguate.
    pub fn tolerates_port_collisions(&self) -> bool {
        matches!(self, TargetType::Alb)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Category {
    Http,
    Tcp,
}

/// Decide which target type could replace a load balancer by looking at its
/// listeners.
///
/// HTTP and HTTPS listeners are HTTP traffic; so is TCP on port 80 or 443.
/// TCP on any other port is plain TCP. Other protocols contribute nothing,
/// and a load balancer with no recognized protocol at all fails the run.
pub fn classify(lb: &LoadBalancer) -> Result<TargetType> {
    let mut categories = BTreeSet::new();

    for listener in &lb.listeners {
        match listener.protocol.as_str() {
            "HTTP" | "HTTPS" => {
                categories.insert(Category::Http);
            }
            "TCP" => {
                if listener.port == 80 || listener.port == 443 {
                    categories.insert(Category::Http);
                } else {
                    categories.insert(Category::Tcp);
                }
            }
            _ => {}
        }
    }

    match categories.len() {
        0 => Err(ConsolidatorError::UnclassifiableLoadBalancer {
            name: lb.name.clone(),
        }),
        1 => {
            if categories.contains(&Category::Http) {
                Ok(TargetType::Alb)
            } else {
                Ok(TargetType::Nlb)
            }
        }
        _ => Ok(TargetType::Elb),
    }
}
