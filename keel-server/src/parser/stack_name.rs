//! Stack name decomposition
//!
//! Atmos does not publish a canonical stack-naming grammar, so the
//! tenant/account/environment/region of a stack is recovered positionally
//! from its name. The layout is detected per name and the strategy is
//! swappable through `StackNaming`.

use keel_core::domain::stack::StackCoordinates;

/// Strategy that recovers scoping coordinates from a stack name
pub trait StackNaming: Send + Sync {
    fn decompose(&self, name: &str) -> StackCoordinates;
}

/// Recognised stack name layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLayout {
    /// `orgs/{tenant}/{account}/{region}/{environment}`
    SlashDelimited,
    /// `{tenant}-{account}-{environment}-{region}`
    DashDelimited,
    Unknown,
}

impl NameLayout {
    /// Picks the layout for a name; `/` takes precedence over `-`
    pub fn detect(name: &str) -> Self {
        if name.contains('/') {
            NameLayout::SlashDelimited
        } else if name.contains('-') {
            NameLayout::DashDelimited
        } else {
            NameLayout::Unknown
        }
    }

    /// Extracts coordinates by position; missing positions become empty strings
    pub fn decompose(self, name: &str) -> StackCoordinates {
        match self {
            NameLayout::SlashDelimited => {
                let parts: Vec<&str> = name.split('/').collect();
                StackCoordinates {
                    tenant: segment(&parts, 1),
                    account: segment(&parts, 2),
                    region: segment(&parts, 3),
                    environment: segment(&parts, 4),
                }
            }
            NameLayout::DashDelimited => {
                let parts: Vec<&str> = name.split('-').collect();
                StackCoordinates {
                    tenant: segment(&parts, 0),
                    account: segment(&parts, 1),
                    environment: segment(&parts, 2),
                    region: segment(&parts, 3),
                }
            }
            NameLayout::Unknown => StackCoordinates::default(),
        }
    }
}

fn segment(parts: &[&str], index: usize) -> String {
    parts.get(index).map(|s| s.to_string()).unwrap_or_default()
}

/// Default strategy: detect the layout, then split positionally
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalNaming;

impl StackNaming for PositionalNaming {
    fn decompose(&self, name: &str) -> StackCoordinates {
        NameLayout::detect(name).decompose(name)
    }
}
