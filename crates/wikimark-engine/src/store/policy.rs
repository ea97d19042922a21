use serde::{Deserialize, Serialize};

use crate::model::Principal;

/// Read policy attached to a bag or recipe.
///
/// An empty list admits everyone. Otherwise an entry admits the principal if
/// it is the principal's name, `ANY` (any non-guest), or `R:<role>` for one
/// of the principal's roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub read: Vec<String>,
}

impl Policy {
    pub const ANY: &'static str = "ANY";
    pub const ROLE_PREFIX: &'static str = "R:";

    pub fn restricted_to<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            read: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows_read(&self, principal: &Principal) -> bool {
        if self.read.is_empty() {
            return true;
        }
        self.read.iter().any(|entry| {
            if entry == Self::ANY {
                return !principal.is_guest();
            }
            if let Some(role) = entry.strip_prefix(Self::ROLE_PREFIX) {
                return principal.roles.iter().any(|r| r == role);
            }
            *entry == principal.name
        })
    }
}
