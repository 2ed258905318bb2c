//! # Capability classification
//!
//! Maps the free-text `role` and `plan` strings stored on an account to one
//! of two capability classes: [`CapabilityClass::Coach`] or
//! [`CapabilityClass::Fan`].
//!
//! Role strings come from many upstream sources (legacy records, partial
//! migrations, onboarding forms), so compound titles such as
//! `"team-manager"` or `"co-organizer"` are matched by keyword rather than
//! by an exhaustive list.
//!
//! Resolution order, first match wins:
//!
//! 1. empty role: `Coach` on a coach-granting plan, else `Fan`
//! 2. `"fan"` / `"supporter"`: `Fan`, regardless of plan
//! 3. `"coach"`: `Coach`
//! 4. role contains a staff keyword: `Coach`
//! 5. coach-granting plan: `Coach`
//! 6. otherwise `Fan`
//!
//! ```rust
//! use varsityhub_api::auth::role::{is_coach, resolve_role, CapabilityClass};
//!
//! assert_eq!(resolve_role(Some("Head Coach"), None), CapabilityClass::Coach);
//! assert_eq!(resolve_role(Some("FAN"), Some("legend")), CapabilityClass::Fan);
//! assert!(is_coach(None, Some("veteran")));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plans that grant coach capability when the role does not decide.
pub const COACH_PLANS: [&str; 2] = ["veteran", "legend"];

/// Substrings that mark a role as staff.
pub const COACH_KEYWORDS: [&str; 7] = [
    "coach",
    "organizer",
    "manager",
    "staff",
    "owner",
    "director",
    "admin",
];

/// Derived capability of a user. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityClass {
    Coach,
    #[default]
    Fan,
}

impl CapabilityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityClass::Coach => "coach",
            CapabilityClass::Fan => "fan",
        }
    }
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Classifies a user from their role and plan. Total: never fails.
pub fn resolve_role(role: Option<&str>, plan: Option<&str>) -> CapabilityClass {
    let role = normalize(role);
    let plan = normalize(plan);
    let coach_plan = COACH_PLANS.contains(&plan.as_str());

    if role.is_empty() {
        return if coach_plan {
            CapabilityClass::Coach
        } else {
            CapabilityClass::Fan
        };
    }

    // An explicit fan wins over a paid plan.
    if role == "fan" || role == "supporter" {
        return CapabilityClass::Fan;
    }

    if role == "coach" || COACH_KEYWORDS.iter().any(|k| role.contains(k)) {
        return CapabilityClass::Coach;
    }

    if coach_plan {
        CapabilityClass::Coach
    } else {
        CapabilityClass::Fan
    }
}

/// Same as [`resolve_role`] for untyped JSON values.
///
/// Anything that is not a JSON string (null, numbers, objects, ...) is
/// treated as an empty string.
pub fn resolve_role_value(role: &Value, plan: &Value) -> CapabilityClass {
    resolve_role(role.as_str(), plan.as_str())
}

/// `true` when [`resolve_role`] yields [`CapabilityClass::Coach`].
pub fn is_coach(role: Option<&str>, plan: Option<&str>) -> bool {
    resolve_role(role, plan) == CapabilityClass::Coach
}
