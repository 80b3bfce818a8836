//! Permission tiers and the default visibility policy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::{FilterEntry, PermissionType};

/// Coarse access level of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionTier {
    /// Administrators only
    Admin,
    /// Restricted to a non-admin role
    Member,
    /// No permission filter, open to all
    Everyone,
}

impl PermissionTier {
    /// Lowercase label used in the catalog
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Everyone => "everyone",
        }
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce a handler's filter chain to a permission tier
///
/// Only the first permission filter counts.
#[must_use]
pub fn classify(filters: &[FilterEntry]) -> PermissionTier {
    filters
        .iter()
        .find_map(|filter| match filter {
            FilterEntry::Permission { permission_type } => Some(match permission_type {
                PermissionType::Admin => PermissionTier::Admin,
                PermissionType::Member => PermissionTier::Member,
            }),
            _ => None,
        })
        .unwrap_or(PermissionTier::Everyone)
}

/// Whether a command of the given tier is listed
///
/// Admin commands are hidden unless `show_all_cmds` is set.
#[must_use]
pub fn is_visible(permission: PermissionTier, show_all_cmds: bool) -> bool {
    show_all_cmds || permission != PermissionTier::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(permission_type: PermissionType) -> FilterEntry {
        FilterEntry::Permission { permission_type }
    }

    #[test]
    fn no_permission_filter_is_everyone() {
        assert_eq!(classify(&[]), PermissionTier::Everyone);
        assert_eq!(
            classify(&[FilterEntry::Command {
                command_name: "ping".to_string()
            }]),
            PermissionTier::Everyone
        );
    }

    #[test]
    fn admin_and_member() {
        assert_eq!(classify(&[permission(PermissionType::Admin)]), PermissionTier::Admin);
        assert_eq!(
            classify(&[permission(PermissionType::Member)]),
            PermissionTier::Member
        );
    }

    #[test]
    fn first_permission_filter_wins() {
        let filters = [
            FilterEntry::Other,
            permission(PermissionType::Member),
            permission(PermissionType::Admin),
        ];
        assert_eq!(classify(&filters), PermissionTier::Member);
    }

    #[test]
    fn admin_hidden_by_default() {
        assert!(!is_visible(PermissionTier::Admin, false));
        assert!(is_visible(PermissionTier::Member, false));
        assert!(is_visible(PermissionTier::Everyone, false));
    }

    #[test]
    fn show_all_reveals_everything() {
        for tier in [
            PermissionTier::Admin,
            PermissionTier::Member,
            PermissionTier::Everyone,
        ] {
            assert!(is_visible(tier, true));
        }
    }

    #[test]
    fn display_labels() {
        assert_eq!(PermissionTier::Admin.to_string(), "admin");
        assert_eq!(PermissionTier::Everyone.as_str(), "everyone");
    }
}
