//! Role enumeration and the flat role set used by the access filter.
//!
//! Roles never form a hierarchy: a caller holds a set of roles and a page
//! requires a set of roles, and access is decided by set membership only.
//! Two sentinels ride along in the same enumeration: [`Role::All`] (any
//! authenticated caller) and [`Role::UnauthenticatedOnly`] (pages such as the
//! login form that a signed-in caller must not reach).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
    Accountant,
    Patient,
    All,
    UnauthenticatedOnly,
}

/// Roles a staff account may be given when created or edited.
pub const STAFF_ROLES: [Role; 5] = [
    Role::Admin,
    Role::Doctor,
    Role::Nurse,
    Role::Receptionist,
    Role::Accountant,
];

const ALL_VARIANTS: [Role; 8] = [
    Role::Admin,
    Role::Doctor,
    Role::Nurse,
    Role::Receptionist,
    Role::Accountant,
    Role::Patient,
    Role::All,
    Role::UnauthenticatedOnly,
];

impl Role {
    /// Wire name used in token claims and backend payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Receptionist => "receptionist",
            Role::Accountant => "accountant",
            Role::Patient => "patient",
            Role::All => "all",
            Role::UnauthenticatedOnly => "unauthenticated_only",
        }
    }

    /// Backend role id for staff roles. Patients and sentinels have none.
    pub const fn backend_id(self) -> Option<DbId> {
        match self {
            Role::Admin => Some(1),
            Role::Accountant => Some(2),
            Role::Nurse => Some(4),
            Role::Receptionist => Some(5),
            Role::Doctor => Some(6),
            Role::Patient | Role::All | Role::UnauthenticatedOnly => None,
        }
    }

    /// Whether this is one of the two sentinel values rather than a real role.
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Role::All | Role::UnauthenticatedOnly)
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; tokens issued by the backend use `Admin`, `Doctor`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ALL_VARIANTS
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A flat set of [`Role`]s backed by a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u16);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Build a set from a slice; usable in `const` position for page guards.
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when the two sets share at least one role.
    pub const fn intersects(self, other: RoleSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub const fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        ALL_VARIANTS.into_iter().filter(move |r| self.contains(*r))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Role::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" doctor ".parse::<Role>(), Ok(Role::Doctor));
        assert_eq!("RECEPTIONIST".parse::<Role>(), Ok(Role::Receptionist));
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn backend_ids_match_staff_table() {
        assert_eq!(Role::Admin.backend_id(), Some(1));
        assert_eq!(Role::Accountant.backend_id(), Some(2));
        assert_eq!(Role::Nurse.backend_id(), Some(4));
        assert_eq!(Role::Receptionist.backend_id(), Some(5));
        assert_eq!(Role::Doctor.backend_id(), Some(6));
        assert_eq!(Role::Patient.backend_id(), None);
    }

    #[test]
    fn set_membership_and_intersection() {
        let staff = RoleSet::of(&[Role::Doctor, Role::Nurse]);
        assert!(staff.contains(Role::Doctor));
        assert!(!staff.contains(Role::Admin));
        assert_eq!(staff.len(), 2);

        assert!(staff.intersects(RoleSet::of(&[Role::Nurse, Role::Admin])));
        assert!(!staff.intersects(RoleSet::of(&[Role::Admin])));
        assert!(!staff.intersects(RoleSet::EMPTY));
    }

    #[test]
    fn serializes_as_wire_names() {
        let set: RoleSet = [Role::Nurse, Role::Admin].into_iter().collect();
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(json, serde_json::json!(["admin", "nurse"]));
    }
}
