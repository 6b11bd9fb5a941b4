use serde::Serialize;

use crate::roles::{Role, RoleSet};

/// The authenticated caller of a single request.
///
/// Built once from the decoded `access-token` cookie and never mutated. The
/// raw token is kept so handlers can forward it to the backend as a bearer
/// credential; it is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub uid: String,
    pub roles: RoleSet,
    pub is_patient: bool,
    #[serde(skip)]
    pub token: String,
}

impl Identity {
    pub fn new(id: String, email: String, uid: String, roles: RoleSet, token: String) -> Self {
        Self {
            id,
            email,
            uid,
            is_patient: roles.contains(Role::Patient),
            roles,
            token,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_flag_follows_roles() {
        let patient = Identity::new(
            "7".into(),
            "an@example.com".into(),
            "jti".into(),
            RoleSet::of(&[Role::Patient]),
            "tok".into(),
        );
        assert!(patient.is_patient);

        let doctor = Identity::new(
            "8".into(),
            "binh@example.com".into(),
            "jti".into(),
            RoleSet::of(&[Role::Doctor]),
            "tok".into(),
        );
        assert!(!doctor.is_patient);
        assert!(doctor.has_role(Role::Doctor));
    }

    #[test]
    fn token_is_not_serialized() {
        let identity = Identity::new(
            "1".into(),
            "a@b.vn".into(),
            "u".into(),
            RoleSet::of(&[Role::Admin]),
            "secret-token".into(),
        );
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["isPatient"], false);
        assert_eq!(json["roles"], serde_json::json!(["admin"]));
    }
}
