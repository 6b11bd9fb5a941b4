//! Role-based access filter.
//!
//! [`check`] is the only policy in the crate: a pure function of the caller's
//! identity (if any), the role set a page requires, and the original request
//! path. It never touches storage and carries no state between calls.
//!
//! Policy, in order:
//!
//! 1. anonymous caller, requirement empty or contains
//!    [`Role::UnauthenticatedOnly`] → allow;
//! 2. anonymous caller otherwise → redirect to the login page with `backTo`;
//! 3. signed-in caller on an anonymous-only page → 403;
//! 4. signed-in caller, requirement empty or contains [`Role::All`] → allow;
//! 5. signed-in caller sharing at least one role with the requirement → allow,
//!    otherwise 401.

use url::form_urlencoded;

use crate::identity::Identity;
use crate::roles::{Role, RoleSet};

/// Path of the login page that anonymous callers are sent to.
pub const LOGIN_PATH: &str = "/auth/login";

/// Shown when a caller lacks every role a page requires.
pub const MSG_NO_PERMISSION: &str = "Bạn không có quyền truy cập trang này";

/// Shown when a signed-in caller opens a page reserved for anonymous callers.
pub const MSG_ALREADY_SIGNED_IN: &str = "Bạn đã đăng nhập, không thể truy cập trang này";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Send the caller to this location (already encoded).
    Redirect(String),
    Deny(Denial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// 401: no overlap between the caller's roles and the requirement.
    MissingRole,
    /// 403: signed-in caller on an anonymous-only page.
    AlreadySignedIn,
}

impl Denial {
    pub const fn status_code(self) -> u16 {
        match self {
            Denial::MissingRole => 401,
            Denial::AlreadySignedIn => 403,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Denial::MissingRole => MSG_NO_PERMISSION,
            Denial::AlreadySignedIn => MSG_ALREADY_SIGNED_IN,
        }
    }
}

/// Decide whether `identity` may reach a page guarded by `required`.
///
/// `path_and_query` is the original request target (e.g. `/users?page=2`)
/// and is only used to build the `backTo` parameter of a login redirect.
pub fn check(identity: Option<&Identity>, required: RoleSet, path_and_query: &str) -> AccessDecision {
    let anonymous_only = required.contains(Role::UnauthenticatedOnly);

    let Some(identity) = identity else {
        if anonymous_only || required.is_empty() {
            return AccessDecision::Allow;
        }
        return AccessDecision::Redirect(login_redirect(path_and_query));
    };

    if anonymous_only {
        return AccessDecision::Deny(Denial::AlreadySignedIn);
    }

    if required.is_empty() || required.contains(Role::All) {
        return AccessDecision::Allow;
    }

    if identity.roles.intersects(required) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(Denial::MissingRole)
    }
}

/// Whether `identity` would be allowed through `required`.
///
/// Convenience for menus and feature lists; anonymous callers only see
/// unguarded entries.
pub fn is_allowed(identity: Option<&Identity>, required: RoleSet) -> bool {
    matches!(check(identity, required, "/"), AccessDecision::Allow)
}

/// `/auth/login?backTo=<path>` with the path form-URL-encoded.
pub fn login_redirect(path_and_query: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("backTo", path_and_query)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn identity(roles: &[Role]) -> Identity {
        Identity::new(
            "1".into(),
            "staff@clinic.vn".into(),
            "jti-1".into(),
            RoleSet::of(roles),
            "token".into(),
        )
    }

    const ADMIN_ONLY: RoleSet = RoleSet::of(&[Role::Admin]);

    #[test]
    fn anonymous_on_guarded_page_redirects_with_encoded_back_path() {
        let decision = check(None, ADMIN_ONLY, "/users");
        assert_eq!(
            decision,
            AccessDecision::Redirect("/auth/login?backTo=%2Fusers".into())
        );
    }

    #[test]
    fn back_path_keeps_query_string() {
        let decision = check(None, ADMIN_ONLY, "/users?page=2&q=an bình");
        assert_matches!(decision, AccessDecision::Redirect(loc) => {
            assert_eq!(
                loc,
                "/auth/login?backTo=%2Fusers%3Fpage%3D2%26q%3Dan+b%C3%ACnh"
            );
        });
    }

    #[test]
    fn anonymous_on_all_page_is_still_redirected() {
        let decision = check(None, RoleSet::of(&[Role::All]), "/profile");
        assert_matches!(decision, AccessDecision::Redirect(_));
    }

    #[test]
    fn anonymous_on_public_or_anonymous_only_page_is_allowed() {
        assert_eq!(check(None, RoleSet::EMPTY, "/"), AccessDecision::Allow);
        assert_eq!(
            check(None, RoleSet::of(&[Role::UnauthenticatedOnly]), "/auth/login"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn signed_in_on_anonymous_only_page_is_forbidden() {
        let doctor = identity(&[Role::Doctor]);
        let decision = check(
            Some(&doctor),
            RoleSet::of(&[Role::UnauthenticatedOnly]),
            "/auth/login",
        );
        assert_eq!(decision, AccessDecision::Deny(Denial::AlreadySignedIn));
        assert_eq!(Denial::AlreadySignedIn.status_code(), 403);
    }

    #[test]
    fn all_sentinel_and_empty_requirement_allow_any_signed_in_caller() {
        let patient = identity(&[Role::Patient]);
        assert_eq!(
            check(Some(&patient), RoleSet::of(&[Role::All]), "/schedule"),
            AccessDecision::Allow
        );
        assert_eq!(
            check(Some(&patient), RoleSet::EMPTY, "/"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn missing_role_is_unauthorized_with_fixed_message() {
        let doctor = identity(&[Role::Doctor]);
        let decision = check(Some(&doctor), ADMIN_ONLY, "/users");
        assert_eq!(decision, AccessDecision::Deny(Denial::MissingRole));
        assert_eq!(Denial::MissingRole.status_code(), 401);
        assert_eq!(
            Denial::MissingRole.message(),
            "Bạn không có quyền truy cập trang này"
        );
    }

    #[test]
    fn any_shared_role_is_enough() {
        let nurse_and_receptionist = identity(&[Role::Nurse, Role::Receptionist]);
        let required = RoleSet::of(&[Role::Doctor, Role::Nurse]);
        assert_eq!(
            check(Some(&nurse_and_receptionist), required, "/patients/3"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn caller_without_roles_never_passes_a_role_requirement() {
        let nobody = identity(&[]);
        for role in crate::roles::STAFF_ROLES {
            assert_eq!(
                check(Some(&nobody), RoleSet::of(&[role]), "/x"),
                AccessDecision::Deny(Denial::MissingRole)
            );
        }
    }

    #[test]
    fn decision_is_repeatable() {
        let doctor = identity(&[Role::Doctor]);
        let first = check(Some(&doctor), ADMIN_ONLY, "/users");
        let second = check(Some(&doctor), ADMIN_ONLY, "/users");
        assert_eq!(first, second);

        assert_eq!(check(None, ADMIN_ONLY, "/users"), check(None, ADMIN_ONLY, "/users"));
    }

    #[test]
    fn is_allowed_hides_guarded_entries_from_anonymous_callers() {
        assert!(!is_allowed(None, ADMIN_ONLY));
        assert!(is_allowed(None, RoleSet::EMPTY));
        assert!(is_allowed(Some(&identity(&[Role::Admin])), ADMIN_ONLY));
    }
}
