//! Navigation features and the role sets that guard them.
//!
//! Each feature is a top-level section of the application. The role set of a
//! feature is also the requirement of its page, so the menu never offers a
//! link the access filter would reject.

use serde::Serialize;

use crate::access;
use crate::identity::Identity;
use crate::roles::{Role, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserFeature {
    UsersManagement,
    ServicesManagement,
    MaterialsManagement,
    PatientsManagement,
    ScheduleManagement,
    PaymentManagement,
    Statistic,
    Applications,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDetail {
    pub id: UserFeature,
    pub title: &'static str,
    pub fa_icon: &'static str,
    pub has_duotone: bool,
    pub url: &'static str,
    #[serde(skip)]
    pub roles: RoleSet,
}

pub const USERS_ROLES: RoleSet = RoleSet::of(&[Role::Admin]);
pub const SERVICES_ROLES: RoleSet = RoleSet::of(&[Role::Admin, Role::Doctor, Role::Accountant]);
pub const MATERIALS_ROLES: RoleSet =
    RoleSet::of(&[Role::Admin, Role::Doctor, Role::Nurse, Role::Accountant]);
pub const PATIENTS_ROLES: RoleSet =
    RoleSet::of(&[Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist]);
pub const SCHEDULE_ROLES: RoleSet = RoleSet::of(&[Role::All]);
pub const PAYMENT_ROLES: RoleSet =
    RoleSet::of(&[Role::Admin, Role::Accountant, Role::Receptionist]);
pub const STATISTIC_ROLES: RoleSet = RoleSet::of(&[Role::Admin, Role::Accountant]);
pub const APPLICATIONS_ROLES: RoleSet = RoleSet::of(&[Role::Admin]);

pub const ALL_FEATURES: [UserFeature; 8] = [
    UserFeature::UsersManagement,
    UserFeature::ServicesManagement,
    UserFeature::MaterialsManagement,
    UserFeature::PatientsManagement,
    UserFeature::ScheduleManagement,
    UserFeature::PaymentManagement,
    UserFeature::Statistic,
    UserFeature::Applications,
];

impl UserFeature {
    pub const fn detail(self) -> FeatureDetail {
        let (title, fa_icon, url, roles) = match self {
            UserFeature::UsersManagement => ("Nhân viên", "fa-users", "/users", USERS_ROLES),
            UserFeature::ServicesManagement => {
                ("Dịch vụ", "fa-teeth-open", "/services", SERVICES_ROLES)
            }
            UserFeature::MaterialsManagement => {
                ("Vật tư", "fa-capsules", "/materials", MATERIALS_ROLES)
            }
            UserFeature::PatientsManagement => {
                ("Bệnh nhân", "fa-bed-pulse", "/patients", PATIENTS_ROLES)
            }
            UserFeature::ScheduleManagement => {
                ("Đặt lịch", "fa-calendar-range", "/schedule", SCHEDULE_ROLES)
            }
            UserFeature::PaymentManagement => {
                ("Thanh toán", "fa-file-invoice-dollar", "/invoices", PAYMENT_ROLES)
            }
            UserFeature::Statistic => ("Thống kê", "fa-chart-mixed", "/statistic", STATISTIC_ROLES),
            UserFeature::Applications => {
                ("Đơn từ", "fa-envelope-open-text", "/applications", APPLICATIONS_ROLES)
            }
        };
        FeatureDetail {
            id: self,
            title,
            fa_icon,
            has_duotone: true,
            url,
            roles,
        }
    }

    pub const fn roles(self) -> RoleSet {
        self.detail().roles
    }
}

/// Features visible to the caller, in menu order.
pub fn visible_features(identity: Option<&Identity>) -> Vec<FeatureDetail> {
    ALL_FEATURES
        .into_iter()
        .map(UserFeature::detail)
        .filter(|detail| access::is_allowed(identity, detail.roles))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(roles: &[Role]) -> Identity {
        Identity::new("1".into(), "x@y.vn".into(), "j".into(), RoleSet::of(roles), "t".into())
    }

    #[test]
    fn anonymous_callers_see_no_features() {
        assert!(visible_features(None).is_empty());
    }

    #[test]
    fn admin_sees_every_feature() {
        let admin = identity(&[Role::Admin]);
        assert_eq!(visible_features(Some(&admin)).len(), ALL_FEATURES.len());
    }

    #[test]
    fn patient_only_sees_schedule() {
        let patient = identity(&[Role::Patient]);
        let urls: Vec<_> = visible_features(Some(&patient))
            .into_iter()
            .map(|f| f.url)
            .collect();
        assert_eq!(urls, vec!["/schedule"]);
    }

    #[test]
    fn nurse_menu() {
        let nurse = identity(&[Role::Nurse]);
        let urls: Vec<_> = visible_features(Some(&nurse))
            .into_iter()
            .map(|f| f.url)
            .collect();
        assert_eq!(urls, vec!["/materials", "/patients", "/schedule"]);
    }
}
