//! Static registry of backend endpoints.
//!
//! Built once at start-up from `PUBLIC_API_HOST`. Handlers name the
//! operation they want ([`Endpoint`]) and never assemble URLs themselves.

use clinic_core::types::DbId;
use url::Url;

/// A logical backend operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    LoginUser,
    LoginPatient,
    Profile,
    EditProfile,
    ChangePassword,
    Users,
    User(DbId),
    Patients,
    Patient(DbId),
    Materials,
    MaterialTypes,
    Suppliers,
    MaterialImports,
    MaterialExports,
    Schedules,
    Schedule(DbId),
    /// Patient answer to an appointment reminder, authorized by the token.
    ConfirmSchedule { token: String, confirmed: bool },
    Record(DbId),
    PatientRecords(DbId),
    Prescription(DbId),
    PrescriptionDetails(DbId),
    Treatments,
    Queue,
    Payments,
    Statistics,
    Applications,
    EmployeeApplications,
}

impl Endpoint {
    /// Path segments below the API host.
    fn segments(&self) -> Vec<String> {
        let fixed = |parts: &[&str]| parts.iter().map(|p| (*p).to_string()).collect::<Vec<_>>();
        let with_id = |parts: &[&str], id: &DbId| {
            let mut segments = fixed(parts);
            segments.push(id.to_string());
            segments
        };

        match self {
            Endpoint::LoginUser => fixed(&["api", "authentication"]),
            Endpoint::LoginPatient => fixed(&["api", "authentication", "patient"]),
            Endpoint::Profile => fixed(&["api", "user", "ViewProfile"]),
            Endpoint::EditProfile => fixed(&["api", "user", "EditProfile"]),
            Endpoint::ChangePassword => fixed(&["api", "user", "ChangePassword"]),
            Endpoint::Users => fixed(&["api", "user"]),
            Endpoint::User(id) => with_id(&["api", "user"], id),
            Endpoint::Patients => fixed(&["api", "patients"]),
            Endpoint::Patient(id) => with_id(&["api", "patients"], id),
            Endpoint::Materials => fixed(&["api", "materials"]),
            Endpoint::MaterialTypes => fixed(&["api", "material-types"]),
            Endpoint::Suppliers => fixed(&["api", "suppliers"]),
            Endpoint::MaterialImports => fixed(&["api", "material-imports"]),
            Endpoint::MaterialExports => fixed(&["api", "material-exports"]),
            Endpoint::Schedules => fixed(&["api", "schedule"]),
            Endpoint::Schedule(id) => with_id(&["api", "schedule"], id),
            Endpoint::ConfirmSchedule { token, .. } => {
                let mut segments = fixed(&["api", "schedule", "confirm"]);
                segments.push(token.clone());
                segments
            }
            Endpoint::Record(id) => with_id(&["api", "records"], id),
            Endpoint::PatientRecords(id) => with_id(&["api", "records", "patient"], id),
            Endpoint::Prescription(id) => with_id(&["api", "prescriptions"], id),
            Endpoint::PrescriptionDetails(id) => {
                let mut segments = with_id(&["api", "prescriptions"], id);
                segments.push("details".to_string());
                segments
            }
            Endpoint::Treatments => fixed(&["api", "treatments"]),
            Endpoint::Queue => fixed(&["api", "queue"]),
            Endpoint::Payments => fixed(&["api", "payment"]),
            Endpoint::Statistics => fixed(&["api", "statistics"]),
            Endpoint::Applications => fixed(&["api", "applications"]),
            Endpoint::EmployeeApplications => fixed(&["api", "applications", "employee"]),
        }
    }

    /// Query pairs that are part of the endpoint itself.
    fn fixed_query(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Endpoint::ConfirmSchedule { confirmed, .. } => {
                Some(("confirmed", if *confirmed { "true" } else { "false" }))
            }
            _ => None,
        }
    }
}

/// Resolves [`Endpoint`]s against the configured API host.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    api_host: Url,
}

impl EndpointRegistry {
    /// A host with a path prefix (`https://host/clinic`) keeps the prefix.
    pub fn new(api_host: Url) -> Self {
        Self { api_host }
    }

    pub fn api_host(&self) -> &Url {
        &self.api_host
    }

    /// Absolute URL of `endpoint`. Path segments are percent-encoded.
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.api_host.clone();
        url.set_query(None);
        url.set_fragment(None);

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(endpoint.segments());
        }

        if let Some((key, value)) = endpoint.fixed_query() {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }

    /// [`url`](Self::url) with extra query pairs appended.
    pub fn url_with_query<K, V>(&self, endpoint: &Endpoint, pairs: &[(K, V)]) -> Url
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.url(endpoint);
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key.as_ref(), value.as_ref());
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(host: &str) -> EndpointRegistry {
        EndpointRegistry::new(Url::parse(host).unwrap())
    }

    #[test]
    fn paths_hang_off_the_api_host() {
        let reg = registry("http://localhost:5000");
        assert_eq!(
            reg.url(&Endpoint::LoginPatient).as_str(),
            "http://localhost:5000/api/authentication/patient"
        );
        assert_eq!(
            reg.url(&Endpoint::Profile).as_str(),
            "http://localhost:5000/api/user/ViewProfile"
        );
        assert_eq!(
            reg.url(&Endpoint::PrescriptionDetails(4)).as_str(),
            "http://localhost:5000/api/prescriptions/4/details"
        );
        assert_eq!(
            reg.url(&Endpoint::PatientRecords(9)).as_str(),
            "http://localhost:5000/api/records/patient/9"
        );
    }

    #[test]
    fn host_path_prefix_is_kept() {
        let reg = registry("https://benhvien.vn/clinic/");
        assert_eq!(
            reg.url(&Endpoint::Materials).as_str(),
            "https://benhvien.vn/clinic/api/materials"
        );
    }

    #[test]
    fn confirm_token_is_encoded_and_carries_the_answer() {
        let reg = registry("http://localhost:5000");
        let url = reg.url(&Endpoint::ConfirmSchedule {
            token: "ab/c d".into(),
            confirmed: true,
        });
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/schedule/confirm/ab%2Fc%20d?confirmed=true"
        );
    }

    #[test]
    fn extra_query_pairs_are_appended() {
        let reg = registry("http://localhost:5000");
        let url = reg.url_with_query(&Endpoint::Patients, &[("page", "1"), ("size", "10")]);
        assert_eq!(url.as_str(), "http://localhost:5000/api/patients?page=1&size=10");

        let none: [(&str, &str); 0] = [];
        assert_eq!(reg.url_with_query(&Endpoint::Queue, &none).query(), None);
    }
}
