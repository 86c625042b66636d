use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Crisis,
    Counseling,
}

#[derive(Debug, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'static str>,
    pub available: &'static str,
    #[serde(rename = "type")]
    pub kind: ContactKind,
}

#[derive(Debug, Serialize)]
pub struct EmergencyContactsResponse {
    pub contacts: &'static [EmergencyContact],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Guide,
}

#[derive(Debug, Serialize)]
pub struct MentalHealthResource {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct MentalHealthResourcesResponse {
    pub resources: &'static [MentalHealthResource],
}

#[derive(Debug, Serialize)]
pub struct CounselingService {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub services: &'static [&'static str],
    pub cost: &'static str,
    pub appointment_required: bool,
}

#[derive(Debug, Serialize)]
pub struct CounselingServicesResponse {
    pub services: &'static [CounselingService],
}

#[derive(Debug, Deserialize)]
pub struct CounselingQuery {
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "university".to_string()
}
