// src/handlers/support.rs
// Public listings; no authentication.
use crate::models::support::*;
use axum::{
    extract::Query,
    response::Json,
    routing::get,
    Router,
};

pub fn support_routes() -> Router {
    Router::new()
        .route("/support/emergency-contacts", get(get_emergency_contacts))
        .route("/support/mental-health-resources", get(get_mental_health_resources))
        .route("/support/counseling-services", get(get_counseling_services))
}

static EMERGENCY_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "National Suicide Prevention Lifeline",
        phone: Some("988"),
        text: None,
        available: "24/7",
        kind: ContactKind::Crisis,
    },
    EmergencyContact {
        name: "Crisis Text Line",
        phone: None,
        text: Some("HOME to 741741"),
        available: "24/7",
        kind: ContactKind::Crisis,
    },
    EmergencyContact {
        name: "University Counseling Center",
        phone: Some("(555) 123-4567"),
        text: None,
        available: "Mon-Fri 8AM-5PM",
        kind: ContactKind::Counseling,
    },
];

static MENTAL_HEALTH_RESOURCES: &[MentalHealthResource] = &[
    MentalHealthResource {
        title: "Managing University Stress",
        description: "Tips for handling academic pressure",
        url: "https://example.com/stress-management",
        kind: ResourceKind::Article,
        tags: &["stress", "academic"],
    },
    MentalHealthResource {
        title: "Mindfulness for Students",
        description: "Introduction to mindfulness practices",
        url: "https://example.com/mindfulness",
        kind: ResourceKind::Guide,
        tags: &["mindfulness", "meditation"],
    },
    MentalHealthResource {
        title: "Sleep Hygiene for Better Mental Health",
        description: "How good sleep supports mental wellbeing",
        url: "https://example.com/sleep-health",
        kind: ResourceKind::Article,
        tags: &["sleep", "health"],
    },
];

static COUNSELING_SERVICES: &[CounselingService] = &[
    CounselingService {
        name: "University Counseling and Psychological Services",
        address: "123 Campus Drive, Student Health Center",
        phone: "(555) 123-4567",
        services: &["Individual therapy", "Group therapy", "Crisis intervention"],
        cost: "Free for students",
        appointment_required: true,
    },
    CounselingService {
        name: "Community Mental Health Center",
        address: "456 Main Street",
        phone: "(555) 987-6543",
        services: &["Individual therapy", "Family therapy", "Medication management"],
        cost: "Sliding scale fees",
        appointment_required: true,
    },
];

async fn get_emergency_contacts() -> Json<EmergencyContactsResponse> {
    Json(EmergencyContactsResponse {
        contacts: EMERGENCY_CONTACTS,
    })
}

async fn get_mental_health_resources() -> Json<MentalHealthResourcesResponse> {
    Json(MentalHealthResourcesResponse {
        resources: MENTAL_HEALTH_RESOURCES,
    })
}

// TODO: filter by location once services carry a location field
async fn get_counseling_services(Query(params): Query<CounselingQuery>) -> Json<CounselingServicesResponse> {
    tracing::debug!(location = %params.location, "listing counseling services");
    Json(CounselingServicesResponse {
        services: COUNSELING_SERVICES,
    })
}
