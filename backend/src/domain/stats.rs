//! Aggregate counters for the admin overview.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// System-wide counters shown on the admin dashboard.
///
/// Every field is populated: role totals come from role-filtered user
/// counts and `upcoming_appointments` counts appointments scheduled at or
/// after the moment the stats were gathered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClinicStats {
    pub total_users: i64,
    pub total_patients: i64,
    pub total_doctors: i64,
    pub total_nurses: i64,
    pub total_appointments: i64,
    pub upcoming_appointments: i64,
    pub total_vitals: i64,
    /// User count per role, keyed by the role's canonical text form.
    pub roles: BTreeMap<String, i64>,
}
