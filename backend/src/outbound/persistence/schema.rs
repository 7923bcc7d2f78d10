//! Diesel table definitions for the clinic schema.
//!
//! These must match the embedded migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        role -> Varchar,
        created_at -> Timestamptz,
        last_login -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Patient profiles; one per user (`user_id` is unique).
    patients (id) {
        id -> Uuid,
        user_id -> Uuid,
        age -> Nullable<Integer>,
        gender -> Nullable<Varchar>,
        blood_group -> Nullable<Varchar>,
        allergies -> Nullable<Varchar>,
        medical_history -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Booked appointments; status is stored as text.
    appointments (id) {
        id -> Uuid,
        patient_id -> Uuid,
        doctor_id -> Uuid,
        department -> Nullable<Varchar>,
        scheduled_time -> Timestamptz,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vitals readings; values are free-form text.
    vitals (id) {
        id -> Uuid,
        patient_id -> Uuid,
        temperature -> Varchar,
        pulse -> Varchar,
        blood_pressure -> Varchar,
        oxygen -> Varchar,
        notes -> Nullable<Varchar>,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Diagnoses, optionally linked to an appointment.
    diagnoses (id) {
        id -> Uuid,
        patient_id -> Uuid,
        doctor_id -> Uuid,
        appointment_id -> Nullable<Uuid>,
        summary -> Varchar,
        details -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued prescriptions.
    prescriptions (id) {
        id -> Uuid,
        patient_id -> Uuid,
        doctor_id -> Uuid,
        medication_name -> Varchar,
        dosage -> Nullable<Varchar>,
        instructions -> Nullable<Text>,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(patients -> users (user_id));
diesel::joinable!(appointments -> patients (patient_id));
diesel::joinable!(appointments -> users (doctor_id));
diesel::joinable!(vitals -> patients (patient_id));
diesel::joinable!(diagnoses -> patients (patient_id));
diesel::joinable!(diagnoses -> users (doctor_id));
diesel::joinable!(diagnoses -> appointments (appointment_id));
diesel::joinable!(prescriptions -> patients (patient_id));
diesel::joinable!(prescriptions -> users (doctor_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    patients,
    appointments,
    vitals,
    diagnoses,
    prescriptions,
);
