//! Terminal dashboard for the CareConnect backend.
//!
//! Role-grouped subcommands mirror the web dashboard's views: patients
//! register and book, doctors review schedules and record diagnoses and
//! prescriptions, nurses capture vitals, admins read the counters. All
//! business logic stays server-side; this client only shapes input
//! (date + time combination) and renders responses as tables and charts.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use serde_json::{Value, json};

#[derive(Parser)]
#[command(name = "dashboard", about = "Terminal dashboard for the CareConnect backend")]
struct Cli {
    /// Backend base URL.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    role: RoleCommand,
}

#[derive(Subcommand)]
enum RoleCommand {
    /// Patient portal: registration, booking, history, and the assistant.
    #[command(subcommand)]
    Patient(PatientCommand),
    /// Doctor dashboard: schedule, patients, and clinical records.
    #[command(subcommand)]
    Doctor(DoctorCommand),
    /// Nurse station: vitals intake and today's schedule.
    #[command(subcommand)]
    Nurse(NurseCommand),
    /// Admin analytics: counters and full listings.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum PatientCommand {
    /// Register a user account and its patient profile in one step.
    Register(RegisterArgs),
    /// Book an appointment with a doctor.
    Book(BookArgs),
    /// List your appointments, newest first.
    Appointments {
        #[arg(long)]
        patient_id: String,
    },
    /// Ask the symptom checker for possible conditions.
    Symptoms {
        /// Free-text symptom description.
        text: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Chat with the intake bot; the transcript stays on this terminal.
    Chat,
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    age: Option<i32>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    blood_group: Option<String>,
    #[arg(long)]
    allergies: Option<String>,
    #[arg(long)]
    medical_history: Option<String>,
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    patient_id: String,
    #[arg(long)]
    doctor_id: String,
    #[arg(long)]
    department: Option<String>,
    /// Appointment date, e.g. 2026-03-14.
    #[arg(long)]
    date: NaiveDate,
    /// Appointment time, e.g. 14:30.
    #[arg(long)]
    time: NaiveTime,
}

#[derive(Subcommand)]
enum DoctorCommand {
    /// List your appointments.
    Appointments {
        #[arg(long)]
        doctor_id: String,
    },
    /// List the patients you have appointments with.
    Patients {
        #[arg(long)]
        doctor_id: String,
    },
    /// Record a diagnosis.
    Diagnose(DiagnoseArgs),
    /// List your diagnoses, newest first.
    Diagnoses {
        #[arg(long)]
        doctor_id: String,
    },
    /// Issue a prescription.
    Prescribe(PrescribeArgs),
    /// List your prescriptions, newest first.
    Prescriptions {
        #[arg(long)]
        doctor_id: String,
    },
    /// Show a patient's vitals with charts for numeric readings.
    Vitals {
        #[arg(long)]
        patient_id: String,
    },
}

#[derive(Args)]
struct DiagnoseArgs {
    #[arg(long)]
    doctor_id: String,
    #[arg(long)]
    patient_id: String,
    #[arg(long)]
    appointment_id: Option<String>,
    #[arg(long)]
    summary: String,
    #[arg(long)]
    details: Option<String>,
}

#[derive(Args)]
struct PrescribeArgs {
    #[arg(long)]
    doctor_id: String,
    #[arg(long)]
    patient_id: String,
    #[arg(long)]
    medication: String,
    #[arg(long)]
    dosage: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    start_date: Option<NaiveDate>,
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum NurseCommand {
    /// List today's appointments.
    Today,
    /// Record a vitals reading.
    Vitals(RecordVitalsArgs),
}

#[derive(Args)]
struct RecordVitalsArgs {
    #[arg(long)]
    patient_id: String,
    #[arg(long)]
    temperature: String,
    #[arg(long)]
    pulse: String,
    #[arg(long)]
    blood_pressure: String,
    #[arg(long)]
    oxygen: String,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// System counters.
    Stats,
    /// Every user.
    Users,
    /// Every appointment.
    Appointments,
    /// Every vitals reading.
    Vitals,
}

/// Thin wrapper over the backend's HTTP surface.
struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self.http.get(format!("{}{path}", self.base_url)).send().await?;
        Self::decode(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(eyre!("request failed ({status}): {text}"));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a JSON array of objects as an aligned text table.
fn render_table(rows: &Value) {
    let Some(rows) = rows.as_array() else {
        println!("{rows}");
        return;
    };
    if rows.is_empty() {
        println!("(no records)");
        return;
    }
    let Some(first) = rows[0].as_object() else {
        for row in rows {
            println!("{row}");
        }
        return;
    };

    let columns: Vec<String> = first.keys().cloned().collect();
    let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let rendered: Vec<String> = columns
            .iter()
            .map(|column| cell_text(row.get(column).unwrap_or(&Value::Null)))
            .collect();
        for (width, cell) in widths.iter_mut().zip(&rendered) {
            *width = (*width).max(cell.len());
        }
        cells.push(rendered);
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{column:<width$}"))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(header.join("  ").len()));
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Render a JSON object as key/value lines.
fn render_object(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{value}");
        return;
    };
    let width = map.keys().map(String::len).max().unwrap_or(0);
    for (key, entry) in map {
        match entry.as_object() {
            Some(nested) => {
                println!("{key:<width$}");
                for (nested_key, nested_value) in nested {
                    println!("  {nested_key}: {}", cell_text(nested_value));
                }
            }
            None => println!("{key:<width$}  {}", cell_text(entry)),
        }
    }
}

/// Columns whose values all parse as numbers, in first-row order.
///
/// Identifier and timestamp columns are excluded; everything else that
/// parses is chartable, mirroring the web dashboard's numeric-column
/// detection.
fn numeric_columns(rows: &[Value]) -> Vec<String> {
    const SKIPPED: [&str; 4] = ["id", "patient_id", "notes", "recorded_at"];
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return Vec::new();
    };
    first
        .keys()
        .filter(|column| !SKIPPED.contains(&column.as_str()))
        .filter(|column| {
            rows.iter().all(|row| {
                row.get(column.as_str())
                    .map(|value| cell_text(value).parse::<f64>().is_ok())
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Bar charts for the numeric vitals columns.
fn render_vitals_charts(rows: &Value) {
    let Some(rows) = rows.as_array() else { return };
    let columns = numeric_columns(rows);
    if columns.is_empty() {
        println!("(no numeric vitals columns to chart)");
        return;
    }

    const BAR_WIDTH: f64 = 40.0;
    for column in columns {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| cell_text(row.get(column.as_str())?).parse().ok())
            .collect();
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        println!("\n{column}");
        for (row, value) in rows.iter().zip(&values) {
            let label = row
                .get("recorded_at")
                .map(cell_text)
                .unwrap_or_default();
            let bar_len = if max > 0.0 {
                ((value / max) * BAR_WIDTH).round() as usize
            } else {
                0
            };
            println!("  {label:<25}  {} {value}", "#".repeat(bar_len.max(1)));
        }
    }
}

async fn register_patient(client: &ApiClient, args: RegisterArgs) -> Result<()> {
    let user = client
        .post(
            "/users",
            &json!({
                "name": args.name,
                "email": args.email,
                "phone": args.phone,
                "role": "Patient",
            }),
        )
        .await?;
    let user_id = user
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| eyre!("user response carried no id"))?;

    let patient = client
        .post(
            "/patients",
            &json!({
                "user_id": user_id,
                "age": args.age,
                "gender": args.gender,
                "blood_group": args.blood_group,
                "allergies": args.allergies,
                "medical_history": args.medical_history,
            }),
        )
        .await?;
    println!(
        "Registered. user id: {user_id}, patient id: {}",
        patient.get("id").map(cell_text).unwrap_or_default()
    );
    Ok(())
}

async fn chat(client: &ApiClient) -> Result<()> {
    println!("Intake chat. Empty line or 'quit' to leave.");
    let stdin = io::stdin();
    let mut transcript: Vec<(String, String)> = Vec::new();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() || message == "quit" {
            break;
        }
        let response = client
            .post("/ai/intake-chat", &json!({ "message": message }))
            .await?;
        let reply = response
            .get("reply")
            .map(cell_text)
            .unwrap_or_default();
        println!("bot> {reply}");
        transcript.push((message.to_owned(), reply));
    }
    println!("({} exchanges this session)", transcript.len());
    Ok(())
}

async fn run_patient(client: &ApiClient, command: PatientCommand) -> Result<()> {
    match command {
        PatientCommand::Register(args) => register_patient(client, args).await,
        PatientCommand::Book(args) => {
            let scheduled_time = args.date.and_time(args.time).and_utc();
            let appointment = client
                .post(
                    "/appointments",
                    &json!({
                        "patient_id": args.patient_id,
                        "doctor_id": args.doctor_id,
                        "department": args.department,
                        "scheduled_time": scheduled_time.to_rfc3339(),
                    }),
                )
                .await?;
            println!(
                "Booked. appointment id: {}",
                appointment.get("id").map(cell_text).unwrap_or_default()
            );
            Ok(())
        }
        PatientCommand::Appointments { patient_id } => {
            let rows = client.get(&format!("/appointments/patient/{patient_id}")).await?;
            render_table(&rows);
            Ok(())
        }
        PatientCommand::Symptoms { text, note } => {
            let response = client
                .post(
                    "/ai/diagnosis-assistant",
                    &json!({ "symptoms": text, "vitals_note": note }),
                )
                .await?;
            println!("Possible conditions:");
            if let Some(conditions) = response
                .get("possible_conditions")
                .and_then(Value::as_array)
            {
                for condition in conditions {
                    println!("  - {}", cell_text(condition));
                }
            }
            println!("{}", response.get("advice").map(cell_text).unwrap_or_default());
            Ok(())
        }
        PatientCommand::Chat => chat(client).await,
    }
}

async fn run_doctor(client: &ApiClient, command: DoctorCommand) -> Result<()> {
    match command {
        DoctorCommand::Appointments { doctor_id } => {
            let rows = client.get(&format!("/doctor/{doctor_id}/appointments")).await?;
            render_table(&rows);
            Ok(())
        }
        DoctorCommand::Patients { doctor_id } => {
            let rows = client.get(&format!("/doctor/{doctor_id}/patients")).await?;
            render_table(&rows);
            Ok(())
        }
        DoctorCommand::Diagnose(args) => {
            let diagnosis = client
                .post(
                    "/doctor/diagnosis",
                    &json!({
                        "patient_id": args.patient_id,
                        "doctor_id": args.doctor_id,
                        "appointment_id": args.appointment_id,
                        "summary": args.summary,
                        "details": args.details,
                    }),
                )
                .await?;
            println!(
                "Diagnosis saved: {}",
                diagnosis.get("id").map(cell_text).unwrap_or_default()
            );
            Ok(())
        }
        DoctorCommand::Diagnoses { doctor_id } => {
            let rows = client.get(&format!("/doctor/{doctor_id}/diagnoses")).await?;
            render_table(&rows);
            Ok(())
        }
        DoctorCommand::Prescribe(args) => {
            let prescription = client
                .post(
                    "/doctor/prescription",
                    &json!({
                        "patient_id": args.patient_id,
                        "doctor_id": args.doctor_id,
                        "medication_name": args.medication,
                        "dosage": args.dosage,
                        "instructions": args.instructions,
                        "start_date": args.start_date,
                        "end_date": args.end_date,
                    }),
                )
                .await?;
            println!(
                "Prescription saved: {}",
                prescription.get("id").map(cell_text).unwrap_or_default()
            );
            Ok(())
        }
        DoctorCommand::Prescriptions { doctor_id } => {
            let rows = client.get(&format!("/doctor/{doctor_id}/prescriptions")).await?;
            render_table(&rows);
            Ok(())
        }
        DoctorCommand::Vitals { patient_id } => {
            let rows = client.get(&format!("/vitals/{patient_id}")).await?;
            render_table(&rows);
            render_vitals_charts(&rows);
            Ok(())
        }
    }
}

async fn run_nurse(client: &ApiClient, command: NurseCommand) -> Result<()> {
    match command {
        NurseCommand::Today => {
            let rows = client.get("/nurse/today-appointments").await?;
            render_table(&rows);
            Ok(())
        }
        NurseCommand::Vitals(args) => {
            let vitals = client
                .post(
                    "/nurse/vitals",
                    &json!({
                        "patient_id": args.patient_id,
                        "temperature": args.temperature,
                        "pulse": args.pulse,
                        "blood_pressure": args.blood_pressure,
                        "oxygen": args.oxygen,
                        "notes": args.notes,
                    }),
                )
                .await?;
            println!(
                "Vitals saved: {}",
                vitals.get("id").map(cell_text).unwrap_or_default()
            );
            Ok(())
        }
    }
}

async fn run_admin(client: &ApiClient, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Stats => {
            let stats = client.get("/admin/stats").await?;
            render_object(&stats);
            Ok(())
        }
        AdminCommand::Users => {
            let rows = client.get("/admin/users").await?;
            render_table(&rows);
            Ok(())
        }
        AdminCommand::Appointments => {
            let rows = client.get("/admin/appointments").await?;
            render_table(&rows);
            Ok(())
        }
        AdminCommand::Vitals => {
            let rows = client.get("/admin/vitals").await?;
            render_table(&rows);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let client = ApiClient::new(cli.base_url);

    match cli.role {
        RoleCommand::Patient(command) => run_patient(&client, command).await,
        RoleCommand::Doctor(command) => run_doctor(&client, command).await,
        RoleCommand::Nurse(command) => run_nurse(&client, command).await,
        RoleCommand::Admin(command) => run_admin(&client, command).await,
    }
}
