//! CLI entry point for the school vaccination console.
//!
//! Provides subcommands for logging in, managing students and drives,
//! enrolling students, viewing the dashboard and paging through or
//! exporting the vaccination report.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vax_console::{
    api::{self, ApiClient},
    config::ConsoleConfig,
    dashboard::summarize_upcoming,
    error::ConsoleError,
    export::{CSV_FILE_NAME, PDF_FILE_NAME, csv::to_csv, pdf::ReportTable, pdf::render_pdf},
    fetch::{BasicClient, auth::Bearer},
    model::{Credentials, DriveForm, EnrollmentForm, Flag, StudentForm},
    output::{print_json, save_artifact},
    report::{Query, ReportView},
    session::SessionStore,
};

type Client = ApiClient<Bearer<BasicClient, SessionStore>>;

#[derive(Parser)]
#[command(name = "vax-console")]
#[command(about = "Administrative console for the school vaccination program", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token for later commands
    Login {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show vaccination drives inside the upcoming window
    Dashboard {
        /// Lookahead in days (defaults to VAX_UPCOMING_WINDOW_DAYS)
        #[arg(short, long)]
        window_days: Option<i64>,

        /// Print the drive summaries as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// List, add or edit students
    Students {
        #[command(subcommand)]
        action: StudentAction,
    },
    /// List, add or edit vaccination drives
    Drives {
        #[command(subcommand)]
        action: DriveAction,
    },
    /// Enroll a student in a vaccination drive
    Enroll {
        /// Student uniqueId
        #[arg(short, long)]
        student: Option<i64>,

        /// Drive uniqueId
        #[arg(short, long)]
        drive: Option<i64>,
    },
    /// Show one page of the vaccination report
    Report {
        /// Only students of this drive (uniqueId)
        #[arg(short, long)]
        drive: Option<i64>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to VAX_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<usize>,

        /// Print the page rows as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Export the full (filtered) vaccination report
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Only students of this drive (uniqueId)
        #[arg(short, long)]
        drive: Option<i64>,

        /// Directory the report file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum StudentAction {
    List,
    Add {
        #[command(flatten)]
        fields: StudentFields,
    },
    Edit {
        /// uniqueId of the student to replace
        unique_id: i64,

        #[command(flatten)]
        fields: StudentFields,
    },
}

#[derive(clap::Args)]
struct StudentFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    class: Option<String>,

    /// School-issued student id
    #[arg(long)]
    id: Option<String>,
}

impl From<StudentFields> for StudentForm {
    fn from(f: StudentFields) -> Self {
        StudentForm {
            name: f.name.unwrap_or_default(),
            class: f.class.unwrap_or_default(),
            id: f.id.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum DriveAction {
    List,
    Add {
        #[command(flatten)]
        fields: DriveFields,
    },
    Edit {
        /// uniqueId of the drive to replace
        unique_id: i64,

        #[command(flatten)]
        fields: DriveFields,
    },
}

#[derive(clap::Args)]
struct DriveFields {
    #[arg(long)]
    name: Option<String>,

    /// Drive date, YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    total_doses: Option<u32>,

    #[arg(long)]
    available_doses: Option<u32>,
}

impl From<DriveFields> for DriveForm {
    fn from(f: DriveFields) -> Self {
        DriveForm {
            name: f.name.unwrap_or_default(),
            date_of_drive: f.date,
            total_doses: f.total_doses,
            number_of_available_doses: f.available_doses,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Pdf,
}

impl Commands {
    /// Static message shown when the command fails on the network side.
    fn failure_message(&self) -> &'static str {
        match self {
            Commands::Login { .. } => "Server error. Please try again.",
            Commands::Logout => "Failed to clear session.",
            Commands::Dashboard { .. } => "Failed to load dashboard data.",
            Commands::Students {
                action: StudentAction::List,
            } => "Failed to load student data.",
            Commands::Students { .. } => "Failed to save student.",
            Commands::Drives {
                action: DriveAction::List,
            } => "Failed to load vaccination drives.",
            Commands::Drives { .. } => "Failed to save drive.",
            Commands::Enroll { .. } => "Failed to enroll student in vaccination drive.",
            Commands::Report { .. } => "Failed to load report data.",
            Commands::Export { .. } => "Failed to export report.",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vax_console.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vax_console.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::from_env()?;
    let failure = cli.command.failure_message();

    if let Err(e) = run(cli.command, &config).await {
        error!(error = %e, "Action failed");
        anyhow::bail!(e.user_message(failure));
    }

    Ok(())
}

fn api_client(config: &ConsoleConfig) -> Result<Client, ConsoleError> {
    let http = BasicClient::new(config.http_timeout, config.accept_invalid_certs)?;
    let tokens = SessionStore::new(&config.session_file);
    Ok(ApiClient::new(
        Bearer::new(http, tokens),
        &config.api_base_url,
        &config.dashboard_base_url,
    ))
}

async fn run(command: Commands, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let session = SessionStore::new(&config.session_file);

    match command {
        Commands::Login { user, password } => {
            let http = BasicClient::new(config.http_timeout, config.accept_invalid_certs)?;
            let credentials = Credentials {
                user_name: user,
                password,
            };
            let token = api::login(&http, &config.api_base_url, &credentials).await?;
            session.save(&token)?;
            info!(session = %session.path().display(), "Logged in");
        }
        Commands::Logout => {
            session.clear()?;
            info!("Logged out");
        }
        Commands::Dashboard { window_days, json } => {
            let window_days = window_days.unwrap_or(config.upcoming_window_days);
            let drives = api_client(config)?.dashboard_drives().await?;
            let cards = summarize_upcoming(&drives, Utc::now(), window_days);

            if json {
                print_json(std::io::stdout().lock(), &cards)?;
            }

            if cards.is_empty() {
                info!("No upcoming vaccination drives within the next {window_days} days.");
            }

            for card in &cards {
                info!(
                    drive_id = card.unique_id,
                    drive_name = %card.name,
                    date = %card.date_of_drive.format("%Y-%m-%d"),
                    total_students = card.total_students,
                    vaccinated_students = card.vaccinated_students,
                    vaccinated_percentage = %format!("{:.1}", card.vaccinated_percentage),
                    total_doses = card.total_doses,
                    available_doses = card.available_doses,
                    remaining_doses = card.remaining_doses,
                    mappings = card.mapping_count,
                    "Drive"
                );
            }

            info!(total = drives.len(), upcoming = cards.len(), "Dashboard summary");
        }
        Commands::Students { action } => students(action, config).await?,
        Commands::Drives { action } => drives(action, config).await?,
        Commands::Enroll { student, drive } => {
            let payload = EnrollmentForm {
                student_unique_id: student,
                drive_unique_id: drive,
            }
            .into_payload(Flag::Insert)?;
            api_client(config)?.enroll(&payload).await?;
            info!("Student enrolled successfully in the vaccination drive.");
        }
        Commands::Report {
            drive,
            page,
            page_size,
            json,
        } => {
            let client = api_client(config)?;
            let options = client.list_drives().await?;
            debug!(count = options.len(), "Drive filter options loaded");
            if let Some(id) = drive {
                if !options.iter().any(|d| d.unique_id == id) {
                    return Err(ConsoleError::ValidationMissing(format!(
                        "Unknown vaccination drive {id}."
                    )));
                }
            }

            let page_size = page_size.unwrap_or(config.page_size);
            let query = Query::default()
                .with_drive(drive)
                .with_page(page.saturating_sub(1));
            let view = ReportView::open_at(client, page_size, query).await?;

            let current = view.page();
            if json {
                print_json(std::io::stdout().lock(), current.items)?;
            }
            for s in current.items {
                info!(
                    student = %s.name,
                    class = %s.class,
                    vaccinated = if s.is_vaccinated { "Yes" } else { "No" },
                    date = %s
                        .date_of_vaccination
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "—".to_string()),
                    vaccine = s.vaccine_name.as_deref().unwrap_or("—"),
                    "Row"
                );
            }
            info!(
                page,
                page_size,
                page_count = current.page_count,
                rows = view.rows().len(),
                "Report page"
            );
        }
        Commands::Export {
            format,
            drive,
            output_dir,
        } => {
            let query = Query::default().with_drive(drive);
            let view = ReportView::open_at(api_client(config)?, config.page_size, query).await?;

            let path = match format {
                ExportFormat::Csv => {
                    let text = to_csv(view.rows())?;
                    save_artifact(&output_dir, CSV_FILE_NAME, text.as_bytes())?
                }
                ExportFormat::Pdf => {
                    let table = ReportTable::from_students(view.rows());
                    let bytes = render_pdf(&table, &config.fonts)?;
                    save_artifact(&output_dir, PDF_FILE_NAME, &bytes)?
                }
            };
            info!(path = %path.display(), rows = view.rows().len(), "Report exported");
        }
    }

    Ok(())
}

async fn students(action: StudentAction, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let client = api_client(config)?;

    let (form, editing): (StudentForm, Option<i64>) = match action {
        StudentAction::List => {
            let students = client.list_students(None).await?;
            if students.is_empty() {
                info!("No students found.");
            }
            for s in &students {
                info!(
                    unique_id = s.unique_id,
                    student_id = %s.id,
                    name = %s.name,
                    class = %s.class,
                    created = ?s.created_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    modified = ?s.modified_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    "Student"
                );
            }
            return Ok(());
        }
        StudentAction::Add { fields } => (fields.into(), None),
        StudentAction::Edit { unique_id, fields } => (fields.into(), Some(unique_id)),
    };

    let payload = form.into_payload(editing, Utc::now())?;
    client.submit_student(&payload).await?;
    if editing.is_some() {
        info!("Student updated successfully!");
    } else {
        info!("Student added successfully!");
    }
    Ok(())
}

async fn drives(action: DriveAction, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let client = api_client(config)?;

    let (form, editing): (DriveForm, Option<i64>) = match action {
        DriveAction::List => {
            let drives = client.list_drives().await?;
            if drives.is_empty() {
                info!("No vaccination drives found.");
            }
            for d in &drives {
                info!(
                    unique_id = d.unique_id,
                    name = %d.name,
                    date = %d.date_of_drive.format("%Y-%m-%d"),
                    total_doses = d.total_doses,
                    available_doses = d.number_of_available_doses,
                    "Drive"
                );
            }
            return Ok(());
        }
        DriveAction::Add { fields } => (fields.into(), None),
        DriveAction::Edit { unique_id, fields } => (fields.into(), Some(unique_id)),
    };

    let payload = form.into_payload(editing, Utc::now())?;
    client.submit_drive(&payload).await?;
    if editing.is_some() {
        info!("Drive updated!");
    } else {
        info!("Drive added!");
    }
    Ok(())
}
