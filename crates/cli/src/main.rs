use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{
    DischargeOutcome, DischargeView, HttpWardApi, Navigator, Patient, PatientSummary, ReportView,
    Route, ViewMode, WardApi, WardConfig,
};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward patient management from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List active patients
    Patients,
    /// Show the daily report
    Report {
        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Grouping: specialty or day
        #[arg(long)]
        view: Option<ViewMode>,
        /// Write the report as a PDF to this path
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Print the report even when writing a PDF
        #[arg(long)]
        print: bool,
    },
    /// Request discharge of a patient found by MRN
    Discharge {
        /// Medical record number
        #[arg(long)]
        mrn: String,
        /// Discharge notes
        #[arg(long)]
        notes: String,
    },
}

/// Remembers where the view asked to go; `main` shows that view afterwards.
#[derive(Default)]
struct ConsoleNavigator {
    target: Option<Route>,
}

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, route: Route) {
        if route == Route::Home {
            println!("Returning to home.");
        }
        self.target = Some(route);
    }
}

fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No active patients.");
        return;
    }
    println!("Active Patients");
    for patient in patients {
        let s = PatientSummary::from_patient_in(patient, &Local);
        println!(
            "MRN: {}, Name: {}, Admitted: {}, Specialty: {}, Bed: {}",
            s.mrn,
            s.name,
            s.admitted,
            s.specialty,
            s.bed_number.as_deref().unwrap_or("-")
        );
    }
}

async fn list_patients(api: &dyn WardApi) -> anyhow::Result<()> {
    let patients = api
        .get_patients()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load patients: {}", e.user_message()))?;
    print_patients(&patients);
    Ok(())
}

async fn report(
    api: &dyn WardApi,
    date: Option<NaiveDate>,
    view: Option<ViewMode>,
    pdf: Option<PathBuf>,
    print: bool,
) -> anyhow::Result<()> {
    let mut report_view = ReportView::mount_local().with_selection(date, view);
    eprintln!("Loading...");
    report_view.load(api).await;

    if let Some(message) = report_view.error() {
        anyhow::bail!("{message}");
    }
    let Some(rendered) = report_view.render() else {
        anyhow::bail!("report data is not available");
    };

    if let Some(path) = &pdf {
        // An export failure leaves the rendered report usable for printing.
        match ward_export::write_pdf(&rendered, path) {
            Ok(()) => eprintln!("Wrote {}", path.display()),
            Err(e) => eprintln!("Error exporting PDF: {}", e),
        }
    }
    if pdf.is_none() || print {
        print!("{}", ward_export::render_text(&rendered));
    }
    Ok(())
}

async fn discharge(api: &dyn WardApi, mrn: &str, notes: String) -> anyhow::Result<()> {
    let patients = api
        .get_patients()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load patients: {}", e.user_message()))?;

    let mut view = DischargeView::new(&patients);
    if view.search(mrn).is_none() {
        anyhow::bail!("{}", view.error().unwrap_or("No match"));
    }
    view.set_discharge_notes(notes);

    let mut navigator = ConsoleNavigator::default();
    match view.request_discharge(api, &mut navigator).await {
        DischargeOutcome::Discharged(patient) => {
            println!("Discharge requested for {} (MRN {}).", patient.name, patient.mrn);
        }
        DischargeOutcome::Failed(message) => anyhow::bail!("{message}"),
        DischargeOutcome::NotReady => anyhow::bail!("Discharge notes cannot be empty."),
        DischargeOutcome::Ignored => {}
    }

    if navigator.target == Some(Route::Home) {
        list_patients(api).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = WardConfig::from_values(
        std::env::var("WARD_API_URL").ok(),
        std::env::var("WARD_ADDR").ok(),
        std::env::var("WARD_API_TIMEOUT_SECS").ok(),
    )?;
    let api = HttpWardApi::new(&cfg)?;
    tracing::debug!("using backend {}", cfg.api_base_url());

    match cli.command {
        Some(Commands::Patients) => list_patients(&api).await?,
        Some(Commands::Report {
            date,
            view,
            pdf,
            print,
        }) => report(&api, date, view, pdf, print).await?,
        Some(Commands::Discharge { mrn, notes }) => discharge(&api, &mrn, notes).await?,
        None => {
            println!("Use 'ward --help' for commands");
        }
    }

    Ok(())
}
