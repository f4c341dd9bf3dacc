use std::path::PathBuf;
use std::sync::Arc;

use career_roadmap::config::{ClientConfig, ConfigError};
use career_roadmap::forms::{LoginForm, SignupForm};
use career_roadmap::net::types::{EDUCATION_LEVELS, Roadmap, RoadmapForm};
use career_roadmap::pages::history::{HistoryPage, HistoryView, format_created_at};
use career_roadmap::pages::home::{SubmitError, submit_roadmap};
use career_roadmap::pages::login::{AuthFormError, submit_demo_login, submit_login};
use career_roadmap::pages::results::{
    LoadedRoadmap, ResultsRequest, ResultsView, Section, export_pdf, load_results,
};
use career_roadmap::pages::signup::submit_signup;
use career_roadmap::{ApiError, App, HttpApi, RoadmapApi};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}", .0.user_message("request failed"))]
    Api(#[from] ApiError),
    #[error("{}", .0.message())]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Auth(#[from] AuthFormError),
    #[error("{0}")]
    Load(String),
    #[error("nothing to show; pass a roadmap id")]
    NothingToShow,
    #[error("sign in to view your roadmaps (run `roadmap login`)")]
    SignInRequired,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "roadmap", about = "Career roadmap generator CLI")]
struct Cli {
    /// Overrides `ROADMAP_API_BASE_URL`.
    #[arg(long, env = "ROADMAP_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "ROADMAP_SESSION_COOKIE")]
    session_cookie: Option<String>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in user, if any.
    Whoami,
    Login {
        #[arg(long, required_unless_present = "demo")]
        email: Option<String>,
        #[arg(long, env = "ROADMAP_PASSWORD", required_unless_present = "demo")]
        password: Option<String>,
        /// Sign in with the shared demo account.
        #[arg(long)]
        demo: bool,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROADMAP_PASSWORD")]
        password: String,
    },
    Logout,
    /// Generate a roadmap for a learner profile.
    Generate {
        #[arg(long)]
        interests: String,
        /// One of the education level values (see `--help`).
        #[arg(long, value_parser = education_value)]
        education: String,
        #[arg(long, default_value = "")]
        skills: String,
        #[arg(long, default_value = "")]
        goal: String,
    },
    /// Show a saved roadmap.
    Show { roadmap_id: String },
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    Delete { roadmap_id: String },
    Stats,
    /// Download a saved roadmap as PDF.
    Export {
        roadmap_id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn education_value(raw: &str) -> Result<String, String> {
    if EDUCATION_LEVELS.iter().any(|(value, _)| *value == raw) {
        return Ok(raw.to_owned());
    }
    let values: Vec<&str> = EDUCATION_LEVELS.iter().map(|(value, _)| *value).collect();
    Err(format!("expected one of: {}", values.join(", ")))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = ClientConfig { base_url: ClientConfig::new(base_url).base_url, ..config };
    }
    if cli.session_cookie.is_some() {
        config.session_cookie = cli.session_cookie.clone();
    }

    let http = Arc::new(HttpApi::new(&config)?);
    let app = App::new(Arc::clone(&http) as Arc<dyn RoadmapApi>);

    match cli.command {
        Command::Whoami => run_whoami(&app, cli.json).await,
        Command::Login { email, password, demo } => {
            let user = if demo {
                submit_demo_login(app.session()).await?
            } else {
                let form = LoginForm {
                    email: email.unwrap_or_default(),
                    password: password.unwrap_or_default(),
                };
                submit_login(app.session(), &form).await?
            };
            println!("signed in as {} <{}>", user.name, user.email);
            print_cookie(&http);
            Ok(())
        }
        Command::Register { name, email, password } => {
            let form = SignupForm { name, email, confirm_password: password.clone(), password };
            let user = submit_signup(app.session(), &form).await?;
            println!("account created for {} <{}>", user.name, user.email);
            print_cookie(&http);
            Ok(())
        }
        Command::Logout => {
            app.session().logout().await;
            println!("signed out; unset ROADMAP_SESSION_COOKIE");
            Ok(())
        }
        Command::Generate { interests, education, skills, goal } => {
            let form = RoadmapForm { interests, education, current_skills: skills, career_goal: goal };
            let navigation = submit_roadmap(app.api(), form).await?;
            if !navigation.saved {
                println!("(not saved; sign in to keep roadmaps in your history)");
            }
            let view = load_results(app.api(), &ResultsRequest::from_navigation(navigation)).await;
            show_view(view, cli.json)
        }
        Command::Show { roadmap_id } => {
            let view = load_results(app.api(), &ResultsRequest::from_id(roadmap_id)).await;
            show_view(view, cli.json)
        }
        Command::History { page, search } => run_history(&app, page, search, cli.json).await,
        Command::Delete { roadmap_id } => {
            app.api().delete_roadmap(&roadmap_id).await?;
            println!("deleted {roadmap_id}");
            Ok(())
        }
        Command::Stats => {
            let stats = app.api().stats().await?;
            if cli.json {
                return print_json(&stats);
            }
            println!("total roadmaps:  {}", stats.total_roadmaps);
            println!("last 30 days:    {}", stats.recent_roadmaps);
            println!("learning weeks:  {}", stats.total_estimated_learning_weeks);
            if let Some(latest) = stats.latest_roadmap_date.as_deref() {
                println!("latest roadmap:  {}", format_created_at(latest));
            }
            Ok(())
        }
        Command::Export { roadmap_id, out } => {
            let export = export_pdf(app.api(), &roadmap_id).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(&export.file_name));
            tokio::fs::write(&path, &export.bytes).await?;
            println!("wrote {} ({} bytes)", path.display(), export.bytes.len());
            Ok(())
        }
    }
}

async fn run_whoami(app: &App, json: bool) -> Result<(), CliError> {
    let snapshot = app.start().await;
    if !snapshot.is_authenticated {
        println!("not signed in");
        return Ok(());
    }
    // The session check carries a minimal user; /auth/me has the full profile.
    let user = match app.api().current_user().await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "profile fetch failed, using session user");
            snapshot.user.unwrap_or_default()
        }
    };
    if json {
        return print_json(&user);
    }
    println!("{} {} <{}>", user.initials(), user.name, user.email);
    if let Some(last_login) = user.last_login.as_deref() {
        println!("last login: {}", format_created_at(last_login));
    }
    Ok(())
}

async fn run_history(app: &App, page: u32, search: Option<String>, json: bool) -> Result<(), CliError> {
    app.start().await;
    let mut history = HistoryPage::load(app.api(), &app.session().current(), page).await;
    if let Some(term) = search {
        history.set_search(term);
    }

    let entries = match history.view() {
        HistoryView::SignInRequired => return Err(CliError::SignInRequired),
        HistoryView::Failed { message } => return Err(CliError::Load(message.to_owned())),
        HistoryView::Empty => {
            println!("no roadmaps yet; run `roadmap generate` to create one");
            return Ok(());
        }
        HistoryView::NoMatches { term } => {
            println!("no roadmaps match \"{term}\"");
            return Ok(());
        }
        HistoryView::Entries(entries) => entries,
    };
    if json {
        return print_json(&entries);
    }

    let stats = history.stats();
    println!(
        "{} roadmaps, {} skills, {} phases, ~{} weeks on average",
        stats.total_roadmaps, stats.total_skills, stats.total_phases, stats.avg_weeks
    );
    for entry in entries {
        let summary = &entry.roadmap_summary;
        println!(
            "{}  {}  {}  ({} skills, {} weeks)",
            entry.id,
            format_created_at(&entry.created_at),
            summary.career_goal,
            summary.total_skills,
            summary.estimated_weeks
        );
    }
    if let Some(pagination) = history.pagination() {
        println!("page {} of {}", pagination.page, pagination.total_pages.max(1));
    }
    Ok(())
}

fn show_view(view: ResultsView, json: bool) -> Result<(), CliError> {
    match view {
        ResultsView::Ready(loaded) if json => print_json(&loaded.roadmap),
        ResultsView::Ready(loaded) => {
            print_roadmap(&loaded);
            Ok(())
        }
        ResultsView::Redirect(_) => Err(CliError::NothingToShow),
        ResultsView::Failed { message } => Err(CliError::Load(message)),
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn print_roadmap(loaded: &LoadedRoadmap) {
    let roadmap = &loaded.roadmap;
    if let Some(id) = loaded.roadmap_id.as_deref() {
        println!("roadmap {id}");
    }
    if !loaded.form_data.career_goal.is_empty() {
        println!("goal: {}", loaded.form_data.career_goal);
    }
    println!("estimated length: {} weeks", roadmap.total_weeks());

    for section in Section::ALL {
        println!();
        println!("## {} ({})", section.label(), section.item_count(roadmap));
        print_section(section, roadmap);
    }

    if !roadmap.notes.is_empty() {
        println!();
        println!("## Notes");
        for note in &roadmap.notes {
            println!("- {note}");
        }
    }
}

fn print_section(section: Section, roadmap: &Roadmap) {
    match section {
        Section::SkillPath => {
            for (i, step) in roadmap.skill_path.iter().enumerate() {
                println!("{}. {} ({} weeks)", i + 1, step.name, step.estimated_duration_weeks);
                if !step.description.is_empty() {
                    println!("   {}", step.description);
                }
                if !step.prerequisites.is_empty() {
                    println!("   requires: {}", step.prerequisites.join(", "));
                }
            }
        }
        Section::Platforms => {
            for platform in &roadmap.platforms {
                println!("- {} [{}] {}", platform.name, platform.kind, platform.rationale);
            }
        }
        Section::Certifications => {
            for cert in &roadmap.certifications {
                println!("- {} ({}, {})", cert.name, cert.provider, cert.level);
            }
        }
        Section::Projects => {
            for (level, ideas) in roadmap.project_ideas.by_level() {
                for idea in ideas {
                    println!("- [{level}] {}: {}", idea.title, idea.description);
                }
            }
        }
        Section::Timeline => {
            for phase in &roadmap.timeline {
                println!("Phase {}: {} ({} weeks)", phase.phase_number, phase.title, phase.duration_weeks);
                for milestone in &phase.milestones {
                    println!("   * {milestone}");
                }
            }
        }
    }
}

fn print_cookie(http: &HttpApi) {
    if let Some(cookie) = http.session_cookie() {
        println!("export ROADMAP_SESSION_COOKIE='{cookie}'");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
