use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barbershop::config::AppConfig;
use barbershop::models::{Credentials, HourSlot, ProfileForm, SignUpForm};
use barbershop::screens::appointment_created::AppointmentCreated;
use barbershop::screens::create_appointment::CreateAppointment;
use barbershop::screens::dashboard::{Dashboard, ProfileBadge};
use barbershop::screens::{profile, sign_in, sign_up, FormOutcome, Navigation};
use barbershop::services::api::http::HttpApi;
use barbershop::services::auth;
use barbershop::services::session::FileTokenStorage;
use barbershop::state::AppState;

#[derive(Parser)]
#[command(name = "barbershop", about = "Barbershop appointment booking client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// List barbers
    Providers,
    /// Show a barber's hours for a day
    Availability {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Book an hour with a barber
    Book {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        hour: u32,
    },
    /// Update name, e-mail and optionally the password
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "")]
        old_password: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        password_confirmation: String,
    },
    /// Upload a JPEG as the profile picture
    Avatar { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    tracing::info!(host = config.api_host(), "using API host");

    let api = HttpApi::new(config.api_host());
    let storage = FileTokenStorage::new(config.session_file.clone());
    let state = AppState::new(config, Box::new(api), Box::new(storage));
    auth::restore(&state);

    let outcome = run(&state, cli.command).await;

    for alert in state.take_alerts() {
        println!("[{}] {}", alert.title, alert.message);
    }
    outcome
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match command {
        Command::SignIn { email, password } => {
            let outcome = sign_in::submit(state, &Credentials { email, password }).await;
            print_outcome(&outcome);
        }
        Command::SignUp {
            name,
            email,
            password,
        } => {
            let outcome = sign_up::submit(state, &SignUpForm { name, email, password }).await;
            print_outcome(&outcome);
        }
        Command::SignOut => {
            profile::sign_out(state);
            println!("signed out");
        }
        Command::Whoami => match state.session.user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
            None => println!("not signed in"),
        },
        Command::Providers => {
            let mut dashboard = Dashboard::new();
            if let Some(greeting) = dashboard.greeting(state) {
                match dashboard.profile_badge(state) {
                    Some(ProfileBadge::Avatar(url)) => println!("{greeting}  [{url}]\n"),
                    Some(ProfileBadge::Initial(initial)) => println!("{greeting}  ({initial})\n"),
                    None => println!("{greeting}\n"),
                }
            }
            if dashboard.load(state).await.is_ok() {
                for provider in dashboard.providers() {
                    println!("{}  {}", provider.id, provider.name);
                }
            }
        }
        Command::Availability { provider, date } => {
            let mut screen = CreateAppointment::new(&provider, today);
            if screen.mount(state).await.is_err() {
                return Ok(());
            }
            screen.select_date(state, date.unwrap_or(today)).await.ok();
            let periods = screen.picker().periods();
            print_period("Morning", &periods.morning);
            print_period("Afternoon", &periods.afternoon);
        }
        Command::Book {
            provider,
            date,
            hour,
        } => {
            let mut screen = CreateAppointment::new(&provider, today);
            if screen.mount(state).await.is_err() {
                return Ok(());
            }
            if screen.select_date(state, date.unwrap_or(today)).await.is_err() {
                return Ok(());
            }
            if !screen.select_hour(hour) {
                println!("{hour:02}:00 is not available");
            }
            match screen.submit(state).await {
                FormOutcome::Navigate(Navigation::AppointmentCreated { date }) => {
                    let created = AppointmentCreated::new(date);
                    println!("{}\n{}", created.title(), created.description());
                }
                other => print_outcome(&other),
            }
        }
        Command::Profile {
            name,
            email,
            old_password,
            password,
            password_confirmation,
        } => {
            let Some(mut form) = profile::initial_form(state) else {
                println!("not signed in");
                return Ok(());
            };
            form = ProfileForm {
                name: name.unwrap_or(form.name),
                email: email.unwrap_or(form.email),
                old_password,
                password,
                password_confirmation,
            };
            print_outcome(&profile::submit(state, &form).await);
        }
        Command::Avatar { path } => {
            let image = tokio::fs::read(&path).await?;
            print_outcome(&profile::update_avatar(state, image).await);
        }
    }

    Ok(())
}

fn print_period(title: &str, slots: &[HourSlot]) {
    println!("{title}");
    for slot in slots {
        let mark = if slot.available { "open" } else { "taken" };
        println!("  {}  {mark}", slot.label);
    }
}

fn print_outcome(outcome: &FormOutcome) {
    match outcome {
        FormOutcome::Navigate(next) => tracing::info!(?next, "navigate"),
        FormOutcome::Invalid(errors) => {
            for (field, message) in errors {
                println!("{field}: {message}");
            }
        }
        FormOutcome::Stay => {}
    }
}
