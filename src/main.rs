use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use agora_events::config::Config;
use agora_events::models::{parse_date, Event, EventDraft, EventPatch, EventType};
use agora_events::screens::{DashboardScreen, EventBrowser, HomeScreen};
use agora_events::services::image::data_url_from_file;
use agora_events::services::{AuthService, EventsApi};
use agora_events::storage::PersistentStore;
use agora_events::utils::{AppError, AppResult, Notification, NotificationLevel};

#[derive(Parser)]
#[command(name = "agora-events", about = "Browse and manage campus events")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every event
    List,
    /// Show one event in detail
    Show { id: String },
    /// Search title, description, location and type
    Search { query: String },
    /// The next three events
    Upcoming {
        /// Reference date (yyyy-mm-dd), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Event categories offered by the form
    Types,
    /// Create an event (requires login)
    Create(CreateArgs),
    /// Edit fields of an event (requires login)
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Delete an event (requires login)
    Delete { id: String },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// yyyy-mm-dd
    #[arg(long)]
    date: String,
    #[arg(long)]
    time: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    organizer: String,
    #[arg(long = "type")]
    event_type: String,
    #[arg(long, conflicts_with = "image")]
    image_url: Option<String>,
    /// Local image file, embedded as a data URL
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    organizer: Option<String>,
    #[arg(long = "type")]
    event_type: Option<String>,
    #[arg(long, conflicts_with = "image")]
    image_url: Option<String>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            e.log();
            eprintln!("error: {}", e.public_message());
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the operation was rejected and reported as a notification.
async fn run(command: Command, config: &Config) -> AppResult<bool> {
    let store = PersistentStore::new(config.open_storage());
    let api = EventsApi::new(store.clone(), config.latency);
    let auth = AuthService::new(store, config.latency);

    match command {
        Command::List => {
            let mut home = HomeScreen::new(api);
            let ok = home.load().await;
            home.events().into_iter().for_each(print_row);
            Ok(finish(home.browser_mut()) && ok)
        }
        Command::Show { id } => {
            let mut home = HomeScreen::new(api);
            let ok = home.view_event(&id).await;
            if let Some(event) = home.browser().selected() {
                print_event(event);
            }
            Ok(finish(home.browser_mut()) && ok)
        }
        Command::Search { query } => {
            let mut home = HomeScreen::new(api);
            let ok = home.load().await && home.search(&query).await;
            let hits = home.events();
            println!("Showing {} results for \"{}\"", hits.len(), query);
            hits.into_iter().for_each(print_row);
            Ok(finish(home.browser_mut()) && ok)
        }
        Command::Upcoming { today } => {
            let today = match today {
                Some(raw) => parse_date(&raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let mut home = HomeScreen::new(api);
            let ok = home.load().await;
            home.upcoming(today).into_iter().for_each(print_row);
            Ok(finish(home.browser_mut()) && ok)
        }
        Command::Types => {
            for event_type in EventType::ALL {
                println!("{}", event_type);
            }
            Ok(true)
        }
        Command::Create(args) => {
            let draft = args.into_draft().await?;
            let mut dashboard = open_dashboard(api, &auth).await?;
            let ok = dashboard.create_event(draft).await;
            if ok {
                if let Some(event) = dashboard.events().first() {
                    print_event(event);
                }
            }
            Ok(finish(dashboard.browser_mut()) && ok)
        }
        Command::Update { id, fields } => {
            let patch = fields.into_patch().await?;
            let mut dashboard = open_dashboard(api, &auth).await?;
            if !dashboard.begin_edit(&id) {
                return Err(AppError::NotFound(format!(
                    "Event with id '{}' was not found",
                    id
                )));
            }
            let ok = dashboard.update_event(patch).await;
            if ok {
                if let Some(event) = dashboard.browser().list().find(&id) {
                    print_event(event);
                }
            }
            Ok(finish(dashboard.browser_mut()) && ok)
        }
        Command::Delete { id } => {
            let mut dashboard = open_dashboard(api, &auth).await?;
            dashboard.confirm_delete(&id);
            let ok = dashboard.delete_event().await;
            Ok(finish(dashboard.browser_mut()) && ok)
        }
        Command::Login { email, password } => {
            let session = auth.login(&email, &password).await?;
            println!("Login successful. Welcome, {}!", session.user().name);
            Ok(true)
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let session = auth.register(&name, &email, &password).await?;
            println!("Registration successful. Welcome, {}!", session.user().name);
            Ok(true)
        }
        Command::Logout => {
            auth.logout()?;
            println!("You have been logged out");
            Ok(true)
        }
        Command::Whoami => {
            match auth.current_user()? {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
                None => println!("Not logged in"),
            }
            Ok(true)
        }
    }
}

async fn open_dashboard(api: EventsApi, auth: &AuthService) -> AppResult<DashboardScreen> {
    let mut dashboard = DashboardScreen::open(api, auth.current_session()?)?;
    if !dashboard.load().await {
        finish(dashboard.browser_mut());
        return Err(AppError::InternalError("Could not load events".to_string()));
    }
    Ok(dashboard)
}

/// Prints queued notifications; false if any of them reports a failure.
fn finish(browser: &mut EventBrowser) -> bool {
    let notifications = browser.take_notifications();
    notifications.iter().for_each(print_notification);
    !notifications.iter().any(Notification::is_error)
}

fn print_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => println!("✓ {}", notification.message),
        NotificationLevel::Info => println!("i {}", notification.message),
        NotificationLevel::Error => eprintln!("✗ {}", notification.message),
    }
}

fn print_row(event: &Event) {
    println!(
        "{:<38} {}  {:<9} {:<12} {}",
        event.id, event.date, event.time, event.event_type, event.title
    );
}

fn print_event(event: &Event) {
    println!("{}", event.title);
    println!("  id:        {}", event.id);
    println!("  when:      {} {}", event.date.format("%a, %b %-d %Y"), event.time);
    println!("  where:     {}", event.location);
    println!("  organizer: {}", event.organizer);
    println!("  type:      {}", event.event_type);
    println!("  author:    {}", event.created_by);
    if !event.image_url.is_empty() {
        let preview: String = event.image_url.chars().take(60).collect();
        println!("  image:     {}", preview);
    }
    println!();
    println!("  {}", event.description);
}

async fn image_url(url: Option<String>, path: Option<PathBuf>) -> AppResult<Option<String>> {
    match (url, path) {
        (_, Some(path)) => Ok(Some(data_url_from_file(path).await?)),
        (url, None) => Ok(url),
    }
}

impl CreateArgs {
    async fn into_draft(self) -> AppResult<EventDraft> {
        Ok(EventDraft {
            date: parse_date(&self.date)?,
            image_url: image_url(self.image_url, self.image)
                .await?
                .unwrap_or_default(),
            title: self.title,
            description: self.description,
            time: self.time,
            location: self.location,
            organizer: self.organizer,
            event_type: self.event_type,
        })
    }
}

impl UpdateArgs {
    async fn into_patch(self) -> AppResult<EventPatch> {
        let date = self.date.as_deref().map(parse_date).transpose()?;
        let patch = EventPatch {
            title: self.title,
            description: self.description,
            date,
            time: self.time,
            location: self.location,
            organizer: self.organizer,
            event_type: self.event_type,
            image_url: image_url(self.image_url, self.image).await?,
        };
        if patch.is_empty() {
            return Err(AppError::ValidationError(
                "Nothing to update; pass at least one field".to_string(),
            ));
        }
        Ok(patch)
    }
}
