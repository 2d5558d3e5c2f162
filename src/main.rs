//! Command-line front end for the job board.
//!
//! Each subcommand maps to one client operation or one page:
//!
//! - `register`, `login`, `logout`, `whoami`: account actions
//! - `jobs list|show|create|update|delete|apply`: postings
//! - `profile show|edit|password`: user profiles
//!
//! Configuration is read from `--config` (or the platform config file when
//! it exists), then `JOBBOARD_*` environment variables, then command-line
//! flags.

use clap::{Parser, Subcommand};
use jobboard::app::{Event, JobListingState, ProfileState};
use jobboard::domain::{FileUpload, FormSubmission};
use jobboard::infrastructure::{expand_tilde, get_config_file};
use jobboard::observability::init_tracing;
use jobboard::ui::{render_job_detail, render_job_listing, render_profile};
use jobboard::{
    initialize, Config, HttpTransport, JobBoardClient, JobBoardError, JobDetailRuntime,
    NavigationTarget, PostingMode, Result,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Browse, post and apply to jobs on a job-board server")]
#[command(propagate_version = true)]
struct Args {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Password again
        #[arg(long)]
        confirmation: Option<String>,
        /// "user" for job seekers
        #[arg(long, default_value = "user")]
        role: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Job posting commands
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Profile commands
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
enum JobCommands {
    /// List postings
    List {
        /// Fuzzy filter over title and company
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one posting
    Show { job_id: String },
    /// Create a posting
    Create {
        #[command(flatten)]
        posting: PostingArgs,
    },
    /// Replace the fields of a posting you own
    Update {
        job_id: String,
        #[command(flatten)]
        posting: PostingArgs,
    },
    /// Delete a posting you own
    Delete {
        job_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Apply to a posting
    Apply { job_id: String },
}

#[derive(clap::Args, Debug)]
struct PostingArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company_name: Option<String>,
    #[arg(long)]
    requirements: Option<String>,
    /// internship, entry, mid or senior
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// Show a user's profile (defaults to yours)
    Show { user_id: Option<String> },
    /// Edit your profile
    Edit {
        user_id: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Repeat for several skills
        #[arg(long = "skill")]
        skills: Vec<String>,
        /// CV file to upload
        #[arg(long)]
        cv: Option<PathBuf>,
    },
    /// Change your password
    Password {
        user_id: Option<String>,
        #[arg(long = "old")]
        old_password: Option<String>,
        #[arg(long = "new")]
        new_password: Option<String>,
    },
}

type Client = JobBoardClient<HttpTransport>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(args.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => match get_config_file().filter(|path| path.exists()) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        },
    };

    let mut config = config.with_env_overrides();
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = expand_tilde(data_dir);
    }
    Ok(config)
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    let client = initialize(config)?;

    match command {
        Commands::Register {
            username,
            email,
            password,
            confirmation,
            role,
            phone,
            gender,
        } => {
            let form = form_from([
                ("username", username),
                ("email", email),
                ("password", password),
                ("confirmation", confirmation),
                ("role", Some(role)),
                ("phone", phone),
                ("gender", gender),
            ]);
            let target = client.register(&form).await?;
            println!("Account created. Sign in next ({target}).");
        }
        Commands::Login { email, password } => {
            let form = form_from([("email", email), ("password", password)]);
            client.login(&form).await?;
            if let Some(user) = client.session().current_user() {
                println!("Signed in as {} ({}).", user.name, user.id);
            }
        }
        Commands::Logout => {
            client.logout()?;
            println!("Signed out.");
        }
        Commands::Whoami => match client.session().current_user() {
            Some(user) => println!("{} ({}) role={}", user.name, user.id, user.role),
            None => println!("Not signed in."),
        },
        Commands::Jobs { command } => run_jobs(command, client).await?,
        Commands::Profile { command } => run_profile(command, &client).await?,
    }
    Ok(())
}

async fn run_jobs(command: JobCommands, client: Client) -> Result<()> {
    match command {
        JobCommands::List { search } => {
            let mut listing = JobListingState::new();
            if let Some(ticket) = listing.mount() {
                let result = client.list_jobs().await.map_err(|e| e.message());
                listing.settle(&ticket, result);
            }
            if let Some(query) = search {
                listing.set_query(query);
            }
            print!("{}", render_job_listing(&listing.compute_viewmodel()));
        }
        JobCommands::Show { job_id } => {
            let mut page = JobDetailRuntime::new(client);
            page.dispatch(Event::Mount { job_id }).await?;
            print!("{}", render_job_detail(&page.view()));
        }
        JobCommands::Create { posting } => {
            let target = client
                .save_job_posting(&posting.into_form(), PostingMode::Create)
                .await?;
            println!("Posting created ({target}).");
        }
        JobCommands::Update { job_id, posting } => {
            let target = client
                .save_job_posting(&posting.into_form(), PostingMode::Update { id: job_id })
                .await?;
            println!("Posting updated ({target}).");
        }
        JobCommands::Delete { job_id, yes } => delete_job(client, job_id, yes).await?,
        JobCommands::Apply { job_id } => {
            let mut page = JobDetailRuntime::new(client);
            page.dispatch(Event::Mount { job_id }).await?;
            if !page.state().can_apply() {
                print!("{}", render_job_detail(&page.view()));
                return Err(JobBoardError::Application(
                    "You cannot apply to this job.".to_string(),
                ));
            }
            page.dispatch(Event::Apply).await?;
            if let Some(error) = page.state().last_error.clone() {
                return Err(JobBoardError::Application(error));
            }
            print!("{}", render_job_detail(&page.view()));
            println!("Application sent.");
        }
    }
    Ok(())
}

async fn delete_job(client: Client, job_id: String, yes: bool) -> Result<()> {
    let mut page = JobDetailRuntime::new(client);
    page.dispatch(Event::Mount { job_id }).await?;
    page.dispatch(Event::RequestDelete).await?;

    if !page.state().delete_dialog_open {
        if let Some(error) = page.state().job.error() {
            return Err(JobBoardError::Application(error.to_string()));
        }
        return Err(JobBoardError::Auth(
            "Only the poster can delete this job.".to_string(),
        ));
    }

    let confirmed = yes || {
        print!("{}", render_job_detail(&page.view()));
        confirm("Delete? [y/N] ")?
    };
    if !confirmed {
        page.dispatch(Event::CancelDelete).await?;
        println!("Cancelled.");
        return Ok(());
    }

    page.dispatch(Event::ConfirmDelete).await?;
    match page.take_navigation() {
        Some(target) => {
            println!("Posting deleted ({target}).");
            Ok(())
        }
        None => Err(JobBoardError::Application(
            page.state()
                .last_error
                .clone()
                .unwrap_or_else(|| "Could not delete the posting.".to_string()),
        )),
    }
}

async fn run_profile(command: ProfileCommands, client: &Client) -> Result<()> {
    match command {
        ProfileCommands::Show { user_id } => {
            let user_id = resolve_user(client, user_id)?;
            let mut page = ProfileState::new(client.session().current_user());
            if let Some(ticket) = page.mount(&user_id) {
                let result = client.fetch_user(&user_id).await.map_err(|e| e.message());
                page.user.settle(&ticket, result);
            }
            print!("{}", render_profile(&page.compute_viewmodel()));
        }
        ProfileCommands::Edit {
            user_id,
            username,
            image,
            phone,
            skills,
            cv,
        } => {
            let user_id = resolve_user(client, user_id)?;
            let mut form = form_from([("username", username), ("image", image), ("phone", phone)]);
            for skill in skills {
                form = form.with_text("skills", skill);
            }
            if let Some(path) = cv {
                form = form.with_file("cv", read_upload(&path)?);
            }
            let target = client.edit_profile(&user_id, &form).await?;
            print_navigation("Profile updated", &target);
        }
        ProfileCommands::Password {
            user_id,
            old_password,
            new_password,
        } => {
            let user_id = resolve_user(client, user_id)?;
            let form = form_from([("oldPassword", old_password), ("newPassword", new_password)]);
            let target = client.change_password(&user_id, &form).await?;
            print_navigation("Password changed", &target);
        }
    }
    Ok(())
}

impl PostingArgs {
    fn into_form(self) -> FormSubmission {
        form_from([
            ("title", self.title),
            ("company_name", self.company_name),
            ("requirements", self.requirements),
            ("position", self.position),
            ("description", self.description),
        ])
    }
}

fn form_from<const N: usize>(fields: [(&str, Option<String>); N]) -> FormSubmission {
    fields
        .into_iter()
        .fold(FormSubmission::new(), |form, (name, value)| match value {
            Some(value) => form.with_text(name, value),
            None => form,
        })
}

fn resolve_user(client: &Client, user_id: Option<String>) -> Result<String> {
    user_id
        .or_else(|| client.session().current_user().map(|user| user.id))
        .ok_or_else(|| JobBoardError::Auth("You must be logged in to view your profile.".into()))
}

fn read_upload(path: &Path) -> Result<FileUpload> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "cv".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(FileUpload::new(file_name, bytes))
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_navigation(message: &str, target: &NavigationTarget) {
    println!("{message} ({target}).");
}
