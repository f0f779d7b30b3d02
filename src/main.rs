//! Command-line front end.
//!
//! Every invocation builds a runtime over the JSON file store, dispatches the
//! startup event (which seeds an empty store), runs one command through the
//! same event handler the library exposes, then prints the notifications and
//! the rendered page.
//!
//! # Commands
//!
//! - `list [--page N] [--view table|grid]`: show one page of records
//! - `add --first-name ... --position ...`: store a new record
//! - `edit <id> [--email ...]`: replace fields of a stored record
//! - `delete <id> [--yes]`: delete after confirmation
//! - `clear`: delete every record

#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use roster::app::{Notification, Runtime};
use roster::domain::{parse_date, Department, Position};
use roster::i18n::Translate;
use roster::storage::JsonFileEngine;
use roster::{Catalog, Config, Employee, EmployeeId, Event, Locale, RosterError, ViewMode};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Employee records with paginated table and grid views")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Directory holding the store and log file.
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<String>,
    /// Label language (en or tr).
    #[arg(long, value_name = "LANG", global = true)]
    locale: Option<Locale>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one page of records.
    List {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Layout (table or grid).
        #[arg(long)]
        view: Option<ViewMode>,
    },
    /// Store a new record.
    Add(NewEmployee),
    /// Replace fields of a stored record.
    Edit {
        id: u64,
        #[command(flatten)]
        changes: EmployeeChanges,
    },
    /// Delete a record after confirmation.
    Delete {
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Delete every record.
    Clear,
}

/// Fields of a new record.
#[derive(Args, Debug)]
struct NewEmployee {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// YYYY-MM-DD or DD/MM/YYYY.
    #[arg(long, value_parser = parse_date)]
    date_of_employment: NaiveDate,
    /// YYYY-MM-DD or DD/MM/YYYY.
    #[arg(long, value_parser = parse_date)]
    date_of_birth: NaiveDate,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    department: Department,
    #[arg(long)]
    position: Position,
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Self {
            id: None,
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_employment: new.date_of_employment,
            date_of_birth: new.date_of_birth,
            phone: new.phone,
            email: new.email,
            department: new.department,
            position: new.position,
        }
    }
}

/// Optional replacements for an existing record.
#[derive(Args, Debug)]
struct EmployeeChanges {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long, value_parser = parse_date)]
    date_of_employment: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    date_of_birth: Option<NaiveDate>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    department: Option<Department>,
    #[arg(long)]
    position: Option<Position>,
}

impl EmployeeChanges {
    fn apply(self, mut employee: Employee) -> Employee {
        if let Some(value) = self.first_name {
            employee.first_name = value;
        }
        if let Some(value) = self.last_name {
            employee.last_name = value;
        }
        if let Some(value) = self.date_of_employment {
            employee.date_of_employment = value;
        }
        if let Some(value) = self.date_of_birth {
            employee.date_of_birth = value;
        }
        if let Some(value) = self.phone {
            employee.phone = value;
        }
        if let Some(value) = self.email {
            employee.email = value;
        }
        if let Some(value) = self.department {
            employee.department = value;
        }
        if let Some(value) = self.position {
            employee.position = value;
        }
        employee
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    roster::observability::init_tracing(&config);

    let span = tracing::debug_span!("cli", command = ?cli.command);
    let _guard = span.entered();

    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut runtime = roster::initialize_json(&config);
    match futures::executor::block_on(run(&mut runtime, &config, &catalog, cli.command)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}: {e}", catalog.translate(config.locale, e.kind().message_key(), &[]));
            ExitCode::FAILURE
        }
    }
}

/// Reads the config file if given, then applies command-line overrides.
fn load_config(cli: &Cli) -> roster::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    Ok(config)
}

/// Runs one command. Returns `Ok(false)` if the store reported a failure.
async fn run(
    runtime: &mut Runtime<JsonFileEngine>,
    config: &Config,
    catalog: &Catalog,
    command: Commands,
) -> roster::Result<bool> {
    let mut notifications = runtime.dispatch(roster::startup_event(config)?).await?.notifications;

    match command {
        Commands::List { page, view } => {
            if let Some(view) = view {
                runtime.dispatch(Event::SelectView(view)).await?;
            }
            runtime.dispatch(Event::ChangePage(page)).await?;
        }
        Commands::Add(new) => {
            let outcome = runtime.dispatch(Event::SubmitNew(new.into())).await?;
            notifications.extend(outcome.notifications);
        }
        Commands::Edit { id, changes } => {
            let id = EmployeeId::new(id)?;
            notifications.extend(runtime.dispatch(Event::OpenEditor(id)).await?.notifications);
            if let Some(current) = runtime.state().editing.clone() {
                let outcome = runtime.dispatch(Event::SubmitEdit(changes.apply(current))).await?;
                notifications.extend(outcome.notifications);
            }
        }
        Commands::Delete { id, yes } => {
            let id = EmployeeId::new(id)?;
            let employee = runtime
                .state()
                .employee(id)
                .cloned()
                .ok_or_else(|| RosterError::NotFound(format!("no employee with id {id}")))?;
            runtime.dispatch(Event::RequestDelete(employee)).await?;

            let event = if yes || confirm(runtime, catalog)? {
                Event::ConfirmDelete
            } else {
                Event::CancelDelete
            };
            notifications.extend(runtime.dispatch(event).await?.notifications);
        }
        Commands::Clear => {
            notifications.extend(runtime.dispatch(Event::ClearAll).await?.notifications);
        }
    }

    let locale = runtime.state().locale;
    let mut ok = true;
    for notification in &notifications {
        let (key, is_failure) = notification_key(notification);
        ok &= !is_failure;
        let text = catalog.translate(locale, key, &[]);
        if let Notification::Failed { message, .. } = notification {
            eprintln!("{text}: {message}");
        } else {
            println!("{text}");
        }
    }

    print!("{}", roster::ui::render(runtime.state(), catalog));
    Ok(ok)
}

fn notification_key(notification: &Notification) -> (&'static str, bool) {
    match notification {
        Notification::DeletionConfirmed { .. } => ("notifications.deleted", false),
        Notification::EmployeeAdded { .. } => ("notifications.added", false),
        Notification::EmployeeUpdated { .. } => ("notifications.updated", false),
        Notification::Failed { kind, .. } => (kind.message_key(), true),
    }
}

/// Shows the delete dialog and reads the answer from stdin.
fn confirm(runtime: &Runtime<JsonFileEngine>, catalog: &Catalog) -> roster::Result<bool> {
    let viewmodel = runtime.state().compute_viewmodel(catalog);
    if let Some(dialog) = viewmodel.dialog {
        println!("{}", dialog.title);
        println!("{}", dialog.message);
        print!("{} [y/N] ", dialog.proceed_label);
    }
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "e" | "evet"))
}
