//! Command execution. Each command returns the text to print on stdout.

use serde::Serialize;
use unifind_application::ApplicationError;
use unifind_application::ports::HttpTransport;
use unifind_domain::resources::{
    AccountUpdate, ClaimSubmission, EventUpdate, LostItemUpdate, NewAccount, NewEvent, NewLostItem,
};
use unifind_domain::{GuardDecision, SessionStatus, UserProfile};
use unifind_infrastructure::{load_evidence, to_json_stable};

use crate::app::App;
use crate::cli::{Command, EventCommand, LostCommand, UserCommand};

/// Error type of a command.
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a command.
pub type CommandResult = Result<String, CommandError>;

#[derive(Serialize)]
struct WhoAmI<'a> {
    status: SessionStatus,
    user: Option<&'a UserProfile>,
}

/// Runs `command` against a started `app`.
///
/// # Errors
///
/// Returns the first error of the underlying call.
pub async fn execute<T: HttpTransport>(app: &App<T>, command: Command) -> CommandResult {
    match command {
        Command::Login { email, password } => {
            let user = app.auth().login(&email, &password).await?;
            Ok(format!("Logged in as {} ({})", user.email, user.role))
        }
        Command::Logout => {
            app.auth().logout().await?;
            Ok("Logged out".to_string())
        }
        Command::Whoami => {
            let session = app.auth().session();
            json(&WhoAmI {
                status: session.status(),
                user: session.user(),
            })
        }
        Command::Verify => Ok(if app.auth().verify().await? {
            "Session is valid".to_string()
        } else {
            "Session was rejected by the server; log in again".to_string()
        }),
        Command::Guard { target } => Ok(describe(app.auth().guard(&target)).to_string()),
        Command::Lost(command) => lost(app, command).await,
        Command::Events(command) => events(app, command).await,
        Command::Users(command) => users(app, command).await,
    }
}

async fn lost<T: HttpTransport>(app: &App<T>, command: LostCommand) -> CommandResult {
    let api = app.lost();
    match command {
        LostCommand::List { query } => json(&api.list(query.as_deref()).await?),
        LostCommand::Show { id } => json(&api.get(&id).await?),
        LostCommand::ImageUrl { id } => Ok(api.image_url(&id)?.to_string()),
        LostCommand::Claim {
            id,
            notes,
            evidence,
        } => {
            let mut evidences = Vec::with_capacity(evidence.len());
            for path in &evidence {
                evidences.push(load_evidence(path).await?);
            }
            json(&api.claim(&id, ClaimSubmission { notes, evidences }).await?)
        }
        LostCommand::Create(fields) => {
            let item = NewLostItem {
                title: fields.title,
                found_location: fields.found_location,
                description: fields.description,
                contact_info: fields.contact_info,
            };
            json(&api.create(&item).await?)
        }
        LostCommand::Update { id, fields } => {
            let update = LostItemUpdate {
                title: fields.title,
                found_location: fields.found_location,
                status: fields.status,
                description: fields.description,
                contact_info: fields.contact_info,
            };
            json(&api.update(&id, &update).await?)
        }
        LostCommand::Delete { id } => {
            api.delete(&id).await?;
            Ok(format!("Deleted object {id}"))
        }
    }
}

async fn events<T: HttpTransport>(app: &App<T>, command: EventCommand) -> CommandResult {
    let api = app.events();
    match command {
        EventCommand::List => json(&api.list().await?),
        EventCommand::Show { id } => json(&api.get(&id).await?),
        EventCommand::Create(fields) => {
            let event = NewEvent {
                title: fields.title,
                start: fields.start,
                end: fields.end,
                location: fields.location,
                description: fields.description,
            };
            json(&api.create(&event).await?)
        }
        EventCommand::Update { id, fields } => {
            let update = EventUpdate {
                title: fields.title,
                start: fields.start,
                end: fields.end,
                location: fields.location,
                description: fields.description,
            };
            json(&api.update(&id, &update).await?)
        }
        EventCommand::Delete { id } => {
            api.delete(&id).await?;
            Ok(format!("Deleted event {id}"))
        }
    }
}

async fn users<T: HttpTransport>(app: &App<T>, command: UserCommand) -> CommandResult {
    let api = app.users();
    match command {
        UserCommand::List => json(&api.list().await?),
        UserCommand::Show { id } => json(&api.get(&id).await?),
        UserCommand::Find { email } => json(&api.search_by_email(&email).await?),
        UserCommand::Create {
            name,
            email,
            password,
            kind,
        } => {
            let account = NewAccount {
                nombre: name,
                correo: email,
                password,
                tipo: kind,
            };
            json(&api.create(&account).await?)
        }
        UserCommand::Update {
            id,
            name,
            email,
            password,
            kind,
        } => {
            let update = AccountUpdate {
                nombre: name,
                correo: email,
                password,
                tipo: kind,
            };
            json(&api.update(&id, &update).await?)
        }
        UserCommand::Delete { id } => {
            api.delete(&id).await?;
            Ok(format!("Deleted account {id}"))
        }
    }
}

fn json<S: Serialize + ?Sized>(value: &S) -> CommandResult {
    Ok(to_json_stable(value)?.trim_end().to_string())
}

const fn describe(decision: GuardDecision) -> &'static str {
    match decision {
        GuardDecision::Allow => "allow",
        GuardDecision::Pending => "pending",
        GuardDecision::RedirectToLogin => "redirect to login",
        GuardDecision::Forbidden => "forbidden",
    }
}

/// Returns a hint to print after `error`, if one applies.
#[must_use]
pub fn hint(error: &CommandError) -> Option<&'static str> {
    error
        .downcast_ref::<ApplicationError>()
        .filter(|e| e.requires_login())
        .map(|_| "run `unifind login` first")
}
