use adminhub_core::models::{ClientForm, ContactForm, PersonnelForm, PersonnelStatus, ProjectForm, ProjectStatus};
use adminhub_core::{ApiClient, ApiError, Config, ListParams};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::output;

#[derive(Debug, Parser)]
#[command(name = "adminhub", version, about = "Manage contacts, clients, personnel and projects")]
pub struct Cli {
    /// Backend base URL (overrides ADMINHUB_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        /// Account email (defaults to the last one used)
        #[arg(long)]
        email: Option<String>,
    },
    /// Revoke the session on the server and forget it locally
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the dashboard summary
    Dashboard,
    /// Contact form submissions
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Client companies
    #[command(subcommand)]
    Clients(ClientsCommand),
    /// Staff members
    #[command(subcommand)]
    Personnel(PersonnelCommand),
    /// Projects and their assignments
    #[command(subcommand)]
    Projects(ProjectsCommand),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl ListArgs {
    fn params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(page) = self.page {
            params = params.page(page);
        }
        if let Some(search) = &self.search {
            params = params.search(search.as_str());
        }
        if let Some(status) = &self.status {
            params = params.status(status);
        }
        params
    }
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    Show { id: i64 },
    Stats,
    /// Change a contact's status and show the refreshed stats
    Status { id: i64, status: String },
    Delete { id: i64 },
    /// Send a message through the public contact form
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Download the CSV export
    Export {
        #[command(flatten)]
        filter: ListArgs,
        /// Output file
        #[arg(long, short, default_value = "contacts.csv")]
        output: String,
    },
}

#[derive(Debug, Args)]
pub struct ClientFields {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub contact_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<ClientFields> for ClientForm {
    fn from(f: ClientFields) -> Self {
        ClientForm {
            company: f.company,
            contact_name: f.contact_name,
            email: f.email,
            phone: f.phone,
            notes: f.notes,
            ..Default::default()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    Show { id: i64 },
    Create {
        #[command(flatten)]
        fields: ClientFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: ClientFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct PersonnelFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<PersonnelStatus>,
}

impl From<PersonnelFields> for PersonnelForm {
    fn from(f: PersonnelFields) -> Self {
        PersonnelForm {
            name: f.name,
            email: f.email,
            position: f.position,
            phone: f.phone,
            status: f.status,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PersonnelCommand {
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    Show { id: i64 },
    Positions,
    Create {
        #[command(flatten)]
        fields: PersonnelFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: PersonnelFields,
    },
    Status { id: i64, status: PersonnelStatus },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type")]
    pub project_type: Option<String>,
    #[arg(long)]
    pub status: Option<ProjectStatus>,
    #[arg(long)]
    pub client_id: Option<i64>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
}

impl From<ProjectFields> for ProjectForm {
    fn from(f: ProjectFields) -> Self {
        ProjectForm {
            name: f.name,
            description: f.description,
            project_type: f.project_type,
            status: f.status,
            client_id: f.client_id,
            start_date: f.start_date,
            end_date: f.end_date,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    List {
        #[command(flatten)]
        filter: ListArgs,
        #[arg(long)]
        client_id: Option<i64>,
    },
    Show { id: i64 },
    Stats,
    Create {
        #[command(flatten)]
        fields: ProjectFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Change a project's status and show the refreshed stats
    Status { id: i64, status: ProjectStatus },
    Delete { id: i64 },
    Assign {
        project_id: i64,
        personnel_id: i64,
        #[arg(long)]
        role: Option<String>,
    },
    Unassign { project_id: i64, personnel_id: i64 },
}

pub async fn run(command: Command, api: &ApiClient, config: &mut Config) -> Result<()> {
    match command {
        Command::Login { email } => login(api, config, email).await,
        Command::Logout => {
            api.logout().await?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match api.current_user() {
                Some(user) => println!("{} <{}>", user.display_name(), user.email),
                None if api.is_authenticated() => println!("Logged in (no profile stored)"),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Dashboard => output::print_json(&api.dashboard_summary().await?),
        Command::Contacts(cmd) => contacts(api, cmd).await,
        Command::Clients(cmd) => clients(api, cmd).await,
        Command::Personnel(cmd) => personnel(api, cmd).await,
        Command::Projects(cmd) => projects(api, cmd).await,
    }
}

async fn login(api: &ApiClient, config: &mut Config, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| config.last_email.clone()) {
        Some(email) => email,
        None => output::prompt("Email: ")?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let user = match api.login(&email, &password).await {
        Ok(user) => user,
        Err(ApiError::AuthExpired) => anyhow::bail!("Invalid email or password"),
        Err(e) => return Err(e.into()),
    };

    config.last_email = Some(email);
    config.save()?;
    println!("Logged in as {}", user.display_name());
    Ok(())
}

async fn contacts(api: &ApiClient, cmd: ContactsCommand) -> Result<()> {
    match cmd {
        ContactsCommand::List { filter } => {
            let page = api.list_contacts(&filter.params().with_stats()).await?;
            output::print_contacts(&page);
        }
        ContactsCommand::Show { id } => output::print_json(&api.get_contact(id).await?)?,
        ContactsCommand::Stats => output::print_json(&api.contact_stats().await?)?,
        ContactsCommand::Status { id, status } => {
            let stats = api.change_contact_status(id, &status).await?;
            println!("Contact {} is now {}.", id, status);
            output::print_json(&stats)?;
        }
        ContactsCommand::Delete { id } => output::print_ack(&api.delete_contact(id).await?, "Contact deleted."),
        ContactsCommand::Submit {
            name,
            email,
            message,
            phone,
            company,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                company,
                service: None,
                message,
            };
            output::print_ack(&api.submit_contact(&form).await?, "Message sent.");
        }
        ContactsCommand::Export { filter, output: path } => {
            let url = api.contacts_export_url(&filter.params())?;
            let response = reqwest::get(&url)
                .await
                .context("Failed to download contacts export")?
                .error_for_status()
                .context("Contacts export was refused")?;
            let bytes = response.bytes().await?;
            std::fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path))?;
            println!("Exported {} bytes to {}", bytes.len(), path);
        }
    }
    Ok(())
}

async fn clients(api: &ApiClient, cmd: ClientsCommand) -> Result<()> {
    match cmd {
        ClientsCommand::List { filter } => output::print_clients(&api.list_clients(&filter.params()).await?),
        ClientsCommand::Show { id } => output::print_json(&api.get_client(id).await?)?,
        ClientsCommand::Create { fields } => output::print_json(&api.create_client(&fields.into()).await?)?,
        ClientsCommand::Update { id, fields } => output::print_json(&api.update_client(id, &fields.into()).await?)?,
        ClientsCommand::Delete { id } => output::print_ack(&api.delete_client(id).await?, "Client deleted."),
    }
    Ok(())
}

async fn personnel(api: &ApiClient, cmd: PersonnelCommand) -> Result<()> {
    match cmd {
        PersonnelCommand::List { filter } => output::print_personnel(&api.list_personnel(&filter.params()).await?),
        PersonnelCommand::Show { id } => output::print_json(&api.get_personnel(id).await?)?,
        PersonnelCommand::Positions => {
            for position in api.personnel_positions().await? {
                println!("{}", position);
            }
        }
        PersonnelCommand::Create { fields } => output::print_json(&api.create_personnel(&fields.into()).await?)?,
        PersonnelCommand::Update { id, fields } => {
            output::print_json(&api.update_personnel(id, &fields.into()).await?)?
        }
        PersonnelCommand::Status { id, status } => output::print_ack(
            &api.update_personnel_status(id, status).await?,
            &format!("Personnel {} is now {}.", id, status),
        ),
        PersonnelCommand::Delete { id } => output::print_ack(&api.delete_personnel(id).await?, "Personnel deleted."),
    }
    Ok(())
}

async fn projects(api: &ApiClient, cmd: ProjectsCommand) -> Result<()> {
    match cmd {
        ProjectsCommand::List { filter, client_id } => {
            let mut params = filter.params().with_stats();
            if let Some(client_id) = client_id {
                params = params.client(client_id);
            }
            output::print_projects(&api.list_projects(&params).await?);
        }
        ProjectsCommand::Show { id } => output::print_json(&api.get_project(id).await?)?,
        ProjectsCommand::Stats => output::print_project_stats(&api.project_stats().await?),
        ProjectsCommand::Create { fields } => output::print_json(&api.create_project(&fields.into()).await?)?,
        ProjectsCommand::Update { id, fields } => {
            output::print_ack(&api.update_project(id, &fields.into()).await?, "Project updated.")
        }
        ProjectsCommand::Status { id, status } => {
            let stats = api.change_project_status(id, status).await?;
            println!("Project {} is now {}.", id, status);
            output::print_project_stats(&stats);
        }
        ProjectsCommand::Delete { id } => output::print_ack(&api.delete_project(id).await?, "Project deleted."),
        ProjectsCommand::Assign {
            project_id,
            personnel_id,
            role,
        } => output::print_ack(
            &api.assign_personnel(project_id, personnel_id, role.as_deref()).await?,
            "Personnel assigned.",
        ),
        ProjectsCommand::Unassign {
            project_id,
            personnel_id,
        } => output::print_ack(
            &api.unassign_personnel(project_id, personnel_id).await?,
            "Personnel unassigned.",
        ),
    }
    Ok(())
}
