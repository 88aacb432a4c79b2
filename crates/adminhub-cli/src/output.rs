//! Terminal rendering for command results.

use std::io::{self, Write};

use adminhub_core::models::{Ack, ClientPage, ContactPage, PersonnelPage, ProjectPage, ProjectStats, ProjectStatus};
use adminhub_core::utils::{format_date, format_optional, truncate_string};
use anyhow::Result;
use serde::Serialize;

/// Column width for names in list output
const NAME_WIDTH: usize = 28;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_ack(ack: &Ack, fallback: &str) {
    println!("{}", format_optional(ack.message.as_deref(), fallback));
}

pub fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn name_cell(name: &str) -> String {
    format!("{:<width$}", truncate_string(name, NAME_WIDTH), width = NAME_WIDTH)
}

pub fn print_contacts(page: &ContactPage) {
    for contact in &page.contacts {
        println!(
            "{:>5}  {}  {:<30}  {:<10}  {}",
            contact.id,
            name_cell(&contact.name),
            truncate_string(&contact.email, 30),
            format_optional(contact.status.as_deref(), "-"),
            format_date(contact.created_at.as_deref()),
        );
    }
    println!("{} ({} contacts)", page.pagination.display(), page.contacts.len());
    if let Some(stats) = &page.stats {
        println!("total: {}", stats.total);
    }
}

pub fn print_clients(page: &ClientPage) {
    for client in &page.clients {
        println!(
            "{:>5}  {}  {:<24}  {}",
            client.id,
            name_cell(&client.company),
            format_optional(client.contact_name.as_deref(), "-"),
            format_optional(client.email.as_deref(), "-"),
        );
    }
    println!("{}", page.pagination.display());
}

pub fn print_personnel(page: &PersonnelPage) {
    for person in &page.personnel {
        println!(
            "{:>5}  {}  {:<20}  {:<8}  {}",
            person.id,
            name_cell(&person.name),
            format_optional(person.position.as_deref(), "-"),
            person.status,
            person.email,
        );
    }
    println!("{}", page.pagination.display());
}

pub fn print_projects(page: &ProjectPage) {
    for project in &page.projects {
        println!(
            "{:>5}  {}  {:<12}  {:<20}  {} - {}",
            project.id,
            name_cell(&project.name),
            project.status,
            format_optional(project.client_company.as_deref(), "-"),
            format_date(project.start_date.as_deref()),
            format_date(project.end_date.as_deref()),
        );
    }
    println!("{}", page.pagination.display());
    if let Some(stats) = &page.stats {
        print_project_stats(stats);
    }
}

pub fn print_project_stats(stats: &ProjectStats) {
    let counts: Vec<String> = ProjectStatus::ALL
        .iter()
        .map(|status| format!("{} {}", status, stats.count_for(*status)))
        .collect();
    println!("total {} | {}", stats.total, counts.join(" | "));
}
