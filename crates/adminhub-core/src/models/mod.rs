//! Data models for the admin backend.
//!
//! This module contains the structures exchanged with the REST API:
//!
//! - `Envelope`, `Ack`, `Pagination`: response wrappers shared by all endpoints
//! - `User`: the logged-in administrator
//! - `Contact`, `Client`, `Personnel`, `Project`: managed records, each with a
//!   `*Page` list type and a `*Form` body for create/update
//! - `ProjectStatus`, `PersonnelStatus`: status values with parsing for input

pub mod client;
pub mod contact;
pub mod envelope;
pub mod personnel;
pub mod project;
pub mod status;
pub mod user;

pub use client::{Client, ClientForm, ClientPage};
pub use contact::{Contact, ContactForm, ContactPage, ContactStats};
pub use envelope::{Ack, Envelope, Pagination};
pub use personnel::{Personnel, PersonnelForm, PersonnelPage};
pub use project::{AssignmentAction, Project, ProjectAssignment, ProjectForm, ProjectPage, ProjectStats};
pub use status::{PersonnelStatus, ProjectStatus};
pub use user::{LoginData, LoginRequest, User};
