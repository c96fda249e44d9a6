//! Entity generators for seed data.
//!
//! This module provides generators for each layer of the workspace:
//! - [`OrganizationGenerator`]: The single root organization
//! - [`TeamGenerator`]: Teams split across departments
//! - [`UserGenerator`]: Users with emails, titles, and team memberships
//! - [`ProjectGenerator`]: Projects with sections per team
//! - [`TaskGenerator`]: Tasks with assignment and completion modeling
//! - [`CommentGenerator`]: Comment threads on tasks

pub mod comment;
pub mod organization;
pub mod project;
pub mod task;
pub mod team;
pub mod user;

pub use comment::{CommentGenConfig, CommentGenerator, CommentType, GeneratedComment};
pub use organization::{GeneratedOrganization, OrganizationGenerator};
pub use project::{
    GeneratedProject, GeneratedSection, ProjectGenerator, ProjectStatus, ProjectType,
};
pub use task::{GeneratedTask, Priority, TaskGenConfig, TaskGenerator};
pub use team::{GeneratedTeam, TeamGenerator};
pub use user::{
    GeneratedTeamMembership, GeneratedUser, MembershipRole, UserGenConfig, UserGenerator,
};
