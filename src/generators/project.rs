//! Project and section generation with department-conditioned policies.

use rand::Rng;
use time::{Date, Duration};
use tracing::debug;
use uuid::Uuid;

use crate::config::{MIN_PROJECTS_PER_TEAM, SimConfig};
use crate::dates;
use crate::department::Department;
use crate::generators::team::GeneratedTeam;
use crate::generators::user::GeneratedUser;
use crate::ids::IdSource;
use crate::text::TextProvider;

/// Project type matching the database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Sprint,
    Ongoing,
    Initiative,
    Campaign,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Sprint => "sprint",
            ProjectType::Ongoing => "ongoing",
            ProjectType::Initiative => "initiative",
            ProjectType::Campaign => "campaign",
        }
    }
}

/// Project status matching the database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Archived,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Archived => "archived",
            ProjectStatus::OnHold => "on_hold",
        }
    }
}

/// Generated project record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProject {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub description: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub owner_id: Option<Uuid>,
    pub start_date: Option<Date>,
    pub due_date: Option<Date>,
    pub created_at: Date,
    pub color: String,
    pub privacy: String,
}

/// Generated section record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSection {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub position: i64,
    pub created_at: Date,
}

const PROJECT_COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "purple", "pink", "gray",
];

fn name_pool(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => &[
            "Q1 Sprint",
            "Infrastructure Update",
            "Performance Optimization",
            "API Redesign",
            "Mobile Refactor",
        ],
        Department::SalesMarketing => &[
            "Q1 Campaign",
            "Product Launch",
            "Lead Generation",
            "Brand Refresh",
            "Content Strategy",
        ],
        Department::Operations => &[
            "Process Improvement",
            "System Upgrade",
            "Team Training",
            "Policy Update",
            "Audit",
        ],
        Department::ProductDesign => &[
            "Design System",
            "User Research",
            "Prototyping",
            "UX Audit",
            "Feature Design",
        ],
    }
}

/// Fixed ordered section layout per department.
fn section_template(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => &["Backlog", "To Do", "In Progress", "Code Review", "Done"],
        Department::SalesMarketing => &["Planning", "In Progress", "Review", "Completed"],
        Department::Operations | Department::ProductDesign => &["To Do", "In Progress", "Done"],
    }
}

/// Generates projects and their sections per team.
pub struct ProjectGenerator;

impl ProjectGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        teams: &[GeneratedTeam],
        users: &[GeneratedUser],
        text: Option<&dyn TextProvider>,
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> (Vec<GeneratedProject>, Vec<GeneratedSection>) {
        let mut projects = Vec::new();
        let mut sections = Vec::new();

        for team in teams {
            let count = rng.gen_range(MIN_PROJECTS_PER_TEAM..=cfg.max_projects_per_team);
            debug!(team = %team.name, count, "generating projects");

            let dept_users: Vec<&GeneratedUser> = users
                .iter()
                .filter(|u| u.department == team.department)
                .collect();

            for _ in 0..count {
                let project_type = sample_type(team.department, rng);
                let status = sample_status(rng);
                let created_at = dates::uniform_between(team.created_at, cfg.today, rng);

                let (start_date, due_date) = match project_type {
                    ProjectType::Sprint => {
                        (Some(created_at), Some(created_at + Duration::days(14)))
                    }
                    ProjectType::Campaign => (
                        Some(created_at),
                        Some(created_at + Duration::days(rng.gen_range(28..=56))),
                    ),
                    _ => (None, None),
                };

                let owner_id = if dept_users.is_empty() {
                    None
                } else {
                    Some(dept_users[rng.gen_range(0..dept_users.len())].id)
                };

                let name = self.project_name(team, project_type, text, rng);
                let description = self.project_description(&name, team.department, text);
                let project_id = ids.next_id();

                projects.push(GeneratedProject {
                    id: project_id,
                    team_id: team.id,
                    name,
                    description,
                    project_type,
                    status,
                    owner_id,
                    start_date,
                    due_date,
                    created_at,
                    color: PROJECT_COLORS[rng.gen_range(0..PROJECT_COLORS.len())].to_string(),
                    privacy: "public".to_string(),
                });

                for (position, section_name) in section_template(team.department).iter().enumerate()
                {
                    sections.push(GeneratedSection {
                        id: ids.next_id(),
                        project_id,
                        name: section_name.to_string(),
                        position: position as i64,
                        created_at,
                    });
                }
            }
        }

        (projects, sections)
    }

    fn project_name(
        &self,
        team: &GeneratedTeam,
        project_type: ProjectType,
        text: Option<&dyn TextProvider>,
        rng: &mut impl Rng,
    ) -> String {
        if let Some(text) = text {
            let prompt = format!(
                "Generate a realistic project name for a {} team called \"{}\". \
                 Project type: {}. Return only the project name, no explanation.",
                team.department.label(),
                team.name,
                project_type.as_str(),
            );
            return text
                .generate(&prompt, 0.9)
                .trim()
                .trim_matches('"')
                .to_string();
        }

        let pool = name_pool(team.department);
        format!(
            "{} {}",
            pool[rng.gen_range(0..pool.len())],
            rng.gen_range(1..=5)
        )
    }

    fn project_description(
        &self,
        name: &str,
        department: Department,
        text: Option<&dyn TextProvider>,
    ) -> String {
        match text {
            Some(text) => {
                text.generate(&format!("Write a 2-sentence project description for: {name}"), 0.7)
            }
            None => format!("Project for {} team", department.label()),
        }
    }
}

impl Default for ProjectGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_type(department: Department, rng: &mut impl Rng) -> ProjectType {
    match department {
        Department::Engineering => {
            let roll: f64 = rng.r#gen();
            if roll < 0.6 {
                ProjectType::Sprint
            } else if roll < 0.9 {
                ProjectType::Ongoing
            } else {
                ProjectType::Initiative
            }
        }
        Department::SalesMarketing => {
            if rng.r#gen::<f64>() < 0.7 {
                ProjectType::Campaign
            } else {
                ProjectType::Ongoing
            }
        }
        Department::Operations | Department::ProductDesign => {
            if rng.r#gen::<bool>() {
                ProjectType::Initiative
            } else {
                ProjectType::Ongoing
            }
        }
    }
}

fn sample_status(rng: &mut impl Rng) -> ProjectStatus {
    let roll: f64 = rng.r#gen();
    if roll < 0.85 {
        ProjectStatus::Active
    } else if roll < 0.95 {
        ProjectStatus::Archived
    } else {
        ProjectStatus::OnHold
    }
}
