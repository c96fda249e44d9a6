//! Task generation with Pareto-weighted assignment and completion modeling.

use std::collections::HashMap;

use rand::Rng;
use time::{Date, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::dates;
use crate::department::Department;
use crate::generators::project::{GeneratedProject, GeneratedSection, ProjectType};
use crate::generators::user::GeneratedUser;
use crate::ids::IdSource;
use crate::text::TextProvider;

/// Task priority matching the database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Generated task record ready for database insertion.
///
/// `num_comments` starts at zero and is back-patched by the comment stage
/// before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub section_id: Uuid,
    pub parent_task_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<Date>,
    pub created_at: Date,
    pub created_by: Uuid,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
    pub completed_by: Option<Uuid>,
    pub priority: Priority,
    pub num_likes: i64,
    pub num_subtasks: i64,
    pub num_comments: i64,
}

fn name_templates(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => &[
            "Implement {} feature",
            "Fix bug in {}",
            "Add unit tests for {}",
            "Refactor {} module",
            "Optimize {} performance",
            "Deploy {} to production",
            "Review PR for {}",
            "Update {} documentation",
            "Debug {} issue",
            "Migrate {} to new architecture",
            "Add error handling for {}",
            "Improve {} security",
            "Scale {} infrastructure",
            "Investigate {} performance bottleneck",
            "Configure {} monitoring",
            "Integrate {} service",
        ],
        Department::SalesMarketing => &[
            "Write blog post about {}",
            "Create {} campaign",
            "Design {} graphics",
            "Update {} landing page",
            "Schedule {} webinar",
            "Draft {} email",
            "Analyze {} metrics",
            "Optimize {} conversion",
            "Create {} presentation",
            "Plan {} strategy",
            "Research {} competitors",
            "Launch {} initiative",
            "Prepare {} demo",
            "Track {} performance",
        ],
        Department::Operations => &[
            "Process {} requests",
            "Review {} policy",
            "Update {} procedures",
            "Prepare {} report",
            "Schedule {} meeting",
            "Audit {} systems",
            "Streamline {} workflow",
            "Implement {} tool",
            "Train team on {}",
            "Evaluate {} vendors",
            "Document {} process",
            "Coordinate {} logistics",
        ],
        Department::ProductDesign => &[
            "Design {} mockups",
            "Conduct {} user research",
            "Update {} wireframes",
            "Create {} prototype",
            "Test {} with users",
            "Iterate on {} design",
            "Gather feedback on {}",
            "Define {} requirements",
            "Sketch {} concepts",
            "Validate {} hypothesis",
            "Refine {} user flow",
            "Build {} interactive prototype",
        ],
    }
}

fn components(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => &[
            "authentication",
            "payment API",
            "user dashboard",
            "database schema",
            "notification system",
            "search functionality",
            "caching layer",
            "API endpoints",
            "user profile",
            "admin panel",
            "reporting module",
            "email service",
            "file upload",
            "data migration",
            "integration tests",
            "CI/CD pipeline",
            "error logging",
            "session management",
            "data validation",
            "security audit",
        ],
        Department::SalesMarketing => &[
            "Q1 campaign",
            "product launch",
            "SEO strategy",
            "social media presence",
            "email newsletter",
            "case study",
            "webinar series",
            "landing page",
            "ad campaign",
            "content calendar",
            "lead magnet",
            "sales deck",
            "customer testimonials",
            "brand guidelines",
            "market research",
            "competitor analysis",
        ],
        Department::Operations => &[
            "onboarding",
            "quarterly review",
            "budget planning",
            "compliance audit",
            "vendor contracts",
            "employee handbook",
            "IT security",
            "office setup",
            "payroll",
            "benefits enrollment",
            "performance reviews",
            "team building",
            "expense tracking",
            "resource allocation",
            "policy updates",
            "training program",
        ],
        Department::ProductDesign => &[
            "checkout flow",
            "mobile app",
            "homepage redesign",
            "user profile page",
            "settings page",
            "navigation menu",
            "dashboard layout",
            "onboarding flow",
            "search interface",
            "notification center",
            "error states",
            "loading states",
            "empty states",
            "confirmation dialogs",
            "filter controls",
            "accessibility features",
        ],
    }
}

/// Pareto-style selection weights: the i-th candidate gets mass
/// proportional to `1 / (i + 1)^exponent`, normalized to sum to one. A few
/// early candidates absorb most of the assignment load.
pub fn pareto_weights(n: usize, exponent: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let raw: Vec<f64> = (0..n).map(|i| 1.0 / ((i + 1) as f64).powf(exponent)).collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

pub(crate) fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> usize {
    let roll: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return i;
        }
    }
    weights.len() - 1
}

/// Completion probability rises with task age up to a 30-day saturation
/// point, scaled by a project-type base rate.
fn completion_probability(project_type: ProjectType, age_days: f64) -> f64 {
    let base_rate = match project_type {
        ProjectType::Sprint => 0.75,
        ProjectType::Ongoing => 0.45,
        _ => 0.65,
    };
    let age_factor = (age_days.max(0.0) / 30.0).min(1.0);
    base_rate * (0.5 + 0.5 * age_factor)
}

/// Configuration for task generation.
#[derive(Debug, Clone)]
pub struct TaskGenConfig {
    /// Probability that a task gets an assignee at all.
    pub assign_probability: f64,
    /// Exponent of the Pareto assignment skew.
    pub pareto_exponent: f64,
}

impl Default for TaskGenConfig {
    fn default() -> Self {
        Self {
            assign_probability: 0.85,
            pareto_exponent: 1.5,
        }
    }
}

/// Generates tasks for all projects.
pub struct TaskGenerator {
    config: TaskGenConfig,
}

impl TaskGenerator {
    pub fn new() -> Self {
        Self {
            config: TaskGenConfig::default(),
        }
    }

    pub fn with_config(config: TaskGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        projects: &[GeneratedProject],
        sections: &[GeneratedSection],
        users: &[GeneratedUser],
        text: Option<&dyn TextProvider>,
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedTask> {
        let mut tasks = Vec::new();

        let mut sections_by_project: HashMap<Uuid, Vec<&GeneratedSection>> = HashMap::new();
        for section in sections {
            sections_by_project
                .entry(section.project_id)
                .or_default()
                .push(section);
        }

        // Generation order gives each department list a stable ordering,
        // which the Pareto weights lean on.
        let mut users_by_department: HashMap<Department, Vec<&GeneratedUser>> = HashMap::new();
        let mut department_of: HashMap<Uuid, Department> = HashMap::new();
        for user in users {
            users_by_department.entry(user.department).or_default().push(user);
            department_of.insert(user.id, user.department);
        }

        debug!(projects = projects.len(), "generating tasks");

        let (min_tasks, max_tasks) = cfg.tasks_per_project;
        for project in projects {
            let Some(project_sections) = sections_by_project.get(&project.id) else {
                warn!(project = %project.name, "project has no sections, skipping");
                continue;
            };

            let department = project
                .owner_id
                .and_then(|owner| department_of.get(&owner).copied())
                .unwrap_or(Department::Engineering);

            let candidates: &[&GeneratedUser] = match users_by_department.get(&department) {
                Some(dept_users) if !dept_users.is_empty() => dept_users,
                _ => {
                    warn!(project = %project.name, "no candidate users, skipping project");
                    continue;
                }
            };

            let count = rng.gen_range(min_tasks..=max_tasks);
            for _ in 0..count {
                tasks.push(self.generate_single(
                    project,
                    project_sections,
                    candidates,
                    department,
                    text,
                    cfg,
                    ids,
                    rng,
                ));
            }
        }

        tasks
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_single(
        &self,
        project: &GeneratedProject,
        sections: &[&GeneratedSection],
        candidates: &[&GeneratedUser],
        department: Department,
        text: Option<&dyn TextProvider>,
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> GeneratedTask {
        let created_at = dates::uniform_between(project.created_at, cfg.today, rng);
        let section = sections[rng.gen_range(0..sections.len())];

        let assignee_id = if rng.r#gen::<f64>() < self.config.assign_probability {
            let weights = pareto_weights(candidates.len(), self.config.pareto_exponent);
            Some(candidates[weighted_index(&weights, rng)].id)
        } else {
            None
        };

        let due_date = dates::due_date(created_at, rng);

        let age_days = (cfg.today - created_at).whole_days() as f64;
        let completed = rng.r#gen::<f64>() < completion_probability(project.project_type, age_days);
        let (completed_at, completed_by) = if completed {
            (Some(dates::completion_time(created_at, rng)), assignee_id)
        } else {
            (None, None)
        };

        let name = self.task_name(&project.name, department, text, rng);
        let description = self.task_description(&name, text, rng);

        let num_likes = if rng.r#gen::<f64>() < 0.3 {
            rng.gen_range(0..=5)
        } else {
            0
        };

        GeneratedTask {
            id: ids.next_id(),
            project_id: project.id,
            section_id: section.id,
            parent_task_id: None,
            name,
            description,
            assignee_id,
            due_date,
            created_at,
            created_by: candidates[rng.gen_range(0..candidates.len())].id,
            completed,
            completed_at,
            completed_by,
            priority: sample_priority(rng),
            num_likes,
            num_subtasks: 0,
            num_comments: 0,
        }
    }

    /// Generates a task name: half the time through the text capability
    /// (validated for plausible length), otherwise from template and
    /// component pools with occasional version/quarter/phase variation.
    fn task_name(
        &self,
        project_name: &str,
        department: Department,
        text: Option<&dyn TextProvider>,
        rng: &mut impl Rng,
    ) -> String {
        if let Some(text) = text {
            if rng.r#gen::<f64>() < 0.5 {
                let prompt = format!(
                    "Generate a realistic task name for project \"{project_name}\" in the {} \
                     department. Return only the task name, no explanation or quotes.",
                    department.label(),
                );
                let name = text
                    .generate(&prompt, 0.9)
                    .trim()
                    .trim_matches(['"', '\''])
                    .to_string();
                if name.len() > 5 && name.len() < 150 {
                    return name;
                }
            }
        }

        let templates = name_templates(department);
        let pool = components(department);
        let template = templates[rng.gen_range(0..templates.len())];
        let component = pool[rng.gen_range(0..pool.len())];

        let subject = if rng.r#gen::<f64>() < 0.3 {
            match rng.gen_range(0..4) {
                0 => format!("{component} v{}", rng.gen_range(1..=5)),
                1 => format!("{component} Q{}", rng.gen_range(1..=4)),
                2 => format!("{component} Phase {}", rng.gen_range(1..=3)),
                _ => component.to_string(),
            }
        } else {
            component.to_string()
        };

        template.replacen("{}", &subject, 1)
    }

    /// Generates a description with varied detail: 20% empty, the rest
    /// split between brief and detailed forms.
    fn task_description(
        &self,
        task_name: &str,
        text: Option<&dyn TextProvider>,
        rng: &mut impl Rng,
    ) -> String {
        let detail: f64 = rng.r#gen();
        if detail < 0.2 {
            return String::new();
        }

        if let Some(text) = text {
            if rng.r#gen::<f64>() < 0.5 {
                let prompt = if detail < 0.7 {
                    format!("Write a brief 1-2 sentence task description for: {task_name}. No preamble.")
                } else {
                    format!(
                        "Write a detailed task description with 2-3 acceptance criteria bullet \
                         points for: {task_name}. Format with bullet points. No preamble."
                    )
                };
                let description = text.generate(&prompt, 0.7);
                if description.len() > 10 {
                    return description.trim().to_string();
                }
            }
        }

        if detail < 0.7 {
            format!("Complete the task: {task_name}. Coordinate with team members as needed.")
        } else {
            format!(
                "Complete the task: {task_name}\n\n\
                 Acceptance Criteria:\n\
                 - Implementation matches requirements\n\
                 - All tests passing\n\
                 - Documentation updated\n\
                 - Code review completed"
            )
        }
    }
}

impl Default for TaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_priority(rng: &mut impl Rng) -> Priority {
    let roll: f64 = rng.r#gen();
    if roll < 0.20 {
        Priority::Low
    } else if roll < 0.70 {
        Priority::Medium
    } else if roll < 0.90 {
        Priority::High
    } else {
        Priority::Urgent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::project::ProjectGenerator;
    use crate::generators::team::TeamGenerator;
    use crate::generators::user::UserGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_config() -> SimConfig {
        SimConfig {
            target_employee_count: 120,
            team_count: 8,
            tasks_per_project: (3, 10),
            ..Default::default()
        }
    }

    fn run(cfg: &SimConfig) -> (Vec<GeneratedTask>, Vec<GeneratedProject>) {
        let mut rng = StdRng::seed_from_u64(41);
        let mut ids = IdSource::from_seed(41);
        let org_id = Uuid::nil();
        let teams = TeamGenerator::new().generate(org_id, cfg, &mut ids, &mut rng);
        let (users, _) =
            UserGenerator::new().generate(org_id, "example.com", &teams, cfg, &mut ids, &mut rng);
        let (projects, sections) =
            ProjectGenerator::new().generate(&teams, &users, None, cfg, &mut ids, &mut rng);
        let tasks = TaskGenerator::new().generate(
            &projects, &sections, &users, None, cfg, &mut ids, &mut rng,
        );
        (tasks, projects)
    }

    #[test]
    fn test_pareto_weights_shape() {
        for n in [2, 5, 20, 100] {
            let weights = pareto_weights(n, 1.5);
            assert_eq!(weights.len(), n);

            let total: f64 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");

            assert!(weights[0] > weights[n - 1]);
            for pair in weights.windows(2) {
                assert!(pair[0] >= pair[1], "weights must be non-increasing");
            }
        }
    }

    #[test]
    fn test_pareto_weights_degenerate_cases() {
        assert!(pareto_weights(0, 1.5).is_empty());
        assert_eq!(pareto_weights(1, 1.5), vec![1.0]);
    }

    #[test]
    fn test_completion_probability_model() {
        // Fresh tasks start at half the base rate
        assert!((completion_probability(ProjectType::Sprint, 0.0) - 0.375).abs() < 1e-9);
        // Saturates at 30 days
        assert!((completion_probability(ProjectType::Sprint, 30.0) - 0.75).abs() < 1e-9);
        assert!((completion_probability(ProjectType::Sprint, 300.0) - 0.75).abs() < 1e-9);
        assert!((completion_probability(ProjectType::Ongoing, 30.0) - 0.45).abs() < 1e-9);
        assert!((completion_probability(ProjectType::Initiative, 30.0) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_completion_invariants() {
        let cfg = small_config();
        let (tasks, _) = run(&cfg);
        assert!(!tasks.is_empty());

        let mut completed_seen = false;
        for task in &tasks {
            if task.completed {
                completed_seen = true;
                let completed_at = task.completed_at.expect("completed tasks have a timestamp");
                assert!(completed_at >= dates::at_midnight(task.created_at));
                assert_eq!(task.completed_by, task.assignee_id);
            } else {
                assert!(task.completed_at.is_none());
                assert!(task.completed_by.is_none());
            }
        }
        assert!(completed_seen, "expected at least one completed task");
    }

    #[test]
    fn test_task_dates_within_project_window() {
        let cfg = small_config();
        let (tasks, projects) = run(&cfg);
        for task in &tasks {
            let project = projects.iter().find(|p| p.id == task.project_id).unwrap();
            assert!(task.created_at >= project.created_at);
            assert!(task.created_at <= cfg.today);
        }
    }

    #[test]
    fn test_tasks_reference_project_sections() {
        let cfg = small_config();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ids = IdSource::from_seed(42);
        let org_id = Uuid::nil();
        let teams = TeamGenerator::new().generate(org_id, &cfg, &mut ids, &mut rng);
        let (users, _) =
            UserGenerator::new().generate(org_id, "example.com", &teams, &cfg, &mut ids, &mut rng);
        let (projects, sections) =
            ProjectGenerator::new().generate(&teams, &users, None, &cfg, &mut ids, &mut rng);
        let tasks = TaskGenerator::new().generate(
            &projects, &sections, &users, None, &cfg, &mut ids, &mut rng,
        );

        for task in &tasks {
            let section = sections.iter().find(|s| s.id == task.section_id).unwrap();
            assert_eq!(section.project_id, task.project_id);
            assert!(task.parent_task_id.is_none());
            assert!(!task.name.is_empty());
        }
    }

    #[test]
    fn test_skips_projects_without_sections() {
        let cfg = small_config();
        let mut rng = StdRng::seed_from_u64(43);
        let mut ids = IdSource::from_seed(43);
        let org_id = Uuid::nil();
        let teams = TeamGenerator::new().generate(org_id, &cfg, &mut ids, &mut rng);
        let (users, _) =
            UserGenerator::new().generate(org_id, "example.com", &teams, &cfg, &mut ids, &mut rng);
        let (projects, _) =
            ProjectGenerator::new().generate(&teams, &users, None, &cfg, &mut ids, &mut rng);

        // No sections at all: every project is skipped rather than failing
        let tasks =
            TaskGenerator::new().generate(&projects, &[], &users, None, &cfg, &mut ids, &mut rng);
        assert!(tasks.is_empty());
    }
}
