//! User and membership generation with unique email allocation.

use std::collections::HashMap;

use rand::Rng;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::dates;
use crate::department::Department;
use crate::generators::team::GeneratedTeam;
use crate::ids::IdSource;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Thompson", "White",
];

fn job_titles(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => &[
            "Software Engineer",
            "Senior Software Engineer",
            "Staff Engineer",
            "Engineering Manager",
            "Senior Engineering Manager",
            "Director of Engineering",
            "QA Engineer",
            "DevOps Engineer",
            "Security Engineer",
            "Data Engineer",
            "Principal Engineer",
            "VP of Engineering",
            "CTO",
        ],
        Department::SalesMarketing => &[
            "Marketing Manager",
            "Content Writer",
            "SEO Specialist",
            "Product Marketing Manager",
            "Sales Representative",
            "Account Executive",
            "Sales Manager",
            "CMO",
            "Customer Success Manager",
            "Growth Manager",
            "VP of Sales",
            "VP of Marketing",
            "Marketing Coordinator",
            "Sales Development Representative",
        ],
        Department::Operations => &[
            "HR Manager",
            "Recruiter",
            "Finance Manager",
            "Accountant",
            "Legal Counsel",
            "IT Administrator",
            "Operations Manager",
            "Senior Recruiter",
            "HR Business Partner",
            "Compliance Officer",
            "CFO",
            "COO",
        ],
        Department::ProductDesign => &[
            "Product Manager",
            "Senior Product Manager",
            "UX Designer",
            "UI Designer",
            "UX Researcher",
            "Product Designer",
            "VP of Product",
            "Design Lead",
            "Staff Product Manager",
            "Design Director",
            "Chief Product Officer",
        ],
    }
}

/// Generated user record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub org_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub department: Department,
    pub profile_photo_url: String,
    /// Hire date.
    pub created_at: Date,
    pub last_active: OffsetDateTime,
    pub is_active: bool,
}

/// Membership role matching the database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipRole {
    Member,
    Admin,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Member => "member",
            MembershipRole::Admin => "admin",
        }
    }
}

/// Generated team membership ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTeamMembership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    /// Always the user's hire date.
    pub joined_at: Date,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Probability that a membership carries the admin role.
    pub admin_probability: f64,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            admin_probability: 0.1,
        }
    }
}

/// Generates users and their team memberships.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates users distributed across departments and teams.
    ///
    /// Each department gets `floor(total * fraction)` users spread evenly
    /// over its teams (minimum one per team); the integer-division remainder
    /// is dropped, so the final headcount is target-seeking rather than
    /// exact. Every user gets exactly one membership, joined on hire date.
    pub fn generate(
        &self,
        org_id: Uuid,
        domain: &str,
        teams: &[GeneratedTeam],
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> (Vec<GeneratedUser>, Vec<GeneratedTeamMembership>) {
        let mut users = Vec::new();
        let mut memberships = Vec::new();
        let mut email_counts: HashMap<String, u32> = HashMap::new();

        for department in Department::ALL {
            let dept_teams: Vec<&GeneratedTeam> = teams
                .iter()
                .filter(|t| t.department == department)
                .collect();

            let fraction = cfg.department_mix.fraction(department);
            let dept_count = (cfg.target_employee_count as f64 * fraction) as usize;

            if dept_teams.is_empty() {
                if dept_count > 0 {
                    warn!(
                        department = department.label(),
                        "no teams for department, skipping its users"
                    );
                }
                continue;
            }

            let users_per_team = (dept_count / dept_teams.len()).max(1);
            debug!(
                department = department.label(),
                dept_count,
                teams = dept_teams.len(),
                users_per_team,
                "generating users"
            );

            for team in dept_teams {
                for _ in 0..users_per_team {
                    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
                    let email = allocate_email(first, last, domain, &mut email_counts);

                    let hired = dates::uniform_between(cfg.founding_date, cfg.today, rng);
                    let id = ids.next_id();
                    let titles = job_titles(department);

                    users.push(GeneratedUser {
                        id,
                        org_id,
                        email,
                        first_name: first.to_string(),
                        last_name: last.to_string(),
                        job_title: titles[rng.gen_range(0..titles.len())].to_string(),
                        department,
                        profile_photo_url: format!("https://i.pravatar.cc/150?u={id}"),
                        created_at: hired,
                        last_active: sample_last_active(cfg.today, rng),
                        is_active: true,
                    });

                    let role = if rng.r#gen::<f64>() < self.config.admin_probability {
                        MembershipRole::Admin
                    } else {
                        MembershipRole::Member
                    };

                    memberships.push(GeneratedTeamMembership {
                        id: ids.next_id(),
                        team_id: team.id,
                        user_id: id,
                        role,
                        joined_at: hired,
                    });
                }
            }
        }

        (users, memberships)
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates `first.last@domain`, appending an incrementing numeric suffix
/// when the base email has already been handed out in this run.
fn allocate_email(
    first: &str,
    last: &str,
    domain: &str,
    seen: &mut HashMap<String, u32>,
) -> String {
    let local = format!("{}.{}", first.to_lowercase(), last.to_lowercase());
    let base = format!("{local}@{domain}");

    match seen.get_mut(&base) {
        Some(count) => {
            *count += 1;
            format!("{local}{count}@{domain}")
        }
        None => {
            seen.insert(base.clone(), 0);
            base
        }
    }
}

/// Last-active recency: 90% within the last week, 5% within a month,
/// 5% within a quarter.
fn sample_last_active(today: Date, rng: &mut impl Rng) -> OffsetDateTime {
    let roll: f64 = rng.r#gen();
    let days_back = if roll < 0.90 {
        rng.gen_range(0..=7)
    } else if roll < 0.95 {
        rng.gen_range(8..=30)
    } else {
        rng.gen_range(31..=90)
    };

    dates::at_midnight(today) - Duration::days(days_back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engineering_only;
    use crate::generators::team::TeamGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(cfg: &SimConfig) -> (Vec<GeneratedUser>, Vec<GeneratedTeamMembership>) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut ids = IdSource::from_seed(21);
        let org_id = Uuid::nil();
        let teams = TeamGenerator::new().generate(org_id, cfg, &mut ids, &mut rng);
        UserGenerator::new().generate(org_id, "example.com", &teams, cfg, &mut ids, &mut rng)
    }

    #[test]
    fn test_email_collision_suffixes() {
        let mut seen = HashMap::new();
        assert_eq!(
            allocate_email("James", "Smith", "acme.com", &mut seen),
            "james.smith@acme.com"
        );
        assert_eq!(
            allocate_email("James", "Smith", "acme.com", &mut seen),
            "james.smith1@acme.com"
        );
        assert_eq!(
            allocate_email("James", "Smith", "acme.com", &mut seen),
            "james.smith2@acme.com"
        );
        // Different base is unaffected
        assert_eq!(
            allocate_email("Mary", "Lee", "acme.com", &mut seen),
            "mary.lee@acme.com"
        );
    }

    #[test]
    fn test_emails_unique_within_org() {
        let cfg = SimConfig {
            target_employee_count: 600,
            team_count: 12,
            ..Default::default()
        };
        let (users, _) = run(&cfg);
        let emails: std::collections::HashSet<&String> = users.iter().map(|u| &u.email).collect();
        assert_eq!(emails.len(), users.len());
    }

    #[test]
    fn test_single_engineering_team_scenario() {
        let cfg = SimConfig {
            target_employee_count: 10,
            team_count: 1,
            department_mix: engineering_only(),
            ..Default::default()
        };
        let (users, memberships) = run(&cfg);

        assert_eq!(users.len(), 10);
        assert_eq!(memberships.len(), 10);
        for user in &users {
            assert_eq!(user.department, Department::Engineering);
            let membership = memberships
                .iter()
                .find(|m| m.user_id == user.id)
                .expect("every user has a membership");
            assert_eq!(membership.joined_at, user.created_at);
        }
    }

    #[test]
    fn test_hire_dates_within_window() {
        let cfg = SimConfig {
            target_employee_count: 200,
            team_count: 8,
            ..Default::default()
        };
        let (users, _) = run(&cfg);
        assert!(!users.is_empty());
        for user in &users {
            assert!(user.created_at >= cfg.founding_date);
            assert!(user.created_at <= cfg.today);
            assert!(user.last_active <= dates::at_midnight(cfg.today));
            assert!(user.is_active);
        }
    }
}
