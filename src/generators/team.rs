//! Team generation with department-weighted partitioning.

use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::config::SimConfig;
use crate::dates;
use crate::department::{Department, DepartmentMix};
use crate::ids::IdSource;

/// Generated team record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTeam {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub description: String,
    pub department: Department,
    pub created_at: Date,
}

const ENGINEERING_TEAMS: &[&str] = &[
    "Backend Engineering",
    "Frontend Engineering",
    "Mobile iOS",
    "Mobile Android",
    "Platform Infrastructure",
    "DevOps",
    "QA & Testing",
    "Security Engineering",
    "Data Engineering",
    "Machine Learning",
    "API Services",
    "Cloud Infrastructure",
    "Site Reliability Engineering",
    "Core Platform",
    "Developer Tools",
    "Automation Engineering",
];

const SALES_MARKETING_TEAMS: &[&str] = &[
    "Growth Marketing",
    "Content Marketing",
    "Product Marketing",
    "Brand & Creative",
    "Sales Development",
    "Enterprise Sales",
    "Customer Success",
    "Demand Generation",
    "Marketing Operations",
    "Sales Operations",
    "Field Marketing",
    "Digital Marketing",
    "Account Management",
    "Partnership Development",
];

const OPERATIONS_TEAMS: &[&str] = &[
    "Human Resources",
    "Finance & Accounting",
    "Legal & Compliance",
    "IT Support",
    "Facilities",
    "People Operations",
    "Business Operations",
    "Talent Acquisition",
    "Financial Planning & Analysis",
    "Corporate Development",
];

const PRODUCT_DESIGN_TEAMS: &[&str] = &[
    "Product Management",
    "UX Research",
    "UI/UX Design",
    "Product Analytics",
    "Design Systems",
    "Product Strategy",
    "Visual Design",
    "Interaction Design",
];

fn name_pool(department: Department) -> &'static [&'static str] {
    match department {
        Department::Engineering => ENGINEERING_TEAMS,
        Department::SalesMarketing => SALES_MARKETING_TEAMS,
        Department::Operations => OPERATIONS_TEAMS,
        Department::ProductDesign => PRODUCT_DESIGN_TEAMS,
    }
}

/// Founding-relative creation window per department, in days.
///
/// Core engineering and operations teams exist from the start; sales ramps
/// up next, product and design latest.
fn creation_window(department: Department) -> (i64, i64) {
    match department {
        Department::Engineering | Department::Operations => (0, 730),
        Department::SalesMarketing => (180, 1460),
        Department::ProductDesign => (90, 1825),
    }
}

/// Generates teams split across departments by the configured mix.
pub struct TeamGenerator;

impl TeamGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Splits the target team count across departments.
    ///
    /// Departments with a positive fraction get `floor(target * fraction)`
    /// teams, minimum one; rounding drift lands on the department with the
    /// largest fraction so the total stays exact.
    pub fn department_counts(mix: &DepartmentMix, target: usize) -> Vec<(Department, usize)> {
        let mut counts: Vec<(Department, usize)> = Department::ALL
            .iter()
            .filter(|&&d| mix.fraction(d) > 0.0)
            .map(|&d| (d, ((target as f64 * mix.fraction(d)) as usize).max(1)))
            .collect();

        let assigned: usize = counts.iter().map(|(_, count)| count).sum();
        let largest = mix.largest();
        if let Some(entry) = counts.iter_mut().find(|(d, _)| *d == largest) {
            if assigned < target {
                entry.1 += target - assigned;
            } else {
                entry.1 = entry.1.saturating_sub(assigned - target).max(1);
            }
        }

        counts
    }

    pub fn generate(
        &self,
        org_id: Uuid,
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedTeam> {
        let counts = Self::department_counts(&cfg.department_mix, cfg.team_count);
        let mut teams = Vec::new();

        for (department, count) in counts {
            debug!(department = department.label(), count, "generating teams");

            let pool = name_pool(department);
            let mut available: Vec<&str> = pool.to_vec();
            available.shuffle(rng);

            let (window_start, window_end) = creation_window(department);
            let earliest = dates::increment_capped(cfg.founding_date, window_start, cfg.today);
            let latest = dates::increment_capped(cfg.founding_date, window_end, cfg.today);

            for i in 0..count {
                let name = match available.pop() {
                    Some(name) => name.to_string(),
                    // Pool exhausted, fall back to ordinal names
                    None => format!("{} Team {}", department.label(), i + 1 - pool.len()),
                };

                let created_at = dates::uniform_between(earliest, latest, rng);
                let description = Self::describe(&name, department, rng);

                teams.push(GeneratedTeam {
                    id: ids.next_id(),
                    org_id,
                    name,
                    description,
                    department,
                    created_at,
                });
            }
        }

        teams
    }

    fn describe(name: &str, department: Department, rng: &mut impl Rng) -> String {
        let lowered = name.to_lowercase();
        match rng.gen_range(0..4) {
            0 => format!("{} team focused on {lowered}", department.label()),
            1 => format!("Responsible for {lowered} initiatives"),
            2 => format!(
                "Dedicated {} team handling {lowered}",
                department.label().to_lowercase()
            ),
            _ => format!("Cross-functional team specializing in {lowered}"),
        }
    }
}

impl Default for TeamGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engineering_only;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate_with(cfg: &SimConfig) -> Vec<GeneratedTeam> {
        let mut rng = StdRng::seed_from_u64(11);
        let mut ids = IdSource::from_seed(11);
        TeamGenerator::new().generate(Uuid::nil(), cfg, &mut ids, &mut rng)
    }

    #[test]
    fn test_department_counts_are_exact() {
        let mix = DepartmentMix::default();
        for target in [4, 10, 42, 85, 200] {
            let counts = TeamGenerator::department_counts(&mix, target);
            let total: usize = counts.iter().map(|(_, c)| c).sum();
            assert_eq!(total, target, "target {target}");
            for (department, count) in counts {
                assert!(count >= 1, "{department:?} got zero teams");
            }
        }
    }

    #[test]
    fn test_single_department_single_team() {
        let counts = TeamGenerator::department_counts(&engineering_only(), 1);
        assert_eq!(counts, vec![(Department::Engineering, 1)]);
    }

    #[test]
    fn test_team_dates_within_simulation_window() {
        let cfg = SimConfig::default();
        let teams = generate_with(&cfg);
        assert_eq!(teams.len(), cfg.team_count);
        for team in &teams {
            assert!(team.created_at >= cfg.founding_date);
            assert!(team.created_at <= cfg.today);
        }
    }

    #[test]
    fn test_names_unique_until_pool_exhausted() {
        let cfg = SimConfig {
            team_count: 60,
            target_employee_count: 100,
            ..Default::default()
        };
        let teams = generate_with(&cfg);

        // Engineering gets more teams than its 16-name pool; the overflow
        // takes ordinal fallback names and stays unique.
        let engineering: Vec<&str> = teams
            .iter()
            .filter(|t| t.department == Department::Engineering)
            .map(|t| t.name.as_str())
            .collect();
        let unique: std::collections::HashSet<&&str> = engineering.iter().collect();
        assert_eq!(unique.len(), engineering.len());
        assert!(engineering.iter().any(|n| n.contains("Engineering Team")));
    }
}
