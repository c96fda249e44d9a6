//! Run configuration for the generation pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;
use time::macros::date;

use crate::department::DepartmentMix;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("department fractions must sum to 1.0, got {0}")]
    DistributionSum(f64),
    #[error("target_employee_count must be at least 1")]
    EmptyHeadcount,
    #[error("team_count {team_count} is below the {departments} departments with a positive fraction")]
    TooFewTeams { team_count: usize, departments: usize },
    #[error("max_projects_per_team must be at least {min}, got {got}")]
    ProjectRange { min: usize, got: usize },
    #[error("tasks_per_project range is empty: {min}..={max}")]
    TaskRange { min: usize, max: usize },
    #[error("founding_date {founding} is after today {today}")]
    InvertedDates { founding: Date, today: Date },
}

/// Minimum projects a team receives; the per-team draw is uniform in
/// `[MIN_PROJECTS_PER_TEAM, max_projects_per_team]`.
pub const MIN_PROJECTS_PER_TEAM: usize = 5;

/// Immutable inputs to a generation run.
///
/// Validated once up front via [`SimConfig::validate`]; nothing here changes
/// mid-pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Target headcount; per-team integer division may undershoot slightly.
    pub target_employee_count: usize,
    /// Total teams, split across departments by the mix.
    pub team_count: usize,
    pub department_mix: DepartmentMix,
    pub max_projects_per_team: usize,
    /// Inclusive range for the per-project task count draw.
    pub tasks_per_project: (usize, usize),
    /// Company founding date; anchors every other timestamp.
    pub founding_date: Date,
    /// Simulation "current" date; no generated timestamp exceeds it.
    pub today: Date,
    /// Rows per database insert batch.
    pub batch_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            target_employee_count: 7500,
            team_count: 85,
            department_mix: DepartmentMix::default(),
            max_projects_per_team: 8,
            tasks_per_project: (20, 100),
            founding_date: date!(2019 - 01 - 15),
            today: date!(2026 - 01 - 07),
            batch_size: 50,
        }
    }
}

impl SimConfig {
    /// Surfaces configuration errors before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.department_mix.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::DistributionSum(total));
        }
        if self.target_employee_count == 0 {
            return Err(ConfigError::EmptyHeadcount);
        }

        let departments = self.department_mix.active_departments();
        if self.team_count < departments {
            return Err(ConfigError::TooFewTeams {
                team_count: self.team_count,
                departments,
            });
        }

        if self.max_projects_per_team < MIN_PROJECTS_PER_TEAM {
            return Err(ConfigError::ProjectRange {
                min: MIN_PROJECTS_PER_TEAM,
                got: self.max_projects_per_team,
            });
        }

        let (min_tasks, max_tasks) = self.tasks_per_project;
        if min_tasks > max_tasks {
            return Err(ConfigError::TaskRange {
                min: min_tasks,
                max: max_tasks,
            });
        }

        if self.founding_date > self.today {
            return Err(ConfigError::InvertedDates {
                founding: self.founding_date,
                today: self.today,
            });
        }

        Ok(())
    }
}

/// Mix placing the whole organization in a single department; teams and
/// users land nowhere else.
#[cfg(test)]
pub(crate) fn engineering_only() -> DepartmentMix {
    DepartmentMix {
        engineering: 1.0,
        sales_marketing: 0.0,
        operations: 0.0,
        product_design: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_distribution() {
        let config = SimConfig {
            department_mix: DepartmentMix {
                engineering: 0.5,
                sales_marketing: 0.5,
                operations: 0.5,
                product_design: 0.0,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DistributionSum(_))));
    }

    #[test]
    fn test_rejects_zero_headcount() {
        let config = SimConfig {
            target_employee_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyHeadcount)));
    }

    #[test]
    fn test_rejects_too_few_teams() {
        let config = SimConfig {
            team_count: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TooFewTeams { .. })));
    }

    #[test]
    fn test_single_department_allows_single_team() {
        let config = SimConfig {
            team_count: 1,
            department_mix: engineering_only(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let config = SimConfig {
            founding_date: date!(2027 - 01 - 01),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvertedDates { .. })));
    }

    #[test]
    fn test_rejects_empty_task_range() {
        let config = SimConfig {
            tasks_per_project: (50, 20),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TaskRange { .. })));
    }
}
