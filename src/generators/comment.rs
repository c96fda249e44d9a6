//! Comment thread generation and task comment-count back-patching.

use rand::Rng;
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::config::SimConfig;
use crate::dates;
use crate::generators::task::GeneratedTask;
use crate::generators::user::GeneratedUser;
use crate::ids::IdSource;
use crate::text::{self, TextProvider};

const SYSTEM_COMMENTS: &[&str] = &[
    "Task moved to In Progress",
    "Due date changed",
    "Task assigned to user",
    "Task completed",
    "Attachment added",
];

const COMMENT_TEMPLATES: &[&str] = &[
    "I've started working on this.",
    "This is blocked on {dependency}, will pick it up once that lands.",
    "Quick question: {question}",
    "Updated the approach based on feedback.",
    "Can someone review this when they get a chance?",
    "Found an issue with {issue}, looking into it now.",
    "This is taking longer than expected, moving the estimate out.",
    "Done with the first pass, feedback welcome.",
    "Splitting this into smaller pieces for the next cycle.",
    "Confirmed with the stakeholders, we're good to proceed.",
];

/// Distribution over thread lengths 1 through 5.
const THREAD_LENGTH_WEIGHTS: &[f64] = &[0.5, 0.25, 0.15, 0.07, 0.03];

/// Comment kind matching the database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentType {
    System,
    Comment,
}

impl CommentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentType::System => "system",
            CommentType::Comment => "comment",
        }
    }
}

/// Generated comment record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub comment_type: CommentType,
    pub created_at: Date,
}

/// Configuration for comment generation.
#[derive(Debug, Clone)]
pub struct CommentGenConfig {
    /// Probability that a task gets no comments at all.
    pub skip_probability: f64,
    /// Probability that a comment is a system notice rather than prose.
    pub system_probability: f64,
    /// When the task has an assignee, probability the assignee authors the
    /// comment instead of a random user.
    pub assignee_bias: f64,
}

impl Default for CommentGenConfig {
    fn default() -> Self {
        Self {
            skip_probability: 0.6,
            system_probability: 0.2,
            assignee_bias: 0.6,
        }
    }
}

/// Generates comment threads for tasks.
pub struct CommentGenerator {
    config: CommentGenConfig,
}

impl CommentGenerator {
    pub fn new() -> Self {
        Self {
            config: CommentGenConfig::default(),
        }
    }

    pub fn with_config(config: CommentGenConfig) -> Self {
        Self { config }
    }

    /// Generates threads and back-patches `num_comments` on each task.
    pub fn generate(
        &self,
        tasks: &mut [GeneratedTask],
        users: &[GeneratedUser],
        text: Option<&dyn TextProvider>,
        cfg: &SimConfig,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedComment> {
        let mut comments = Vec::new();
        if users.is_empty() {
            return comments;
        }

        debug!(tasks = tasks.len(), "generating comment threads");

        for task in tasks.iter_mut() {
            if rng.r#gen::<f64>() < self.config.skip_probability {
                continue;
            }

            let length = 1 + thread_length_index(rng);
            for _ in 0..length {
                let comment_type = if rng.r#gen::<f64>() < self.config.system_probability {
                    CommentType::System
                } else {
                    CommentType::Comment
                };

                let body = match comment_type {
                    CommentType::System => {
                        SYSTEM_COMMENTS[rng.gen_range(0..SYSTEM_COMMENTS.len())].to_string()
                    }
                    CommentType::Comment => {
                        self.comment_text(&task.name, text, rng)
                    }
                };

                let user_id = self.pick_author(task.assignee_id, users, rng);
                comments.push(GeneratedComment {
                    id: ids.next_id(),
                    task_id: task.id,
                    user_id,
                    text: body,
                    comment_type,
                    created_at: dates::uniform_between(task.created_at, cfg.today, rng),
                });
            }

            task.num_comments = length as i64;
        }

        comments
    }

    fn comment_text(
        &self,
        task_name: &str,
        text: Option<&dyn TextProvider>,
        rng: &mut impl Rng,
    ) -> String {
        let template = COMMENT_TEMPLATES[rng.gen_range(0..COMMENT_TEMPLATES.len())];
        if !template.contains('{') {
            return template.to_string();
        }

        // Placeholder templates need concrete content
        match text {
            Some(text) => {
                let prompt = format!(
                    "Complete this project-management comment about the task \"{task_name}\": \
                     {template}. Return only the completed comment."
                );
                text.generate(&prompt, 0.8).trim().to_string()
            }
            None => text::fallback_text(template),
        }
    }

    fn pick_author(
        &self,
        assignee_id: Option<Uuid>,
        users: &[GeneratedUser],
        rng: &mut impl Rng,
    ) -> Uuid {
        if let Some(assignee) = assignee_id {
            if rng.r#gen::<f64>() < self.config.assignee_bias {
                return assignee;
            }
        }
        users[rng.gen_range(0..users.len())].id
    }
}

impl Default for CommentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn thread_length_index(rng: &mut impl Rng) -> usize {
    let roll: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    for (i, weight) in THREAD_LENGTH_WEIGHTS.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return i;
        }
    }
    THREAD_LENGTH_WEIGHTS.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::project::ProjectGenerator;
    use crate::generators::task::TaskGenerator;
    use crate::generators::team::TeamGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_world(
        seed: u64,
        cfg: &SimConfig,
    ) -> (Vec<GeneratedTask>, Vec<GeneratedUser>, IdSource, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = IdSource::from_seed(seed);
        let org_id = Uuid::nil();
        let teams = TeamGenerator::new().generate(org_id, cfg, &mut ids, &mut rng);
        let (users, _) = crate::generators::user::UserGenerator::new().generate(
            org_id,
            "example.com",
            &teams,
            cfg,
            &mut ids,
            &mut rng,
        );
        let (projects, sections) =
            ProjectGenerator::new().generate(&teams, &users, None, cfg, &mut ids, &mut rng);
        let tasks = TaskGenerator::new().generate(
            &projects, &sections, &users, None, cfg, &mut ids, &mut rng,
        );
        (tasks, users, ids, rng)
    }

    fn small_config() -> SimConfig {
        SimConfig {
            target_employee_count: 120,
            team_count: 8,
            tasks_per_project: (3, 8),
            ..Default::default()
        }
    }

    #[test]
    fn test_back_patched_counts_match() {
        let cfg = small_config();
        let (mut tasks, users, mut ids, mut rng) = build_world(51, &cfg);
        let comments =
            CommentGenerator::new().generate(&mut tasks, &users, None, &cfg, &mut ids, &mut rng);

        let patched_total: i64 = tasks.iter().map(|t| t.num_comments).sum();
        assert_eq!(patched_total, comments.len() as i64);

        for task in &tasks {
            let count = comments.iter().filter(|c| c.task_id == task.id).count();
            assert_eq!(count as i64, task.num_comments);
        }
    }

    #[test]
    fn test_comment_dates_within_window() {
        let cfg = small_config();
        let (mut tasks, users, mut ids, mut rng) = build_world(52, &cfg);
        let comments =
            CommentGenerator::new().generate(&mut tasks, &users, None, &cfg, &mut ids, &mut rng);
        assert!(!comments.is_empty());

        for comment in &comments {
            let task = tasks.iter().find(|t| t.id == comment.task_id).unwrap();
            assert!(comment.created_at >= task.created_at);
            assert!(comment.created_at <= cfg.today);
            assert!(!comment.text.is_empty());
        }
    }

    #[test]
    fn test_skip_rate_near_configured() {
        let cfg = SimConfig {
            target_employee_count: 200,
            team_count: 10,
            tasks_per_project: (10, 20),
            ..Default::default()
        };
        let (mut tasks, users, mut ids, mut rng) = build_world(53, &cfg);
        CommentGenerator::new().generate(&mut tasks, &users, None, &cfg, &mut ids, &mut rng);

        let silent = tasks.iter().filter(|t| t.num_comments == 0).count();
        let rate = silent as f64 / tasks.len() as f64;
        assert!((rate - 0.6).abs() < 0.05, "silent-task rate {rate}");
    }

    #[test]
    fn test_full_assignee_bias() {
        let cfg = small_config();
        let (mut tasks, users, mut ids, mut rng) = build_world(54, &cfg);
        let generator = CommentGenerator::with_config(CommentGenConfig {
            skip_probability: 0.0,
            system_probability: 0.0,
            assignee_bias: 1.0,
        });
        let comments = generator.generate(&mut tasks, &users, None, &cfg, &mut ids, &mut rng);

        for comment in &comments {
            let task = tasks.iter().find(|t| t.id == comment.task_id).unwrap();
            if let Some(assignee) = task.assignee_id {
                assert_eq!(comment.user_id, assignee);
            }
        }
    }
}
