//! Database seeding utilities.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::generators::{
    GeneratedComment, GeneratedOrganization, GeneratedProject, GeneratedSection, GeneratedTask,
    GeneratedTeam, GeneratedTeamMembership, GeneratedUser,
};
use crate::pipeline::Dataset;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const SCHEMA: &str = r#"
CREATE TABLE organizations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    domain TEXT NOT NULL,
    org_type TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE teams (
    id TEXT PRIMARY KEY,
    org_id TEXT NOT NULL REFERENCES organizations(id),
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    department TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE users (
    id TEXT PRIMARY KEY,
    org_id TEXT NOT NULL REFERENCES organizations(id),
    email TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    department TEXT NOT NULL,
    profile_photo_url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    last_active TEXT NOT NULL,
    is_active INTEGER NOT NULL
);

CREATE TABLE team_memberships (
    id TEXT PRIMARY KEY,
    team_id TEXT NOT NULL REFERENCES teams(id),
    user_id TEXT NOT NULL REFERENCES users(id),
    role TEXT NOT NULL,
    joined_at TEXT NOT NULL
);

CREATE TABLE projects (
    id TEXT PRIMARY KEY,
    team_id TEXT NOT NULL REFERENCES teams(id),
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    project_type TEXT NOT NULL,
    status TEXT NOT NULL,
    owner_id TEXT REFERENCES users(id),
    start_date TEXT,
    due_date TEXT,
    created_at TEXT NOT NULL,
    color TEXT NOT NULL,
    privacy TEXT NOT NULL
);

CREATE TABLE sections (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id),
    name TEXT NOT NULL,
    position INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE tasks (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id),
    section_id TEXT NOT NULL REFERENCES sections(id),
    parent_task_id TEXT REFERENCES tasks(id),
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    assignee_id TEXT REFERENCES users(id),
    due_date TEXT,
    created_at TEXT NOT NULL,
    created_by TEXT NOT NULL REFERENCES users(id),
    completed INTEGER NOT NULL,
    completed_at TEXT,
    completed_by TEXT REFERENCES users(id),
    priority TEXT NOT NULL,
    num_likes INTEGER NOT NULL,
    num_subtasks INTEGER NOT NULL,
    num_comments INTEGER NOT NULL
);

CREATE TABLE comments (
    id TEXT PRIMARY KEY,
    task_id TEXT NOT NULL REFERENCES tasks(id),
    user_id TEXT NOT NULL REFERENCES users(id),
    text TEXT NOT NULL,
    comment_type TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX idx_tasks_project ON tasks(project_id);
CREATE INDEX idx_tasks_assignee ON tasks(assignee_id);
CREATE INDEX idx_comments_task ON comments(task_id);
CREATE INDEX idx_memberships_team ON team_memberships(team_id);
"#;

/// Database seeder for inserting generated data.
pub struct Seeder {
    pool: SqlitePool,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            batch_size: 50,
        }
    }

    /// Sets the batch size for bulk operations.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Drops any existing tables and recreates the schema.
    pub async fn initialize_schema(&self) -> Result<(), SeedError> {
        info!("Initializing schema");

        // Reverse dependency order so foreign keys never dangle
        for table in [
            "comments",
            "tasks",
            "sections",
            "projects",
            "team_memberships",
            "users",
            "teams",
            "organizations",
        ] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(&self.pool)
                .await?;
        }

        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Seeds a complete dataset in dependency order.
    pub async fn seed_all(&self, dataset: &Dataset) -> Result<(), SeedError> {
        self.seed_organization(&dataset.organization).await?;
        self.seed_teams(&dataset.teams).await?;
        self.seed_users(&dataset.users).await?;
        self.seed_memberships(&dataset.memberships).await?;
        self.seed_projects(&dataset.projects).await?;
        self.seed_sections(&dataset.sections).await?;
        self.seed_tasks(&dataset.tasks).await?;
        self.seed_comments(&dataset.comments).await?;
        Ok(())
    }

    pub async fn seed_organization(
        &self,
        org: &GeneratedOrganization,
    ) -> Result<(), SeedError> {
        info!("Seeding organization {}", org.name);

        sqlx::query(
            r#"
            INSERT INTO organizations (id, name, domain, org_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(org.id.to_string())
        .bind(&org.name)
        .bind(&org.domain)
        .bind(&org.org_type)
        .bind(org.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn seed_teams(&self, teams: &[GeneratedTeam]) -> Result<(), SeedError> {
        info!("Seeding {} teams...", teams.len());

        for chunk in teams.chunks(self.batch_size) {
            for team in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO teams (id, org_id, name, description, department, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(team.id.to_string())
                .bind(team.org_id.to_string())
                .bind(&team.name)
                .bind(&team.description)
                .bind(team.department.label())
                .bind(team.created_at)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} teams", teams.len());
        Ok(())
    }

    pub async fn seed_users(&self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        info!("Seeding {} users...", users.len());

        for chunk in users.chunks(self.batch_size) {
            for user in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO users (id, org_id, email, first_name, last_name, job_title,
                                       department, profile_photo_url, created_at, last_active,
                                       is_active)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(user.id.to_string())
                .bind(user.org_id.to_string())
                .bind(&user.email)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.job_title)
                .bind(user.department.label())
                .bind(&user.profile_photo_url)
                .bind(user.created_at)
                .bind(user.last_active)
                .bind(user.is_active)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} users", users.len());
        Ok(())
    }

    pub async fn seed_memberships(
        &self,
        memberships: &[GeneratedTeamMembership],
    ) -> Result<(), SeedError> {
        info!("Seeding {} team memberships...", memberships.len());

        for chunk in memberships.chunks(self.batch_size) {
            for membership in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO team_memberships (id, team_id, user_id, role, joined_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(membership.id.to_string())
                .bind(membership.team_id.to_string())
                .bind(membership.user_id.to_string())
                .bind(membership.role.as_str())
                .bind(membership.joined_at)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} team memberships", memberships.len());
        Ok(())
    }

    pub async fn seed_projects(&self, projects: &[GeneratedProject]) -> Result<(), SeedError> {
        info!("Seeding {} projects...", projects.len());

        for chunk in projects.chunks(self.batch_size) {
            for project in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO projects (id, team_id, name, description, project_type, status,
                                          owner_id, start_date, due_date, created_at, color,
                                          privacy)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                    "#,
                )
                .bind(project.id.to_string())
                .bind(project.team_id.to_string())
                .bind(&project.name)
                .bind(&project.description)
                .bind(project.project_type.as_str())
                .bind(project.status.as_str())
                .bind(project.owner_id.map(|id| id.to_string()))
                .bind(project.start_date)
                .bind(project.due_date)
                .bind(project.created_at)
                .bind(&project.color)
                .bind(&project.privacy)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} projects", projects.len());
        Ok(())
    }

    pub async fn seed_sections(&self, sections: &[GeneratedSection]) -> Result<(), SeedError> {
        info!("Seeding {} sections...", sections.len());

        for chunk in sections.chunks(self.batch_size) {
            for section in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO sections (id, project_id, name, position, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(section.id.to_string())
                .bind(section.project_id.to_string())
                .bind(&section.name)
                .bind(section.position)
                .bind(section.created_at)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} sections", sections.len());
        Ok(())
    }

    pub async fn seed_tasks(&self, tasks: &[GeneratedTask]) -> Result<(), SeedError> {
        info!("Seeding {} tasks...", tasks.len());

        for (i, chunk) in tasks.chunks(self.batch_size).enumerate() {
            for task in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO tasks (id, project_id, section_id, parent_task_id, name,
                                       description, assignee_id, due_date, created_at, created_by,
                                       completed, completed_at, completed_by, priority, num_likes,
                                       num_subtasks, num_comments)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                            $16, $17)
                    "#,
                )
                .bind(task.id.to_string())
                .bind(task.project_id.to_string())
                .bind(task.section_id.to_string())
                .bind(task.parent_task_id.map(|id| id.to_string()))
                .bind(&task.name)
                .bind(&task.description)
                .bind(task.assignee_id.map(|id| id.to_string()))
                .bind(task.due_date)
                .bind(task.created_at)
                .bind(task.created_by.to_string())
                .bind(task.completed)
                .bind(task.completed_at)
                .bind(task.completed_by.map(|id| id.to_string()))
                .bind(task.priority.as_str())
                .bind(task.num_likes)
                .bind(task.num_subtasks)
                .bind(task.num_comments)
                .execute(&self.pool)
                .await?;
            }

            let seeded = i * self.batch_size + chunk.len();
            if seeded % (self.batch_size * 20) == 0 {
                info!("  Seeded {}/{} tasks", seeded, tasks.len());
            }
        }

        info!("Seeded {} tasks", tasks.len());
        Ok(())
    }

    pub async fn seed_comments(&self, comments: &[GeneratedComment]) -> Result<(), SeedError> {
        info!("Seeding {} comments...", comments.len());

        for chunk in comments.chunks(self.batch_size) {
            for comment in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO comments (id, task_id, user_id, text, comment_type, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(comment.id.to_string())
                .bind(comment.task_id.to_string())
                .bind(comment.user_id.to_string())
                .bind(&comment.text)
                .bind(comment.comment_type.as_str())
                .bind(comment.created_at)
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} comments", comments.len());
        Ok(())
    }
}
