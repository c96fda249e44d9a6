//! Seed data generation for a project-management workspace.
//!
//! Generates a statistically plausible company: one organization, teams
//! split across departments, users with team memberships, projects with
//! sections, tasks with assignment and completion modeling, and comment
//! threads. Everything derives from a single RNG seed, so the same config
//! and seed always produce the same dataset.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use worksim::prelude::*;
//!
//! let config = SimConfig::default();
//! let mut rng = StdRng::seed_from_u64(12345);
//! let dataset = generate_dataset(&config, None, &mut rng)?;
//!
//! let seeder = Seeder::new(pool);
//! seeder.initialize_schema().await?;
//! seeder.seed_all(&dataset).await?;
//! ```

pub mod config;
pub mod dates;
pub mod db;
pub mod department;
pub mod generators;
pub mod ids;
pub mod pipeline;
pub mod text;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, SimConfig};
    pub use crate::db::{SeedError, Seeder};
    pub use crate::department::{Department, DepartmentMix};
    pub use crate::generators::{
        CommentGenerator, OrganizationGenerator, ProjectGenerator, TaskGenerator, TeamGenerator,
        UserGenerator,
    };
    pub use crate::ids::IdSource;
    pub use crate::pipeline::{Dataset, generate_dataset};
    pub use crate::text::{FallbackText, OpenAiText, TextProvider};
}
