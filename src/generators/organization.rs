//! Organization generation.

use rand::Rng;
use time::Date;
use uuid::Uuid;

use crate::ids::IdSource;

/// B2B SaaS company name fragments.
const COMPANY_PREFIXES: &[&str] = &[
    "Stream", "Data", "Cloud", "Sync", "Flow", "Pulse", "Wave", "Grid", "Stack", "Link", "Nexus",
    "Prism", "Quantum", "Vertex", "Zenith",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Flow", "Core", "Base", "Sync", "Works", "Labs", "Tech", "Systems", "Solutions", "Platform",
    "Hub", "Space", "Forge", "Dynamics",
];

/// Generated organization record ready for database insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOrganization {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub org_type: String,
    pub created_at: Date,
}

/// Generates the single organization a run hangs off.
pub struct OrganizationGenerator;

impl OrganizationGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        founding: Date,
        ids: &mut IdSource,
        rng: &mut impl Rng,
    ) -> GeneratedOrganization {
        let prefix = COMPANY_PREFIXES[rng.gen_range(0..COMPANY_PREFIXES.len())];
        let suffix = COMPANY_SUFFIXES[rng.gen_range(0..COMPANY_SUFFIXES.len())];
        let name = format!("{prefix}{suffix}");
        let domain = format!("{}.com", name.to_lowercase());

        GeneratedOrganization {
            id: ids.next_id(),
            name,
            domain,
            org_type: "organization".to_string(),
            created_at: founding,
        }
    }
}

impl Default for OrganizationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    #[test]
    fn test_generate_organization() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ids = IdSource::from_seed(1);
        let founding = date!(2019 - 01 - 15);

        let org = OrganizationGenerator::new().generate(founding, &mut ids, &mut rng);

        assert!(!org.name.is_empty());
        assert_eq!(org.domain, format!("{}.com", org.name.to_lowercase()));
        assert_eq!(org.created_at, founding);
        assert_eq!(org.org_type, "organization");
    }
}
