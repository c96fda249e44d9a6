//! Fixed department taxonomy and staffing mix.

use serde::{Deserialize, Serialize};

/// The four departments every generated entity hangs off.
///
/// Department drives staffing, project type policy, section templates, and
/// team founding windows. Keeping this a closed enum means there is no
/// "unknown department" path anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    SalesMarketing,
    Operations,
    ProductDesign,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Engineering,
        Department::SalesMarketing,
        Department::Operations,
        Department::ProductDesign,
    ];

    /// Returns the human-facing department name, also used as the database
    /// string representation.
    pub fn label(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::SalesMarketing => "Sales & Marketing",
            Department::Operations => "Operations",
            Department::ProductDesign => "Product & Design",
        }
    }
}

/// Fraction of the organization attributed to each department.
///
/// Fractions must sum to 1.0; [`crate::config::SimConfig::validate`] checks
/// this before generation starts. A zero fraction removes the department
/// from the run entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentMix {
    pub engineering: f64,
    pub sales_marketing: f64,
    pub operations: f64,
    pub product_design: f64,
}

impl Default for DepartmentMix {
    fn default() -> Self {
        Self {
            engineering: 0.42,
            sales_marketing: 0.28,
            operations: 0.18,
            product_design: 0.12,
        }
    }
}

impl DepartmentMix {
    pub fn fraction(&self, department: Department) -> f64 {
        match department {
            Department::Engineering => self.engineering,
            Department::SalesMarketing => self.sales_marketing,
            Department::Operations => self.operations,
            Department::ProductDesign => self.product_design,
        }
    }

    pub fn total(&self) -> f64 {
        self.engineering + self.sales_marketing + self.operations + self.product_design
    }

    /// Number of departments that will actually receive teams and users.
    pub fn active_departments(&self) -> usize {
        Department::ALL
            .iter()
            .filter(|&&d| self.fraction(d) > 0.0)
            .count()
    }

    /// Department with the largest fraction; rounding drift from integer
    /// partitioning lands here.
    pub fn largest(&self) -> Department {
        let mut best = Department::Engineering;
        for &department in &Department::ALL {
            if self.fraction(department) > self.fraction(best) {
                best = department;
            }
        }
        best
    }
}
