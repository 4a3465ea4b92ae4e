use serde::Serialize;

/// Company overview for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    /// Long name, else short name, else the symbol as given.
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    /// Full-time employees.
    pub employees: Option<u64>,
    /// Long business summary.
    pub summary: Option<String>,
}

impl CompanyProfile {
    /// A profile with only the name known.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sector: None,
            industry: None,
            website: None,
            employees: None,
            summary: None,
        }
    }
}
