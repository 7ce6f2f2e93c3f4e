use serde::{Deserialize, Serialize};

use crate::render::PageConfig;

/// Company name printed at the top of every document.
pub const DEFAULT_COMPANY_NAME: &str = "NISSI OFFICE SYSTEMS";

/// Caller-tunable rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub company_name: String,
    pub page: PageConfig,
}

impl RenderOptions {
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            page: PageConfig::a4(),
        }
    }
}
