use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ReconError;

/// Number of preamble lines above the header row in the published export.
pub const DEFAULT_SKIP_ROWS: usize = 4;

// ---------------------------------------------------------------------------
// Canonical fields
// ---------------------------------------------------------------------------

/// Canonical column a spreadsheet header can be aliased to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ExternalId,
    Role,
    Salary,
    /// Captured from the sheet but not projected into `ExternalRecord`.
    TaxId,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::ExternalId, Field::Role, Field::Salary, Field::TaxId];
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExternalId => write!(f, "external_id"),
            Self::Role => write!(f, "role"),
            Self::Salary => write!(f, "salary"),
            Self::TaxId => write!(f, "tax_id"),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Shape of the published spreadsheet: preamble size, header aliases and
/// the columns whose merged cells get forward-filled.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetLayout {
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, Field>,
    #[serde(default = "default_fill_columns")]
    pub fill_columns: Vec<Field>,
}

fn default_skip_rows() -> usize {
    DEFAULT_SKIP_ROWS
}

fn default_aliases() -> BTreeMap<String, Field> {
    BTreeMap::from([
        ("Código".to_string(), Field::ExternalId),
        ("Cargo".to_string(), Field::Role),
        ("Salário".to_string(), Field::Salary),
        ("Nº do C.P.F.".to_string(), Field::TaxId),
    ])
}

fn default_fill_columns() -> Vec<Field> {
    vec![Field::ExternalId, Field::Role, Field::Salary]
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            skip_rows: default_skip_rows(),
            aliases: default_aliases(),
            fill_columns: default_fill_columns(),
        }
    }
}

impl SheetLayout {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let layout: SheetLayout =
            toml::from_str(input).map_err(|e| ReconError::LayoutParse(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        // The join key has to come from somewhere
        if !self.aliases.values().any(|f| *f == Field::ExternalId) {
            return Err(ReconError::LayoutValidation(
                "no header is aliased to external_id".into(),
            ));
        }

        // One header per canonical field
        for field in Field::ALL {
            let headers: Vec<&str> = self
                .aliases
                .iter()
                .filter(|(_, f)| **f == field)
                .map(|(h, _)| h.as_str())
                .collect();
            if headers.len() > 1 {
                return Err(ReconError::LayoutValidation(format!(
                    "field '{field}' is aliased by more than one header: {}",
                    headers.join(", ")
                )));
            }
        }

        for (i, field) in self.fill_columns.iter().enumerate() {
            if self.fill_columns[..i].contains(field) {
                return Err(ReconError::LayoutValidation(format!(
                    "fill column '{field}' listed twice"
                )));
            }
        }

        for header in self.aliases.keys() {
            if header.trim().is_empty() {
                return Err(ReconError::LayoutValidation("empty header alias".into()));
            }
        }

        Ok(())
    }

    /// Canonical field for a raw header label, if the label is known.
    pub fn field_for(&self, header: &str) -> Option<Field> {
        self.aliases.get(header.trim()).copied()
    }

    /// Aliased headers that do not appear in `headers`.
    pub fn missing_headers(&self, headers: &[String]) -> Vec<String> {
        self.aliases
            .keys()
            .filter(|alias| !headers.iter().any(|h| h.trim() == alias.as_str()))
            .cloned()
            .collect()
    }
}
