// Employee table reader using SQLite

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use colab_recon::{AuthoritativeRecord, AuthoritativeSource, ReconError, SourceKind};

// Names containing these fragments are placeholder or shared accounts
const EMPLOYEE_QUERY: &str = r#"
SELECT codigo, nome, cpfcnpj, sexo
FROM pessoas
WHERE funcionario = 1
  AND status = 'S'
  AND upper(nome) NOT LIKE '%PRE VENDA%'
  AND upper(nome) NOT LIKE '%DIARISTA%'
  AND upper(nome) NOT LIKE '%CAIXA%'
  AND upper(nome) NOT LIKE '%TESTE%'
ORDER BY codigo
"#;

/// Active employees read from the `pessoas` table of a SQLite file.
///
/// The file is opened read-only on every fetch; nothing is cached.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<Connection, ReconError> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unavailable(&self.path, e))
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> ReconError {
    ReconError::unavailable(SourceKind::Authoritative, format!("{}: {err}", path.display()))
}

impl AuthoritativeSource for SqliteSource {
    fn fetch_employees(&self) -> Result<Vec<AuthoritativeRecord>, ReconError> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(EMPLOYEE_QUERY)
            .map_err(|e| unavailable(&self.path, e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AuthoritativeRecord {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    tax_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    gender: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })
            .map_err(|e| unavailable(&self.path, e))?;

        let employees = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| unavailable(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            count = employees.len(),
            "loaded employees"
        );
        Ok(employees)
    }
}
