// Integration tests for the `colab` binary.
// Run with: cargo test -p colab-cli --test cli_integration

use std::path::PathBuf;
use std::process::{Command, Output};

use rusqlite::{params, Connection};
use tempfile::TempDir;

const SHEET: &str = "\
QUADRO DE COLABORADORES
Empresa Exemplo LTDA
,,,
Atualizado em 01/03/2026
Código,Nome,Cargo,Salário
101,ANA PAULA SOUZA,Operadora de Caixa,\"1.612,00\"
102,BRUNO LIMA,,
103,CARLA DIAS,Gerente de Loja,\"3.450,50\"
104,DANIEL ROCHA,,
xyz,LINHA RUIM,Estoquista,\"1.500,00\"
";

const PREAMBLE_ONLY: &str = "QUADRO\nEmpresa\n\nAtualizado em\n";

struct Env {
    dir: TempDir,
    db: PathBuf,
    sheet: PathBuf,
}

impl Env {
    fn new() -> Self {
        Self::with(&[
            (101, "ANA PAULA SOUZA", "11111111111", "F"),
            (103, "CARLA DIAS", "33333333333", "F"),
            (200, "HELENA NUNES", "20020020020", "F"),
        ], SHEET)
    }

    fn with(employees: &[(i64, &str, &str, &str)], sheet: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("pessoas.db");
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE pessoas (
                codigo INTEGER PRIMARY KEY,
                nome TEXT,
                cpfcnpj TEXT,
                sexo TEXT,
                funcionario INTEGER NOT NULL,
                status TEXT NOT NULL
            );",
        )
        .unwrap();
        for (codigo, nome, cpf, sexo) in employees {
            conn.execute(
                "INSERT INTO pessoas VALUES (?1, ?2, ?3, ?4, 1, 'S')",
                params![codigo, nome, cpf, sexo],
            )
            .unwrap();
        }
        // Never returned: not an active employee
        conn.execute(
            "INSERT INTO pessoas VALUES (900, 'CAIXA LOJA 1', NULL, NULL, 1, 'S')",
            [],
        )
        .unwrap();

        let sheet_path = dir.path().join("quadro.csv");
        std::fs::write(&sheet_path, sheet).unwrap();
        Self { dir, db, sheet: sheet_path }
    }

    /// The binary pointed at this environment's database.
    fn colab(&self) -> Command {
        let mut cmd = self.colab_without_db();
        cmd.arg("--db").arg(&self.db);
        cmd
    }

    fn colab_without_db(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_colab"));
        cmd.current_dir(self.dir.path());
        // Keep the developer's settings and environment out of the run
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"));
        cmd.env("HOME", self.dir.path());
        for var in ["COLAB_DB_PATH", "COLAB_SHEET_URL", "COLAB_SHEET_TIMEOUT_SECS", "COLAB_LAYOUT", "RUST_LOG"] {
            cmd.env_remove(var);
        }
        cmd
    }

    fn sheet_arg(&self) -> String {
        self.sheet.to_string_lossy().to_string()
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e})\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        )
    })
}

fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit {code}, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// combined
// ============================================================================

#[test]
fn combined_prints_joined_records() {
    let env = Env::new();
    let output = env
        .colab()
        .args(["combined", "--json", "--url", &env.sheet_arg()])
        .output()
        .unwrap();
    assert_exit(&output, 0);

    let json = stdout_json(&output);
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["codigo"], 101);
    assert_eq!(records[0]["nome"], "ANA PAULA SOUZA");
    assert_eq!(records[0]["cargo_contabil"], "Operadora de Caixa");
    assert_eq!(records[0]["salario"], 1612.0);
    assert_eq!(records[0]["admissao"], serde_json::Value::Null);

    assert_eq!(records[1]["codigo"], 103);
    assert_eq!(records[1]["salario"], 3450.5);

    // In the database only
    assert_eq!(records[2]["codigo"], 200);
    assert_eq!(records[2]["cargo_contabil"], serde_json::Value::Null);
    assert_eq!(records[2]["salario"], serde_json::Value::Null);

    let err = stderr(&output);
    assert!(err.contains("3 employees, 2 matched, 1 unmatched"), "stderr: {err}");
    assert!(err.contains("1 rows skipped"), "stderr: {err}");
}

#[test]
fn combined_without_json_keeps_stdout_empty() {
    let env = Env::new();
    let output = env.colab().args(["combined", "--url", &env.sheet_arg()]).output().unwrap();
    assert_exit(&output, 0);
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("combined:"));
}

#[test]
fn combined_writes_output_file() {
    let env = Env::new();
    let out = env.dir.path().join("combined.json");
    let output = env
        .colab()
        .args(["combined", "--quiet", "--url", &env.sheet_arg(), "--output"])
        .arg(&out)
        .output()
        .unwrap();
    assert_exit(&output, 0);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 3);
    assert!(!stderr(&output).contains("combined:"));
}

#[test]
fn combined_with_empty_sheet_exits_52() {
    let env = Env::with(&[(101, "ANA", "1", "F")], PREAMBLE_ONLY);
    let output = env.colab().args(["combined", "--url", &env.sheet_arg()]).output().unwrap();
    assert_exit(&output, 52);
    assert!(stderr(&output).contains("spreadsheet returned no usable records"));
}

#[test]
fn combined_with_empty_database_exits_52() {
    let env = Env::with(&[], SHEET);
    let output = env.colab().args(["combined", "--url", &env.sheet_arg()]).output().unwrap();
    assert_exit(&output, 52);
    assert!(stderr(&output).contains("database returned no usable records"));
}

#[test]
fn missing_database_exits_50() {
    let env = Env::new();
    let output = env
        .colab_without_db()
        .args(["combined", "--url", &env.sheet_arg(), "--db", "absent.db"])
        .output()
        .unwrap();
    assert_exit(&output, 50);
    let err = stderr(&output);
    assert!(err.contains("error: database unavailable"), "stderr: {err}");
    assert!(err.contains("hint:"), "stderr: {err}");
}

#[test]
fn missing_sheet_exits_51() {
    let env = Env::new();
    let output = env.colab().args(["combined", "--url", "absent.csv"]).output().unwrap();
    assert_exit(&output, 51);
    assert!(stderr(&output).contains("spreadsheet unavailable"));
}

#[test]
fn no_sheet_location_exits_2() {
    let env = Env::new();
    let output = env.colab().args(["combined"]).output().unwrap();
    assert_exit(&output, 2);
    assert!(stderr(&output).contains("COLAB_SHEET_URL"));
}

#[test]
fn sheet_location_from_environment() {
    let env = Env::new();
    let output = env
        .colab()
        .env("COLAB_SHEET_URL", env.sheet_arg())
        .args(["combined", "--json"])
        .output()
        .unwrap();
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 3);
}

#[test]
fn sheet_location_from_settings_file() {
    let env = Env::new();
    let settings = env.dir.path().join("colab.toml");
    std::fs::write(
        &settings,
        format!("[sheet]\nurl = {:?}\ntimeout_secs = 5\n", env.sheet_arg()),
    )
    .unwrap();

    let output = env
        .colab()
        .arg("--config")
        .arg(&settings)
        .args(["combined", "--json"])
        .output()
        .unwrap();
    assert_exit(&output, 0);
}

#[test]
fn broken_settings_file_exits_2() {
    let env = Env::new();
    let settings = env.dir.path().join("colab.toml");
    std::fs::write(&settings, "[sheet\nurl = ").unwrap();

    let output = env
        .colab()
        .arg("--config")
        .arg(&settings)
        .args(["db"])
        .output()
        .unwrap();
    assert_exit(&output, 2);
    assert!(stderr(&output).contains("invalid settings"));
}

#[test]
fn invalid_layout_exits_54() {
    let env = Env::new();
    let layout = env.dir.path().join("layout.toml");
    std::fs::write(&layout, "skip_rows = 4\n[aliases]\n\"Cargo\" = \"role\"\n").unwrap();

    let output = env
        .colab()
        .arg("--layout")
        .arg(&layout)
        .args(["sheet", "--url", &env.sheet_arg()])
        .output()
        .unwrap();
    assert_exit(&output, 54);
}

#[test]
fn combined_over_http() {
    use httpmock::prelude::*;

    let env = Env::new();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/pub").query_param("output", "csv");
        then.status(200).header("content-type", "text/csv").body(SHEET);
    });

    let output = env
        .colab()
        .args(["combined", "--json", "--url", &server.url("/pub?output=csv")])
        .output()
        .unwrap();
    mock.assert();
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)[0]["cargo_contabil"], "Operadora de Caixa");
}

#[test]
fn http_error_exits_51() {
    use httpmock::prelude::*;

    let env = Env::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pub");
        then.status(500);
    });

    let output = env
        .colab()
        .args(["combined", "--url", &server.url("/pub")])
        .output()
        .unwrap();
    assert_exit(&output, 51);
    assert!(stderr(&output).contains("HTTP 500"));
}

// ============================================================================
// db / sheet
// ============================================================================

#[test]
fn db_lists_active_employees() {
    let env = Env::new();
    let output = env.colab().args(["db", "--json"]).output().unwrap();
    assert_exit(&output, 0);

    let json = stdout_json(&output);
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["codigo"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![101, 103, 200]);
    assert_eq!(json[0]["cpf"], "11111111111");
    assert_eq!(json[0]["genero"], "F");
}

#[test]
fn db_empty_is_not_an_error() {
    let env = Env::with(&[], SHEET);
    let output = env.colab().args(["db", "--json"]).output().unwrap();
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn sheet_prints_cleaned_records() {
    let env = Env::new();
    let output = env
        .colab()
        .args(["sheet", "--json", "--url", &env.sheet_arg()])
        .output()
        .unwrap();
    assert_exit(&output, 0);

    let json = stdout_json(&output);
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 4);

    // 102 and 104 inherit role and salary from the row above
    assert_eq!(records[1]["matricula"], "102");
    assert_eq!(records[1]["cargo_contabil"], "Operadora de Caixa");
    assert_eq!(records[1]["salario"], 1612.0);
    assert_eq!(records[3]["matricula"], "104");
    assert_eq!(records[3]["cargo_contabil"], "Gerente de Loja");

    assert!(stderr(&output).contains("4 records from 5 rows, 1 skipped"));
}

#[test]
fn sheet_with_only_preamble_is_empty() {
    let env = Env::with(&[], PREAMBLE_ONLY);
    let output = env
        .colab()
        .args(["sheet", "--json", "--url", &env.sheet_arg()])
        .output()
        .unwrap();
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_colab")).arg("--version").output().unwrap();
    assert_exit(&output, 0);
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
