use clap::Parser;
use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};
use config::{Config, ConfigError, Environment, File};
use dynacrud::{Dispatcher, QueryResult, Record, SqliteConnection, parse_call};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// dynacrud CLI - run CRUD operations by name against a `SQLite` database
#[derive(Parser, Debug)]
#[command(name = "dynacrud")]
#[command(about = "Run getXByY / insertX / updateXByY / deleteXByY calls against SQLite", long_about = None)]
struct Args {
    /// Database file (":memory:" for a throwaway database)
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Raw SQL to run before any call (schema setup); repeatable
    #[arg(long = "sql")]
    sql: Vec<String>,

    /// Call to run, e.g. 'getUsersById(7)'; repeatable. Starts no REPL.
    #[arg(short = 'e', long = "exec")]
    exec: Vec<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Do not read or write the REPL history file
    #[arg(long)]
    no_history: bool,
}

#[derive(Debug, Deserialize)]
struct CliConfig {
    #[serde(default = "default_database")]
    database: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_history")]
    history: bool,
}

fn default_database() -> String { ":memory:".to_string() }
fn default_log_level() -> String { "warn".to_string() }
const fn default_history() -> bool { true }

impl CliConfig {
    /// Load configuration with priority: CLI args > ENV > config file > defaults
    fn load(args: &Args) -> Result<Self, ConfigError> {
        let config_file = ["/etc/dynacrud/dynacrud.toml", "./dynacrud.toml"]
            .into_iter()
            .map(Path::new)
            .find(|path| path.exists());
        Self::from_sources(args, config_file)
    }

    /// A source that is present but malformed is an error, never a silent
    /// fallback to the defaults
    fn from_sources(args: &Args, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
            eprintln!("Loaded config from: {}", path.display());
        }

        // DYNACRUD_DATABASE, DYNACRUD_LOG_LEVEL, DYNACRUD_HISTORY
        builder = builder.add_source(Environment::with_prefix("DYNACRUD"));

        let base_config: Self = builder.build()?.try_deserialize()?;

        Ok(Self {
            database: args.database.clone().unwrap_or(base_config.database),
            log_level: args.log_level.clone().unwrap_or(base_config.log_level),
            history: base_config.history && !args.no_history,
        })
    }
}

/// Unknown level names fall back to `warn`, with a notice on stderr
fn max_level(name: &str) -> tracing::Level {
    name.parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{name}', using 'warn'");
        tracing::Level::WARN
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = match CliConfig::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let conn = if config.database == ":memory:" {
        SqliteConnection::open_in_memory()?
    } else {
        SqliteConnection::open(&config.database)?
    };
    let mut dispatcher = Dispatcher::new(conn);

    for sql in &args.sql {
        dispatcher.connection().execute_batch(sql)?;
    }

    if !args.exec.is_empty() {
        let mut failed = false;
        for line in &args.exec {
            match run_line(&mut dispatcher, line) {
                Ok(output) => print!("{output}"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    failed = true;
                }
            }
        }
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl(&mut dispatcher, &config)
}

fn repl(dispatcher: &mut Dispatcher<SqliteConnection>, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;

    let history_file: Option<PathBuf> = if config.history {
        dirs::home_dir().map(|p| p.join(".dynacrud_history"))
    } else {
        None
    };

    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // Ignore error if file doesn't exist
    }

    println!("dynacrud - connected to {}", config.database);
    println!("Type \\? for help, \\q to quit.\n");

    loop {
        match rl.readline("dynacrud> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "\\q" || line == "\\quit" || line.eq_ignore_ascii_case("quit") {
                    break;
                }
                if line == "\\?" || line == "\\h" || line == "\\help" {
                    print_help();
                    continue;
                }

                let outcome = match line.strip_prefix("\\sql ") {
                    Some(sql) => dispatcher
                        .connection()
                        .execute_batch(sql)
                        .map(|()| "OK\n".to_string())
                        .map_err(|e| e.to_string()),
                    None => run_line(dispatcher, line).map_err(|e| e.to_string()),
                };
                match outcome {
                    Ok(output) => print!("{output}"),
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("quit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                return Err(err.into());
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
    Ok(())
}

fn print_help() {
    println!("Calls:");
    println!("  getUsersById(7)                       - SELECT by one field");
    println!("  insertUsers({{\"name\": \"Alice\"}})        - INSERT one row");
    println!("  updateUsersById(7, {{\"age\": 31}})       - UPDATE by one field");
    println!("  deleteUsersById(7)                    - DELETE by one field");
    println!("  lastInsertId()                        - last generated id");
    println!("Meta-commands:");
    println!("  \\sql <statements>  - Run raw SQL (schema setup)");
    println!("  \\?, \\h, \\help      - Show this help");
    println!("  \\q, \\quit          - Quit");
}

fn run_line(dispatcher: &mut Dispatcher<SqliteConnection>, line: &str) -> Result<String, dynacrud::CrudError> {
    let call = parse_call(line)?;
    let result = dispatcher.invoke(&call.operation, &call.args)?;
    Ok(format_result(&result))
}

fn format_result(result: &QueryResult) -> String {
    match result {
        QueryResult::NoRows => "(no rows)\n".to_string(),
        QueryResult::SingleRecord(record) => format_records(std::slice::from_ref(record)),
        QueryResult::RecordSet(records) => format_records(records),
        QueryResult::AffectedCount(n) => format!("{n} row(s) affected\n"),
        QueryResult::GeneratedId(id) => format!("last insert id: {id}\n"),
    }
}

fn format_records(records: &[Record]) -> String {
    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);

    if let Some(first) = records.first() {
        table.set_header(first.names().map(Cell::new));
    }
    for record in records {
        table.add_row(record.values().map(|v| Cell::new(v.to_string())));
    }

    let noun = if records.len() == 1 { "row" } else { "rows" };
    format!("{table}\n({} {noun})\n", records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher<SqliteConnection> {
        let conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
            .unwrap();
        Dispatcher::new(conn)
    }

    #[test]
    fn test_run_line_round_trip() {
        let mut d = dispatcher();
        assert_eq!(
            run_line(&mut d, r#"insertUsers({"name": "Alice", "age": 30})"#).unwrap(),
            "1 row(s) affected\n"
        );
        assert_eq!(run_line(&mut d, "lastInsertId()").unwrap(), "last insert id: 1\n");

        let out = run_line(&mut d, r#"getUsersByName("Alice")"#).unwrap();
        assert!(out.contains("Alice"));
        assert!(out.contains("age"));
        assert!(out.ends_with("(1 row)\n"));
    }

    #[test]
    fn test_format_no_rows() {
        let mut d = dispatcher();
        assert_eq!(run_line(&mut d, "getUsersById(99)").unwrap(), "(no rows)\n");
    }

    #[test]
    fn test_format_record_set() {
        let records = vec![Record::new().with("id", 1), Record::new().with("id", 2)];
        let out = format_result(&QueryResult::RecordSet(records));
        assert!(out.ends_with("(2 rows)\n"));
    }

    #[test]
    fn test_config_file_and_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dynacrud.toml");
        std::fs::write(&path, "database = \"app.db\"\nhistory = false\n").unwrap();

        let config = CliConfig::from_sources(&Args::parse_from(["dynacrud"]), Some(&path)).unwrap();
        assert_eq!(config.database, "app.db");
        assert!(!config.history);

        let args = Args::parse_from(["dynacrud", "--database", "other.db"]);
        let config = CliConfig::from_sources(&args, Some(&path)).unwrap();
        assert_eq!(config.database, "other.db");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dynacrud.toml");
        std::fs::write(&path, "database = \"app.db\"\nhistory = \"maybe\"\n").unwrap();

        assert!(CliConfig::from_sources(&Args::parse_from(["dynacrud"]), Some(&path)).is_err());
    }

    #[test]
    fn test_max_level() {
        assert_eq!(max_level("debug"), tracing::Level::DEBUG);
        assert_eq!(max_level("TRACE"), tracing::Level::TRACE);
        assert_eq!(max_level("chatty"), tracing::Level::WARN);
    }

    #[test]
    fn test_run_line_surfaces_errors() {
        let mut d = dispatcher();
        assert!(run_line(&mut d, "fooBar(1)").is_err());
        assert!(run_line(&mut d, "getWidgetsById(1)").is_err());
    }
}
