//! The `sqldoc` command line tool: translate SQL statements into document-database plans.
//!
//! The binary is a thin wrapper around [`run`], so that the commands can be exercised in tests.

mod explain;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;

use query_engine_plan::plan::ast::Plan;
use query_engine_translation::translation;
use sqldoc_configuration::{Configuration, MassMutations};

pub use explain::explain;

/// The various contextual bits and bobs we need to run.
pub struct Context<Input: Read, Output: Write> {
    /// The directory holding the configuration.
    pub context_path: PathBuf,
    /// Where SQL is read from when it is not given as an argument.
    pub input: Input,
    /// Where results are printed.
    pub output: Output,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Translate one SQL statement and print the plan.
    Translate {
        /// The statement. Read from standard input when omitted.
        sql: Option<String>,
    },
    /// Translate a JSON array of SQL statements, reporting each outcome in order.
    Batch {
        /// A file holding the array. Read from standard input when omitted.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Check whether a SQL statement can be translated.
    Validate { sql: Option<String> },
    /// Translate a SQL statement and describe the translation.
    Explain { sql: Option<String> },
    /// Write the default configuration and its JSON schema into the configuration directory.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
}

/// Run a command in a given directory.
pub fn run<Input: Read, Output: Write>(
    command: Command,
    mut context: Context<Input, Output>,
) -> anyhow::Result<()> {
    let load_configuration = || -> anyhow::Result<Configuration> {
        let parsed = sqldoc_configuration::parse_configuration(&context.context_path)?;
        Ok(sqldoc_configuration::make_runtime_configuration(parsed))
    };

    match command {
        Command::Initialize { force } => initialize(&context.context_path, force)?,
        Command::Translate { sql } => {
            let configuration = load_configuration()?;
            let sql = read_sql(sql, &mut context.input)?;
            let plan = translate(&sql, &configuration)?;
            write_json(&mut context.output, &plan.to_json(), &configuration)?;
        }
        Command::Batch { file } => {
            let configuration = load_configuration()?;
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("unable to read {}", path.display()))?,
                None => read_to_string(&mut context.input)?,
            };
            let queries: Vec<String> = serde_json::from_str(&text)
                .context("the batch must be a JSON array of SQL strings")?;
            let results = batch(&queries, &configuration);
            write_json(
                &mut context.output,
                &serde_json::Value::Array(results),
                &configuration,
            )?;
        }
        Command::Validate { sql } => {
            let configuration = load_configuration()?;
            let sql = read_sql(sql, &mut context.input)?;
            write_json(
                &mut context.output,
                &validate(&sql, &configuration),
                &configuration,
            )?;
        }
        Command::Explain { sql } => {
            let configuration = load_configuration()?;
            let sql = read_sql(sql, &mut context.input)?;
            let statement = query_engine_sql::parse(&sql)
                .map_err(translation::Error::from)
                .map_err(|err| log_translation_error(&sql, err))?;
            let explanation = explain(&statement);
            let plan = translation::build(statement)
                .map_err(|err| log_translation_error(&sql, err))?;
            check_mass_mutation(&plan, configuration.mass_mutations)?;
            writeln!(context.output, "{explanation}")?;
            writeln!(context.output)?;
            write_json(&mut context.output, &plan.to_json(), &configuration)?;
        }
    }
    Ok(())
}

/// Write the initial configuration and its schema.
fn initialize(context_path: &Path, force: bool) -> anyhow::Result<()> {
    let configuration_file = context_path.join(sqldoc_configuration::CONFIGURATION_FILENAME);
    if configuration_file.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            configuration_file.display()
        );
    }
    sqldoc_configuration::write_parsed_configuration(
        &sqldoc_configuration::ParsedConfiguration::initial(),
        context_path,
    )?;
    tracing::info!(
        directory = %context_path.display(),
        "wrote the initial configuration"
    );
    Ok(())
}

/// Translate one statement and apply the mass mutation policy to the plan.
fn translate(sql: &str, configuration: &Configuration) -> anyhow::Result<Plan> {
    let plan = translation::translate(sql).map_err(|err| log_translation_error(sql, err))?;
    check_mass_mutation(&plan, configuration.mass_mutations)?;
    tracing::debug!(
        collection = plan.collection(),
        operation = plan.operation(),
        "translated statement"
    );
    Ok(plan)
}

/// One `{"status": ..}` entry per statement, in input order.
fn batch(queries: &[String], configuration: &Configuration) -> Vec<serde_json::Value> {
    let mut entries = Vec::with_capacity(queries.len());
    for (sql, result) in queries.iter().zip(translation::translate_batch(queries)) {
        let result = result
            .map_err(|err| log_translation_error(sql, err))
            .and_then(|plan| {
                check_mass_mutation(&plan, configuration.mass_mutations)?;
                Ok(plan)
            });
        let failed = result.is_err();
        entries.push(match result {
            Ok(plan) => serde_json::json!({"status": "success", "plan": plan.to_json()}),
            Err(err) => serde_json::json!({"status": "error", "message": err.to_string()}),
        });
        if failed && configuration.stop_batch_on_error {
            tracing::info!(
                translated = entries.len(),
                total = queries.len(),
                "stopping the batch at the first error"
            );
            break;
        }
    }
    entries
}

/// `{"isValid": .., "message": ..}`
fn validate(sql: &str, configuration: &Configuration) -> serde_json::Value {
    match translate(sql, configuration) {
        Ok(_) => serde_json::json!({
            "isValid": true,
            "message": "SQL query is valid and can be translated",
        }),
        Err(err) => serde_json::json!({
            "isValid": false,
            "message": format!("Invalid SQL query: {err}"),
        }),
    }
}

/// Apply the configured policy to UPDATE and DELETE plans without a filter.
fn check_mass_mutation(plan: &Plan, policy: MassMutations) -> anyhow::Result<()> {
    if !plan.is_unrestricted_mutation() {
        return Ok(());
    }
    match policy {
        MassMutations::Allow => Ok(()),
        MassMutations::Warn => {
            tracing::warn!(
                collection = plan.collection(),
                operation = plan.operation(),
                "statement has no WHERE clause and affects every document in the collection"
            );
            Ok(())
        }
        MassMutations::Deny => anyhow::bail!(
            "refusing to {} every document in '{}': the statement has no WHERE clause",
            plan.operation(),
            plan.collection()
        ),
    }
}

fn log_translation_error(sql: &str, err: translation::Error) -> anyhow::Error {
    tracing::error!(
        event.name = "Translation error",
        sql,
        body = %err,
        error = true,
    );
    err.into()
}

fn read_sql(sql: Option<String>, input: &mut impl Read) -> anyhow::Result<String> {
    match sql {
        Some(sql) => Ok(sql),
        None => read_to_string(input),
    }
}

fn read_to_string(input: &mut impl Read) -> anyhow::Result<String> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("unable to read standard input")?;
    Ok(text)
}

fn write_json(
    output: &mut impl Write,
    value: &serde_json::Value,
    configuration: &Configuration,
) -> anyhow::Result<()> {
    let text = if configuration.pretty_output {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(output, "{text}")?;
    Ok(())
}
