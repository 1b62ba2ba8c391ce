//! Request compiler CLI.
//!
//! Reads one JSON request file, compiles it, and either prints the SQL
//! (dry-run, the default) or executes it against a database and prints the
//! outcomes.

mod cli;

use anyhow::Context;
use comfy_table::Table;
use pgbridge::{Outcome, PoolClient, Request, compile, create_pool, dispatch};

use crate::cli::{Command, RunArgs, USAGE};

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli::parse(&args)? {
        Command::Help => {
            print!("{USAGE}");
            Ok(())
        }
        Command::Run(run_args) => run_request(run_args).await,
    }
}

async fn run_request(args: RunArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.request_file)
        .with_context(|| format!("reading {}", args.request_file.display()))?;
    let request: Request = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.request_file.display()))?;

    if !args.execute {
        return print_statements(&request);
    }

    dotenvy::dotenv().ok();
    let database_url = match args.database {
        Some(url) => url,
        None => std::env::var("DATABASE_URL")
            .context("--database not given and DATABASE_URL is not set")?,
    };

    let pool = create_pool(&database_url)?;
    let client = PoolClient::from_pool(&pool).await?;
    let outcomes = dispatch(&client, &request).await?;

    for outcome in outcomes {
        match outcome {
            Outcome::Message { message } => println!("{message}"),
            Outcome::Rows(rows) => print_rows(&rows),
        }
    }
    Ok(())
}

fn print_statements(request: &Request) -> anyhow::Result<()> {
    for statement in compile(request)? {
        println!("{};", statement.sql);
        for (index, param) in statement.params.iter().enumerate() {
            println!("-- ${} = {}", index + 1, param.0);
        }
    }
    Ok(())
}

fn print_rows(rows: &[serde_json::Value]) {
    let Some(first) = rows.first().and_then(|row| row.as_object()) else {
        println!("(0 rows)");
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut table = Table::new();
    table.set_header(headers.clone());
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|key| match row.get(*key) {
                Some(serde_json::Value::Null) | None => String::new(),
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
    println!("({} rows)", rows.len());
}
