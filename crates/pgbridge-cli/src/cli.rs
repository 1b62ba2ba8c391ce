use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Run(RunArgs),
}

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub request_file: PathBuf,
    pub execute: bool,
    pub database: Option<String>,
}

pub const USAGE: &str = "\
pgbridge - compile JSON-described PostgreSQL operations into SQL

Usage:
  pgbridge <REQUEST_FILE> [options]

By default the compiled statements are printed without touching a database.

Options:
  --execute           execute the request and print the outcomes
  --database <URL>    database URL (default: $DATABASE_URL)
  -h, --help          show this help
";

/// Parse command-line arguments. The first entry is the program name.
pub fn parse(args: &[String]) -> anyhow::Result<Command> {
    let mut request_file = None;
    let mut execute = false;
    let mut database = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--execute" => execute = true,
            "--database" => {
                let url = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--database requires a URL argument"))?;
                database = Some(url.clone());
            }
            other if other.starts_with('-') => {
                anyhow::bail!("unknown option '{other}'\n\n{USAGE}");
            }
            other => {
                if request_file.replace(PathBuf::from(other)).is_some() {
                    anyhow::bail!("only one request file may be given\n\n{USAGE}");
                }
            }
        }
    }

    let Some(request_file) = request_file else {
        return Ok(Command::Help);
    };

    Ok(Command::Run(RunArgs {
        request_file,
        execute,
        database,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("pgbridge")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_defaults_to_dry_run() {
        let Command::Run(run) = parse(&args(&["request.json"])).unwrap() else {
            panic!("expected run command");
        };
        assert!(!run.execute);
        assert!(run.database.is_none());
    }

    #[test]
    fn parse_execute_with_database() {
        let Command::Run(run) =
            parse(&args(&["request.json", "--execute", "--database", "postgres://x"])).unwrap()
        else {
            panic!("expected run command");
        };
        assert!(run.execute);
        assert_eq!(run.database.as_deref(), Some("postgres://x"));
    }

    #[test]
    fn parse_no_file_shows_help() {
        assert!(matches!(parse(&args(&[])).unwrap(), Command::Help));
    }

    #[test]
    fn parse_rejects_unknown_option() {
        assert!(parse(&args(&["request.json", "--frobnicate"])).is_err());
    }
}
