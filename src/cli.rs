//! Command-line argument parsing for linked-steps.

use clap::{ArgAction, Parser};
use linked_steps::config::EndpointConfig;
use linked_steps::error::Result;
use linked_steps::query::step_guide_query;
use linked_steps::sparql::AuthMode;
use std::path::PathBuf;

/// Fetch a step-by-step guide from a SPARQL endpoint and run its steps.
#[derive(Parser, Debug)]
#[command(name = "linked-steps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// IRI of the guide to run
    #[arg(value_name = "ENTITY", required_unless_present = "query")]
    pub entity: Option<String>,

    /// Raw SELECT query to run instead of the guide query
    #[arg(long, value_name = "TEXT", conflicts_with = "entity")]
    pub query: Option<String>,

    /// SPARQL endpoint URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Endpoint user
    #[arg(short = 'u', long, value_name = "USER")]
    pub user: Option<String>,

    /// Endpoint password
    #[arg(short = 'P', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Authentication mode (none, basic, digest); digest when credentials are given
    #[arg(short = 'a', long, value_name = "MODE")]
    pub auth: Option<AuthMode>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the results instead of running the steps
    #[arg(long)]
    pub print: bool,

    /// Announce steps and their commands without running them
    #[arg(long, conflicts_with = "print")]
    pub dry_run: bool,

    /// Shell used to run step commands
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(linked_steps::config::Config::default_path)
    }

    /// Endpoint settings given on the command line.
    pub fn endpoint_overrides(&self) -> EndpointConfig {
        EndpointConfig {
            url: self.endpoint.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            auth: self.auth,
        }
    }

    /// The query to send: `--query` verbatim, or the guide query for ENTITY.
    pub fn build_query(&self) -> Result<String> {
        match (&self.query, &self.entity) {
            (Some(query), _) => Ok(query.clone()),
            (None, Some(entity)) => step_guide_query(entity),
            (None, None) => Err(linked_steps::StepsError::config(
                "Either ENTITY or --query is required",
            )),
        }
    }
}
