#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::pedantic
)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ovh_cloud_project::{DebugConfig, DynAppConfig, api::data_source, tokio};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod read;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a cloud project and print its state as JSON
    Read {
        #[clap(long, help = "Exact description of the project to look up.")]
        description: Option<String>,
        #[clap(
            long,
            help = "Id of the project to look up. Takes precedence over --description."
        )]
        project_id: Option<String>,
        #[clap(
            long,
            short,
            conflicts_with_all(["description", "project_id"]),
            help = "Read the data source arguments as JSON from a file, or from stdin if `-`."
        )]
        input: Option<PathBuf>,
    },
    /// Print the schema of the data source as JSON
    Schema {},
    /// Print the version
    Version {},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Read {
            description,
            project_id,
            input,
        } => {
            let config = DynAppConfig::from_env()?;
            setup_tracing(&config.debug);

            let arguments = match input {
                Some(path) => read::arguments_from_json(&path)?,
                None => data_source::CloudProjectDataSourceConfig {
                    description,
                    project_id,
                },
            };
            read::read(&config.client, arguments).await?;
        }
        Commands::Schema {} => {
            println!("{}", serde_json::to_string_pretty(&data_source::schema())?);
        }
        Commands::Version {} => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn setup_tracing(debug: &DebugConfig) {
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_writer(std::io::stderr)
        .with_file(debug.extended_logs)
        .with_line_number(debug.extended_logs)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_and_version_run_without_configuration() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OVH_ENDPOINT", "ovh-mars");
            assert!(DynAppConfig::from_env().is_err());

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            for command in ["schema", "version"] {
                let cli = Cli::try_parse_from(["ovh-cloud-project", command]).unwrap();
                runtime.block_on(run(cli)).unwrap();
            }
            Ok(())
        });
    }
}
