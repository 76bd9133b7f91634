use std::{io::Read as _, path::Path};

use anyhow::Context;
use ovh_cloud_project::{
    ClientConfig, OvhClient,
    api::{
        ErrorModel, ErrorResponse,
        data_source::{self, CloudProjectDataSourceConfig},
    },
    tracing,
};

pub(crate) fn arguments_from_json(path: &Path) -> anyhow::Result<CloudProjectDataSourceConfig> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read data source arguments from stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data source arguments from `{}`", path.display()))?
    };

    parse_arguments(&raw)
}

fn parse_arguments(raw: &str) -> anyhow::Result<CloudProjectDataSourceConfig> {
    serde_json::from_str(raw).context("Data source arguments are not valid JSON")
}

/// Run the data source read and print its outcome to stdout.
///
/// Failures are printed as an error response and turned into a non-zero exit.
pub(crate) async fn read(
    client_config: &ClientConfig,
    arguments: CloudProjectDataSourceConfig,
) -> anyhow::Result<()> {
    let outcome = match OvhClient::new(client_config) {
        Ok(client) => data_source::read(&client, arguments).await,
        Err(e) => Err(ErrorModel::from(e)),
    };

    match outcome {
        Ok(state) => {
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(())
        }
        Err(error) => {
            tracing::error!(error_type = %error.r#type, "{}", error.message);
            let error_type = error.r#type.clone();
            println!(
                "{}",
                serde_json::to_string_pretty(&ErrorResponse::from(error))?
            );
            anyhow::bail!("Reading the cloud project failed: {error_type}")
        }
    }
}
