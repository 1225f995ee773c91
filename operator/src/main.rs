use kube::{Client as KubeClient, CustomResourceExt};
use log::info;
use std::env;

mod config;
mod controller;
mod logging;
mod widget;

use config::OperatorConfig;
use logging::{level_from_str, setup_logging};
use widget::Widget;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = OperatorConfig::from_env();
    setup_logging(level_from_str(config.log_level.as_deref()))?;

    let mode = env::var("MODE").unwrap_or_else(|_| "operator".to_string());

    match mode.to_lowercase().as_str() {
        "crd" => {
            print!("{}", serde_yaml::to_string(&Widget::crd())?);
        }
        "operator" => {
            info!("Starting in OPERATOR mode");
            let client = KubeClient::try_default().await?;
            controller::run(client, config).await?;
        }
        _ => {
            return Err(format!("Invalid MODE '{}'. Must be 'operator' or 'crd'", mode).into());
        }
    }

    Ok(())
}
