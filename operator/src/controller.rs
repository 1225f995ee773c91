use std::sync::Arc;

use controllerlib::{patch_instance, ApiPatchHelper, InstanceOpts, Logger};
use futures::StreamExt;
use kube::api::Api;
use kube::runtime::controller::{Action, Controller};
use kube::runtime::watcher;
use kube::{Client, ResourceExt};
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::OperatorConfig;
use crate::widget::{desired_status, validate_spec, Widget};

pub const CONTROLLER_NAME: &str = "widget-controller";

pub struct Context {
    pub client: Client,
    pub config: OperatorConfig,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Widget is missing {0}")]
    MissingObjectKey(&'static str),
}

pub async fn reconcile(widget: Arc<Widget>, ctx: Arc<Context>) -> Result<Action, Error> {
    let name = widget
        .metadata
        .name
        .clone()
        .ok_or(Error::MissingObjectKey(".metadata.name"))?;
    let namespace = widget
        .namespace()
        .ok_or(Error::MissingObjectKey(".metadata.namespace"))?;

    let api: Api<Widget> = Api::namespaced(ctx.client.clone(), &namespace);
    let helper = ApiPatchHelper::new(api);

    let validation = validate_spec(&widget.spec);
    let mut desired = (*widget).clone();
    desired.status = Some(desired_status(
        widget.status.as_ref(),
        validation.as_ref().err(),
    ));

    let opts = InstanceOpts::new(
        CONTROLLER_NAME,
        format!("{}/{}", namespace, name),
        &desired,
        &helper,
    )
    .with_error(validation.err().map(anyhow::Error::from));
    patch_instance(Logger::global(), opts).await;

    Ok(Action::requeue(ctx.config.requeue_interval))
}

pub fn error_policy(_widget: Arc<Widget>, error: &Error, ctx: Arc<Context>) -> Action {
    warn!("Failed to reconcile widget: {}", error);
    Action::requeue(ctx.config.error_requeue_interval)
}

pub async fn run(client: Client, config: OperatorConfig) -> anyhow::Result<()> {
    let widgets: Api<Widget> = match &config.watch_namespace {
        Some(namespace) => Api::namespaced(client.clone(), namespace),
        None => Api::all(client.clone()),
    };
    info!(
        "Starting {} (namespace: {})",
        CONTROLLER_NAME,
        config.watch_namespace.as_deref().unwrap_or("all")
    );

    let ctx = Arc::new(Context { client, config });
    Controller::new(widgets, watcher::Config::default())
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|result| async move {
            match result {
                Ok((widget, _action)) => debug!("Reconciled widget {}", widget),
                Err(e) => warn!("Widget controller error: {}", e),
            }
        })
        .await;

    info!("{} stopped", CONTROLLER_NAME);
    Ok(())
}
