//! Headless list refresh loop

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use super::render::{render_description, render_table, render_xray};
use crate::config::Config;
use crate::kube;
use crate::resource::Lister;
use crate::watcher::{ListOptions, ListWatcher, RefreshEvent, get_all_commands, new_list};

/// Options of a headless run
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub kinds: Vec<String>,
    pub namespace: Option<String>,
    pub all_namespaces: bool,
    pub once: bool,
    pub read_only: bool,
    pub describe: Option<String>,
    pub yaml: Option<String>,
    pub xray: Option<String>,
}

/// Build the requested lists and print their tables
pub async fn run(args: RunArgs, config: Config) -> Result<()> {
    if args.kinds.is_empty() {
        return Err(anyhow!("No kind given. Available: {}", available_commands()));
    }

    let client = kube::create_client().await?;
    match kube::get_context() {
        Ok(context) => tracing::info!("Connected to Kubernetes cluster: {}", context),
        Err(e) => tracing::debug!("Could not read current context: {}", e),
    }

    let namespace = kube::resolve_namespace(
        args.all_namespaces,
        args.namespace.as_deref(),
        &config.default_namespace,
    );
    let opts = ListOptions {
        read_only: config.read_only || args.read_only,
        request_timeout: config.request_deadline(),
    };

    let lists = args
        .kinds
        .iter()
        .map(|cmd| {
            new_list(cmd, &client, &namespace, &opts).ok_or_else(|| {
                anyhow!("Unknown kind '{}'. Available: {}", cmd, available_commands())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(path) = args.describe.as_deref() {
        let list = &lists[0];
        let props = list
            .describe(path)
            .await
            .with_context(|| format!("Failed to describe {} {}", list.kind(), path))?;
        print!("{}", render_description(&props));
        return Ok(());
    }

    if let Some(path) = args.yaml.as_deref() {
        let list = &lists[0];
        let doc = list
            .marshal(path)
            .await
            .with_context(|| format!("Failed to marshal {} {}", list.kind(), path))?;
        print!("{}", doc);
        return Ok(());
    }

    if let Some(path) = args.xray.as_deref() {
        let list = &lists[0];
        let xray = list
            .xray(path)
            .await
            .with_context(|| format!("Failed to x-ray {} {}", list.kind(), path))?;
        print!("{}", render_xray(list.kind(), path, &xray));
        return Ok(());
    }

    if args.once {
        return run_once(&lists).await;
    }

    watch(lists, &config).await
}

async fn run_once(lists: &[Arc<dyn Lister>]) -> Result<()> {
    let results = futures::future::join_all(lists.iter().map(|list| list.reconcile())).await;

    for (list, result) in lists.iter().zip(results) {
        result.with_context(|| format!("Failed to list {}", list.kind()))?;
        print!("{}", render_table(list.kind(), &list.data()));
        tracing::debug!("{} verbs: {:?}", list.kind(), list.access().granted());
    }

    Ok(())
}

async fn watch(lists: Vec<Arc<dyn Lister>>, config: &Config) -> Result<()> {
    let (mut watcher, mut event_rx) = ListWatcher::new(config.refresh_interval());
    for list in lists {
        watcher.watch(list);
    }
    tracing::debug!("Watching {} lists", watcher.len());

    loop {
        tokio::select! {
            event = event_rx.recv() => match event {
                Some(RefreshEvent::Updated { kind, table, .. }) => {
                    println!("{}", render_table(kind, &table));
                }
                Some(RefreshEvent::Error { kind, message }) => {
                    eprintln!("{}: {}", kind, message);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted, stopping watchers");
                break;
            }
        }
    }

    watcher.stop();
    Ok(())
}

fn available_commands() -> String {
    get_all_commands()
        .iter()
        .map(|(name, aliases)| format!("{} ({})", name, aliases.join(", ")))
        .collect::<Vec<_>>()
        .join(", ")
}
