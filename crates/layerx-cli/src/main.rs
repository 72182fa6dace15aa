//! LayerX CLI - Command line interface for the LayerX control plane.

use clap::{Parser, Subcommand};
use serde::Serialize;

use layerx_client::{BrainClient, HttpClient, RpiClient, TpiClient};
use layerx_core::{
    NodeId, PortRange, ProviderId, Resource, ResourceId, Task, TaskId, TaskProvider,
};

/// LayerX CLI - Control plane management tool
#[derive(Parser)]
#[command(name = "layerx")]
#[command(about = "CLI for the LayerX control plane", long_about = None)]
struct Cli {
    /// Control plane address
    #[arg(short, long, env = "LAYERX_URL", default_value = "http://127.0.0.1:5000")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List nodes and their resources
    Nodes,

    /// Offer a resource on behalf of a node
    #[command(name = "submit-resource")]
    SubmitResource {
        /// Node ID
        #[arg(short, long)]
        node: String,

        /// Resource ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// CPU shares
        #[arg(long, default_value = "0")]
        cpus: f64,

        /// Memory in MB
        #[arg(long, default_value = "0")]
        mem: f64,

        /// Disk in MB
        #[arg(long, default_value = "0")]
        disk: f64,

        /// Port ranges as BEGIN-END, repeatable
        #[arg(long = "ports", value_parser = parse_port_range)]
        ports: Vec<PortRange>,

        /// Offer source (e.g. agent@host:port)
        #[arg(short, long, default_value = "layerx-cli")]
        source: String,
    },

    /// List Pending tasks
    Pending,

    /// List Staging tasks
    Staging,

    /// List Running tasks
    Running,

    /// List recently terminated tasks
    Terminal,

    /// Drain queued status updates
    #[command(name = "status-updates")]
    StatusUpdates,

    /// Assign Pending tasks to a node
    Assign {
        /// Target node ID
        #[arg(short, long)]
        node: String,

        /// Task IDs to assign
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Migrate Staging or Running tasks to a node
    Migrate {
        /// Target node ID
        #[arg(short, long)]
        node: String,

        /// Task IDs to migrate
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// List registered task providers
    Providers,

    /// Register a task provider
    #[command(name = "register-provider")]
    RegisterProvider {
        /// Provider ID
        id: String,

        /// Provider source (e.g. framework@host:port)
        #[arg(short, long)]
        source: String,
    },

    /// Submit a task under a provider
    #[command(name = "submit-task")]
    SubmitTask {
        /// Provider ID
        #[arg(short, long)]
        provider: String,

        /// Task ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Task name
        #[arg(short, long)]
        name: String,

        /// Command to run
        #[arg(short, long)]
        command: String,

        /// Opaque payload forwarded to the executor
        #[arg(long)]
        payload: Option<String>,

        /// CPU shares
        #[arg(long, default_value = "0")]
        cpus: f64,

        /// Memory in MB
        #[arg(long, default_value = "0")]
        mem: f64,

        /// Disk in MB
        #[arg(long, default_value = "0")]
        disk: f64,
    },

    /// Remove a task from whichever pool holds it
    #[command(name = "purge-task")]
    PurgeTask {
        /// Task ID
        id: String,
    },

    /// Reset all control plane state
    Purge,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let http = HttpClient::new(&cli.addr);
    let rpi = RpiClient::new(http.clone());
    let tpi = TpiClient::new(http.clone());
    let brain = BrainClient::new(http);

    match cli.command {
        Commands::Nodes => print_json(&rpi.get_nodes().await?)?,
        Commands::SubmitResource {
            node,
            id,
            cpus,
            mem,
            disk,
            ports,
            source,
        } => {
            let id = id.map(ResourceId::new).unwrap_or_else(ResourceId::generate);
            let resource = ports.into_iter().fold(
                Resource::new(id, node)
                    .with_cpus(cpus)
                    .with_mem(mem)
                    .with_disk(disk)
                    .with_source(source),
                Resource::with_ports,
            );
            print_json(&rpi.submit_resource(&resource).await?)?;
        }
        Commands::Pending => print_json(&brain.get_pending_tasks().await?)?,
        Commands::Staging => print_json(&brain.get_staging_tasks().await?)?,
        Commands::Running => print_json(&brain.get_running_tasks().await?)?,
        Commands::Terminal => print_json(&brain.get_terminal_tasks().await?)?,
        Commands::StatusUpdates => print_json(&brain.get_status_updates().await?)?,
        Commands::Assign { node, tasks } => {
            let staged = brain
                .assign_tasks(&NodeId::new(node), &task_ids(tasks))
                .await?;
            print_json(&staged)?;
        }
        Commands::Migrate { node, tasks } => {
            let staged = brain
                .migrate_tasks(&NodeId::new(node), &task_ids(tasks))
                .await?;
            print_json(&staged)?;
        }
        Commands::Providers => print_json(&tpi.get_task_providers().await?)?,
        Commands::RegisterProvider { id, source } => {
            let provider = tpi
                .register_task_provider(&TaskProvider::new(id, source))
                .await?;
            print_json(&provider)?;
        }
        Commands::SubmitTask {
            provider,
            id,
            name,
            command,
            payload,
            cpus,
            mem,
            disk,
        } => {
            let id = id.map(TaskId::new).unwrap_or_else(TaskId::generate);
            let mut task = Task::new(id, name, command).with_resources(cpus, mem, disk);
            if let Some(payload) = payload {
                task = task.with_payload(payload);
            }
            let stored = tpi.submit_task(&ProviderId::new(provider), &task).await?;
            print_json(&stored)?;
        }
        Commands::PurgeTask { id } => print_json(&tpi.purge_task(&TaskId::new(id)).await?)?,
        Commands::Purge => {
            brain.purge().await?;
            println!("Control plane state purged");
        }
    }

    Ok(())
}

/// Parse a `BEGIN-END` port range.
fn parse_port_range(raw: &str) -> Result<PortRange, String> {
    let (begin, end) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected BEGIN-END, got '{raw}'"))?;
    let begin: u64 = begin.trim().parse().map_err(|e| format!("bad begin port: {e}"))?;
    let end: u64 = end.trim().parse().map_err(|e| format!("bad end port: {e}"))?;
    if end < begin {
        return Err(format!("port range {begin}-{end} is reversed"));
    }
    Ok(PortRange::new(begin, end))
}

fn task_ids(ids: Vec<String>) -> Vec<TaskId> {
    ids.into_iter().map(TaskId::new).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
