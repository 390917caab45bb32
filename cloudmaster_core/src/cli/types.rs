use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub commands: Commands,
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

#[derive(Debug, Subcommand, Clone, Eq, PartialEq)]
pub enum Commands {
    /// Operations on cloud backends
    #[command(subcommand)]
    Cloud(CloudArgs),

    /// Operations on virtual machines
    #[command(subcommand)]
    Vm(Crud),
}

#[derive(Debug, Subcommand, Clone, Eq, PartialEq)]
pub enum Crud {
    /// List vms, on one cloud or on all of them.
    #[command()]
    Ls(VmArgs),

    /// Request removal of a vm. Best effort: the row drops from list
    /// output once the backend has processed the delete.
    #[command(arg_required_else_help = true)]
    Rm(RmArgs),

    /// Live refreshing vm view for one cloud.
    #[command()]
    Watch(WatchArgs),
}

#[derive(Default, Debug, Args, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct VmArgs {
    /// Restrict to one cloud backend.
    #[arg(long, value_name = "CLOUD_LABEL")]
    pub cloud: Option<String>,
}

#[derive(Default, Debug, Args, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RmArgs {
    #[arg(long, value_name = "VM_NAME")]
    pub name: String,

    #[arg(long, value_name = "CLOUD_LABEL")]
    pub cloud: String,
}

#[derive(Default, Debug, Args, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WatchArgs {
    /// Cloud backend to watch.
    #[arg(long, value_name = "CLOUD_LABEL")]
    pub cloud: Option<String>,

    /// Refresh period in milliseconds.
    #[arg(long, value_name = "MILLISECONDS")]
    pub interval: Option<u64>,
}

#[derive(Default, Debug, Subcommand, Clone, Eq, PartialEq)]
pub enum CloudArgs {
    /// List the configured backend bindings.
    #[default]
    Ls,
}
