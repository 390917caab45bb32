mod types;
pub use types::*;

use crate::cloud::Cloud;
use crate::config::CloudmasterConfig;
use crate::dashboard::Dashboard;
use crate::rest::RestClient;
use crate::vm::Vm;

use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;

// Logger
use env_logger::Builder;

// Error Handling
use log::warn;
use miette::Result;

impl Cli {
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();
        Self::switch(cli).await?;
        Ok(())
    }
    pub async fn switch(cli: Cli) -> Result<()> {
        // Set verbosity
        let verbosity = cli.verbose.log_level_filter();
        // Quiet the transport stack
        let value = format!(
            "{},{}",
            verbosity.to_string().to_lowercase(),
            "reqwest=error,hyper=error"
        );
        std::env::set_var("CLOUDMASTER_LOG", value);
        Builder::from_env("CLOUDMASTER_LOG").init();

        match cli.commands {
            /*
             * Operations on the configured cloud backends.
             */
            Commands::Cloud(args) => match args {
                CloudArgs::Ls => {
                    let config = CloudmasterConfig::get()?;
                    Cloud::display(Cloud::get_all(), &config.api_url)?;
                }
            },
            /*
             * Operations on virtual machines.
             */
            Commands::Vm(args) => match args {
                Crud::Ls(args) => {
                    let clouds = match args.cloud {
                        Some(label) => vec![Cloud::get_by_label(&label)?],
                        None => Cloud::get_all(),
                    };

                    let mut vms: HashMap<Cloud, Vec<Vm>> = HashMap::new();
                    for cloud in clouds {
                        let client = RestClient::from_config(cloud.clone())?;
                        match client.list().await {
                            Ok(list) => {
                                vms.insert(cloud, list);
                            }
                            Err(e) => warn!("cloud {:#?} unreachable: {}", cloud.label, e),
                        }
                    }
                    Vm::display_by_cloud(vms)?;
                }
                Crud::Rm(args) => {
                    let cloud = Cloud::get_by_label(&args.cloud)?;
                    let client = RestClient::from_config(cloud.clone())?;

                    // Best effort, the outcome is not reported.
                    if let Err(e) = client.delete(&args.name).await {
                        warn!("{}", e);
                    }

                    let message = format!(
                        "Requested delete of vm {} on {}",
                        args.name.bold().blue(),
                        cloud.label.bold().green()
                    );
                    println!("{}", message);
                }
                Crud::Watch(args) => {
                    let cloud = match args.cloud {
                        Some(label) => Cloud::get_by_label(&label)?,
                        None => Cloud::default(),
                    };
                    let config = CloudmasterConfig::get()?;
                    let period = args
                        .interval
                        .map(Duration::from_millis)
                        .unwrap_or_else(|| config.interval());

                    let client = RestClient::new(cloud, &config.api_url)?;
                    Dashboard::new(client, period).run().await?;
                }
            },
        };

        Ok(())
    }
}
