use std::io::{self, Write};

use alfred_core::api::{
    init_logging, CliError, Dispatcher, ServicesFactory, WorkflowContext, WorkflowInfo,
};
use alfred_plugins::services::PluginServicesFactory;
use clap::Parser;

mod commands;
mod workflow;

use commands::cli;

fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();

    let info = WorkflowInfo::from_env()?;
    let services = PluginServicesFactory::default().build_services();
    let mut ctx = WorkflowContext::load(info, true)?.with_services(services);

    match init_logging(ctx.log_level(), Some(ctx.log_file().as_path())) {
        Ok(handle) => ctx.attach_logging(handle),
        Err(e) => eprintln!("logging disabled: {e}"),
    }
    tracing::debug!(target: "alfred.cli", bundle_id = %ctx.bundle_id(), "workflow loaded");

    let dispatcher = Dispatcher::new(workflow::registry());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        cli::Commands::Tell(t) => {
            let query = t.query.unwrap_or_default();
            dispatcher.emit_tell(&mut ctx, &t.action, &query, &mut out)?;
        }
        cli::Commands::Do(d) => {
            let query = d.query.unwrap_or_default();
            dispatcher.emit_do(&mut ctx, &d.action, &query, d.modifier.as_deref(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}
