use clap::Parser;
use log::{debug, info};

use elb_consolidator::{
    Cli, ConsolidationOutput, EngineConfig, Inventory, OutputFormat, Result,
    display_recommendations_table, generate_recommendations, init_logger, render_report,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose, cli.quiet)?;

    info!("Starting ELB Consolidation Recommender");
    debug!("Inventory file: {}", cli.inventory.display());

    let inventory = Inventory::from_file(&cli.inventory)?;
    let security_groups = inventory.security_groups_by_id();
    let config = EngineConfig::new(cli.elbv2_cost_ratio);

    let report = generate_recommendations(&inventory.load_balancers, &security_groups, &config)?;

    match cli.output {
        OutputFormat::Report => print!("{}", render_report(&report)),
        OutputFormat::Json => {
            let output = ConsolidationOutput::new(&report);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => display_recommendations_table(&report)?,
    }

    Ok(())
}
