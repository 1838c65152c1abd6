mod commands;
mod terminal;

use clap::error::ErrorKind;
use commands::CommandLine;
use sipmon_core::{SipProber, UuidSource, run_batch};
use terminal::{logging, print};
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = match CommandLine::parse_args() {
        Ok(commands) => commands,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{e}");
            print::usage_and_exit(None)
        }
    };

    logging::init_logging();

    let (cfg, targets) = match commands.into_settings() {
        Ok(settings) => settings,
        Err(e) => print::usage_and_exit(Some(&e.to_string())),
    };

    debug!(?cfg, "probe configuration");
    info!(
        targets = targets.len(),
        src = %format!("{}:{}", cfg.src_ip, cfg.src_port),
        dst_port = cfg.dst_port,
        "starting probes"
    );

    let mut prober = SipProber::new(&cfg, UuidSource);
    run_batch(&targets, &mut prober, print::result_line).await;
    Ok(())
}
