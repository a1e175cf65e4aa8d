use clap::Parser;
use seqwalk::logging::init_logger;
use seqwalk::seqwalk::{run_seqwalk, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);
    run_seqwalk(&args)?;
    Ok(())
}
