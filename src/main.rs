use clap::Parser;
use snake_arcade::app;
use snake_arcade::config::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.init_tracing();
    app::run(args)
}
