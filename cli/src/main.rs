use clap::Parser;
use engine::ThemeRegistry;
use engine::platform::{OsFileSystem, SystemEnvironment};
use engine::xdg::XdgDirs;
use kde_colors::args::Cli;
use kde_colors::config::{default_config_path, load_config};
use kde_colors::logger::{resolve_level, setup_logger};
use kde_colors::runner::CliRunner;

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let xdg = XdgDirs::from_env(&SystemEnvironment);
    let implicit = default_config_path(xdg.config_home());

    let config = match load_config(cli.config.as_deref(), implicit.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return e.exit_code();
        }
    };

    let level = resolve_level(cli.verbose, config.logging().level());
    if let Err(e) = setup_logger(level, config.logging().file()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let registry = ThemeRegistry::new(Box::new(OsFileSystem), Box::new(SystemEnvironment));
    CliRunner::new(registry).run(cli, config.output().format())
}
