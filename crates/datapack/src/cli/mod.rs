pub mod import;
pub mod install;
pub mod register;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::DatapackConfig;

#[derive(Clone, Debug, Parser)]
#[command(name = "datapack", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Config file to read instead of ./datapack.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "i", name = "install", about = "Download and install an entry's active data pack")]
    Install(install::InstallArg),
    #[command(name = "import", about = "Install a data pack file that is already on disk")]
    Import(import::ImportArg),
    #[command(alias = "s", name = "show", about = "Show an entry and its data packs")]
    Show(show::ShowArg),
    #[command(name = "register", about = "Add a catalog entry to the metadata store")]
    Register(register::RegisterArg),
}

impl Commands {
    pub async fn run(self, config: &DatapackConfig) -> Result<()> {
        match self {
            Commands::Install(arg) => arg.run(config).await,
            Commands::Import(arg) => arg.run(config).await,
            Commands::Show(arg) => arg.run(config).await,
            Commands::Register(arg) => arg.run(config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { App::command().debug_assert(); }

    #[test]
    fn test_parse_install_with_sources() {
        let app = App::try_parse_from([
            "datapack",
            "install",
            "game-1",
            "--source",
            "Primary=https://a.example/packs/",
            "--source",
            "Backup=https://b.example/",
        ])
        .unwrap();

        let Commands::Install(arg) = app.cmd else {
            panic!("expected install");
        };
        assert_eq!(arg.entry, "game-1");
        let names: Vec<_> = arg.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Primary", "Backup"]);
        assert_eq!(arg.sources[1].base_url, "https://b.example/");
    }

    #[test]
    fn test_source_without_name_is_rejected() {
        assert!(App::try_parse_from(["datapack", "install", "game-1", "--source", "https://a.example/"]).is_err());
    }
}
