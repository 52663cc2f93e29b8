//! Command-line argument parsing
//!
//! Subcommands:
//! - `check`: validate and parse a file, print its columns
//! - `normalize`: rewrite a file with the save policy (trim, drop blank rows)
//! - `apply`: run an edit script against a file
//! - `push` / `pull`: exchange files with a directory-backed remote

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::GridConfig;

/// Semicolon CSV grid editor
#[derive(Parser, Debug)]
#[command(name = "gridedit", version, about = "Edit semicolon-delimited CSV grids")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Use this config file instead of ~/.config/gridedit/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Validate and parse a file, then print its schema
    Check {
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-serialize a file: trim cells, drop blank rows, LF line endings
    Normalize {
        file: PathBuf,
        /// Output file (defaults to rewriting FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run an edit script (one command per line) and save the result
    Apply {
        file: PathBuf,
        #[arg(short, long, value_name = "SCRIPT")]
        script: PathBuf,
        /// Output file (defaults to rewriting FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a file to its canonical remote path
    Push {
        file: PathBuf,
        /// Raw remote path (defaults to FILE's name)
        #[arg(long)]
        path: Option<String>,
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Download a remote file, validate it and save it locally as received
    Pull {
        /// Raw remote path
        raw: String,
        /// Output file (defaults to the remote file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Apply the save policy (trim cells, drop blank rows) before writing
        #[arg(long)]
        normalize: bool,
        #[command(flatten)]
        remote: RemoteArgs,
    },
}

/// Options shared by `push` and `pull`
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteArgs {
    /// Supplier code for canonical paths (overrides config)
    #[arg(long)]
    pub supplier: Option<String>,
    /// Root directory of the remote store (overrides config)
    #[arg(long, value_name = "DIR")]
    pub remote_root: Option<PathBuf>,
}

impl RemoteArgs {
    /// Supplier from the flag, else from config
    pub fn supplier(&self, config: &GridConfig) -> Option<String> {
        self.supplier.clone().or_else(|| config.supplier.clone())
    }

    /// Remote root from the flag, else from config
    pub fn remote_root(&self, config: &GridConfig) -> Result<PathBuf, String> {
        self.remote_root
            .clone()
            .or_else(|| config.remote_root.clone())
            .ok_or_else(|| {
                "no remote root: pass --remote-root or set remote_root in config.yaml".to_string()
            })
    }
}

impl CliArgs {
    /// Load the config named by `--config`, or the default one
    pub fn load_config(&self) -> GridConfig {
        match &self.config {
            Some(path) => GridConfig::load_from(path),
            None => GridConfig::load(),
        }
    }
}

/// Output path: explicit, else the input itself
pub fn output_or_input(output: Option<&Path>, input: &Path) -> PathBuf {
    output.unwrap_or(input).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let args = CliArgs::try_parse_from(["gridedit", "check", "orders.csv"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Check {
                file: PathBuf::from("orders.csv"),
                json: false,
            }
        );
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_parse_apply_requires_script() {
        assert!(CliArgs::try_parse_from(["gridedit", "apply", "orders.csv"]).is_err());
        let args = CliArgs::try_parse_from([
            "gridedit", "apply", "orders.csv", "--script", "fix.txt", "-o", "out.csv",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            CliCommand::Apply { ref output, .. } if output.as_deref() == Some(Path::new("out.csv"))
        ));
    }

    #[test]
    fn test_parse_push_with_remote_args() {
        let args = CliArgs::try_parse_from([
            "gridedit",
            "push",
            "orders.csv",
            "--supplier",
            "ACME",
            "--remote-root",
            "/srv/x",
            "--config",
            "cfg.yaml",
        ])
        .unwrap();
        let CliCommand::Push { remote, path, .. } = args.command else {
            panic!("expected push");
        };
        assert_eq!(path, None);
        assert_eq!(remote.supplier.as_deref(), Some("ACME"));
        assert_eq!(args.config, Some(PathBuf::from("cfg.yaml")));
    }

    #[test]
    fn test_parse_pull_normalize_flag() {
        let args = CliArgs::try_parse_from(["gridedit", "pull", "outputs/a.csv"]).unwrap();
        assert!(matches!(args.command, CliCommand::Pull { normalize: false, .. }));

        let args =
            CliArgs::try_parse_from(["gridedit", "pull", "outputs/a.csv", "--normalize"]).unwrap();
        assert!(matches!(args.command, CliCommand::Pull { normalize: true, .. }));
    }

    #[test]
    fn test_remote_args_fall_back_to_config() {
        let config = GridConfig {
            supplier: Some("CFG".into()),
            remote_root: Some(PathBuf::from("/cfg/root")),
            ..GridConfig::default()
        };
        let remote = RemoteArgs::default();
        assert_eq!(remote.supplier(&config).as_deref(), Some("CFG"));
        assert_eq!(remote.remote_root(&config).unwrap(), PathBuf::from("/cfg/root"));

        assert!(RemoteArgs::default()
            .remote_root(&GridConfig::default())
            .is_err());
    }

    #[test]
    fn test_output_or_input() {
        let input = Path::new("a.csv");
        assert_eq!(output_or_input(None, input), PathBuf::from("a.csv"));
        assert_eq!(
            output_or_input(Some(Path::new("b.csv")), input),
            PathBuf::from("b.csv")
        );
    }
}
