//! Command-line arguments for jop-etl

use std::path::PathBuf;

use clap::Parser;
use jop_common::config::{Overrides, TomlConfig};

#[derive(Parser, Debug)]
#[command(name = "jop-etl")]
#[command(about = "Extract, transform and load Joy of Painting episode data")]
#[command(version)]
pub struct Args {
    /// Config file (defaults to ./jop.toml, then the user config directory)
    #[arg(short, long, env = "JOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file to (re)create
    #[arg(short, long, env = "JOP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Directory holding episodes.txt, colors.csv and subjects.csv
    #[arg(long, env = "JOP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Extract and transform only; leave the database untouched
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Config file values with command-line/environment values on top
    pub fn resolve_config(&self) -> TomlConfig {
        TomlConfig::load(self.config.as_deref()).with_overrides(Overrides {
            database_path: self.database.clone(),
            data_dir: self.data_dir.clone(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["JOP_CONFIG", "JOP_DATABASE", "JOP_DATA_DIR"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_flags_override_config_file() {
        clear_env();
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("jop.toml");
        std::fs::write(
            &config_path,
            "database_path = \"from_file.db\"\ndata_dir = \"file_data\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "jop-etl",
            "--config",
            config_path.to_str().unwrap(),
            "--database",
            "from_flag.db",
        ])
        .unwrap();
        let config = args.resolve_config();

        assert_eq!(config.database_path, PathBuf::from("from_flag.db"));
        assert_eq!(config.data_dir, PathBuf::from("file_data"));
        assert!(!args.dry_run);
    }

    #[test]
    #[serial]
    fn test_environment_supplies_paths() {
        clear_env();
        std::env::set_var("JOP_DATA_DIR", "/srv/jop/raw");

        let args = Args::try_parse_from(["jop-etl", "--dry-run"]).unwrap();
        clear_env();

        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/jop/raw")));
        assert!(args.dry_run);
        let files = args.resolve_config().data_files();
        assert_eq!(files.colors, PathBuf::from("/srv/jop/raw/colors.csv"));
    }
}
