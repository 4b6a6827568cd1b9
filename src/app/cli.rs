use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Update Visual Studio project filters to match the folder structure"
)]
pub struct Cli {
    /// Path to the project directory
    pub project_dir: PathBuf,

    /// Path to the .vcxproj.filters file
    pub filters_file: PathBuf,
}
