use std::path::PathBuf;

use catalog_cli::pipeline::MigrationRun;

#[derive(Debug)]
pub struct RunResult {
    pub books_path: PathBuf,
    pub loans_path: PathBuf,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub run: MigrationRun,
}
