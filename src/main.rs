use camino::Utf8PathBuf;
use clap::Parser;

use satmerge::export::{export_archive, print_inventory};
use satmerge::mat::MatFile;
use satmerge::merge::merge_dir;
use satmerge::satmerge_errors::SatmergeError;

#[derive(Parser)]
#[command(name = "satmerge")]
#[command(about = "Convert a MAT-file archive to CSV and merge the satellite tables")]
struct Cli {
    /// Path to the MAT-file archive, e.g. results.mat
    archive: Utf8PathBuf,

    /// Directory the CSV tables are written to
    #[arg(long, default_value = ".")]
    out_dir: Utf8PathBuf,
}

fn main() -> Result<(), SatmergeError> {
    let cli = Cli::parse();

    if !cli.archive.exists() {
        return Err(SatmergeError::ArchiveNotFound(cli.archive.into_string()));
    }
    std::fs::create_dir_all(&cli.out_dir)?;

    println!("Reading MAT-file: {}", cli.archive);
    let mat = MatFile::read(&cli.archive)?;

    print_inventory(&mat);
    export_archive(&mat, &cli.out_dir)?;
    merge_dir(&cli.out_dir)?;

    Ok(())
}
