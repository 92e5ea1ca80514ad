use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use futures::executor::block_on;
use indicatif::{ProgressBar, ProgressStyle};
use rootcause::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stwexport::artifacts::ExportedAssets;
use stwexport::data::AssetProvider;
use stwexport::data::dump::DumpProvider;
use stwexport::export::aggregate::run_exporters;
use stwexport::export::{ExportProgress, Exporter, exporter_by_name, standard_exporters};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExporterName {
    ItemRatings,
    Survivors,
    Difficulty,
    QuestLines,
}

/// The exporters named on the command line, or all of them if none were.
fn select_exporters(only: &[ExporterName]) -> Result<Vec<Box<dyn Exporter>>, Report> {
    if only.is_empty() {
        return Ok(standard_exporters());
    }

    only.iter()
        .map(|name| -> Result<Box<dyn Exporter>, Report> {
            let value = name
                .to_possible_value()
                .ok_or_else(|| rootcause::report!("Exporter {name:?} has no command line name"))?;
            let exporter = exporter_by_name(value.get_name())
                .ok_or_else(|| rootcause::report!("No exporter named {}", value.get_name()))?;
            Ok(exporter)
        })
        .collect()
}

/// Extracts Save the World game data tables into a single JSON artifact
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON dump of decoded game assets
    dump: PathBuf,

    /// Where to write the exported artifact
    #[clap(short, long, default_value = "assets.json")]
    output: PathBuf,

    /// A previously exported artifact to merge this run into. Entries from this run
    /// replace same-keyed entries in it.
    #[clap(long)]
    merge_with: Option<PathBuf>,

    /// Only run these exporters. Runs all of them if not given.
    #[clap(long, value_enum, num_args = 1..)]
    only: Vec<ExporterName>,

    /// Pretty-print the output JSON
    #[clap(long)]
    pretty: bool,

    /// Increase log verbosity. Overridden by RUST_LOG.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar() -> Result<ProgressBar, Report> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress bar template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn load_artifact(path: &Path) -> Result<ExportedAssets, Report> {
    let file = File::open(path).context_with(|| format!("Failed to open {}", path.display()))?;
    let assets: ExportedAssets = serde_json::from_reader(BufReader::new(file))
        .context_with(|| format!("Failed to parse exported artifact {}", path.display()))?;
    Ok(assets)
}

fn write_artifact(path: &Path, assets: &ExportedAssets, pretty: bool) -> Result<(), Report> {
    let file = File::create(path).context_with(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, assets)
    } else {
        serde_json::to_writer(&mut writer, assets)
    }
    .context("Failed to serialize exported assets")?;
    writer.flush().context("Failed to write exported assets")?;
    Ok(())
}

fn main() -> Result<(), Report> {
    let args = Args::parse();
    init_logging(args.verbose);

    // read the prior artifact up front so a bad path fails before the export runs
    let prior = args.merge_with.as_deref().map(load_artifact).transpose()?;

    let provider = DumpProvider::open(&args.dump)
        .context_with(|| format!("Failed to load asset dump {}", args.dump.display()))?;
    info!("loaded {} asset paths", provider.asset_paths().len());

    let exporters = select_exporters(&args.only)?;

    let pb = progress_bar()?;
    let sink = |progress: ExportProgress| {
        pb.set_message(format!(
            "[{}/{}] {} ({} assets loaded)",
            progress.completed_steps, progress.total_steps, progress.current_item, progress.assets_loaded
        ));
    };
    let exported = block_on(run_exporters(&provider, &exporters, &sink));
    pb.finish_and_clear();
    let exported = exported.context("Export failed")?;

    info!(
        "exported {} named items, {} difficulty rows, {} quest lines",
        exported.named_items.len(),
        exported.difficulty_info.len(),
        exported.main_quest_lines.len() + exported.event_quest_lines.len()
    );

    let assets = match prior {
        Some(mut prior) => {
            prior.merge(exported);
            prior
        }
        None => exported,
    };

    write_artifact(&args.output, &assets, args.pretty)?;
    info!("wrote {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_command_line_name_selects_its_exporter() {
        for name in ExporterName::value_variants() {
            let exporters = select_exporters(&[*name]).unwrap();
            let expected = name.to_possible_value().unwrap();
            assert_eq!(exporters.len(), 1);
            assert_eq!(exporters[0].name(), expected.get_name());
        }
    }

    #[test]
    fn no_names_selects_everything() {
        let all = select_exporters(&[]).unwrap();
        assert_eq!(all.len(), standard_exporters().len());

        let some = select_exporters(&[ExporterName::QuestLines, ExporterName::ItemRatings]).unwrap();
        let names: Vec<_> = some.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["quest-lines", "item-ratings"]);
    }
}
