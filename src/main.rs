mod data_processing;
mod data_summary;
mod file_creation;
mod hand_history;
mod stats_error;

use crate::data_processing::data_processor::aggregate;
use crate::data_processing::threebet_mapping::ThreebetMapping;
use crate::data_summary::data_summarizer::{filter_player, summarize, SortKey};
use crate::data_summary::net_summarizer::{net_results, top_losses, top_wins};
use crate::data_summary::pot_summarizer::average_pot_by_street;
use crate::data_summary::showdown_summarizer::{by_bet_level, player_aggression, showdown_aggression};
use crate::file_creation::file_creator::{
    create_net_csv, create_player_aggression_csv, create_pot_csv, create_shows_csv, create_stats_csv,
};
use crate::hand_history::hand_record::HandRecord;
use crate::hand_history::{load_hands, InputFormat};

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Computes hands played, VPIP, PFR and three-bet statistics per player.
#[derive(Parser, Debug)]
#[command(name = "hand_stats", version)]
struct Cli {
    /// Hand records (JSON array) or a raw table log (CSV with entry,at,order columns)
    input: PathBuf,

    /// Input encoding; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// CSV of externally computed three-bet counts (player,threebet_count)
    #[arg(long)]
    threebets: Option<PathBuf>,

    /// Only report this player, and write their biggest wins and losses
    #[arg(long)]
    player: Option<String>,

    /// Row order of the statistics table
    #[arg(long, value_enum, default_value_t = SortKey::Vpip)]
    sort: SortKey,

    /// Statistics table path [default: <input dir>/<input name>/charts/player_metrics_chart.csv]
    #[arg(short, long, env = "HAND_STATS_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of winning and losing hands written for --player
    #[arg(long, default_value_t = 10)]
    top: usize,
}

impl Cli {
    /// The folder reports go to when no output path is given: a folder named
    /// after the input, next to it.
    fn report_dir(&self) -> PathBuf {
        let stem = self
            .input
            .file_stem()
            .map(|stem| stem.to_os_string())
            .unwrap_or_else(|| "report".into());
        self.input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(stem)
    }

    fn stats_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            self.report_dir()
                .join("charts")
                .join("player_metrics_chart.csv")
        })
    }

    /// Where the showdown charts go: next to the statistics table.
    fn charts_dir(&self) -> PathBuf {
        self.stats_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// The folder holding `hands/` and `players/`: the report folder by
    /// default, the output file's folder when `--output` is set.
    fn output_root(&self) -> PathBuf {
        match &self.output {
            Some(output) => output
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            None => self.report_dir(),
        }
    }

    fn hands_dir(&self) -> PathBuf {
        self.output_root().join("hands")
    }

    fn players_dir(&self) -> PathBuf {
        self.output_root().join("players")
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let format = cli
        .format
        .unwrap_or_else(|| InputFormat::from_path(&cli.input));
    let hands = load_hands(&cli.input, format)
        .with_context(|| format!("cannot load hands from {}", cli.input.display()))?;

    let threebets = cli
        .threebets
        .as_deref()
        .map(ThreebetMapping::from_csv_path)
        .transpose()
        .context("cannot load three-bet counts")?;

    let aggregation = aggregate(&hands, threebets.as_ref());
    let sort = cli.sort;
    let mut summaries = summarize(aggregation.stats, |a, b| sort.compare(a, b));

    if let Some(player) = &cli.player {
        summaries = filter_player(summaries, player);
        if summaries.is_empty() {
            log::warn!("player {} does not appear in any hand", player);
        }
    }
    create_stats_csv(&cli.stats_path(), &summaries)?;
    write_showdown_charts(cli, &hands)?;

    if let Some(player) = &cli.player {
        write_net_results(cli, &hands, player)?;
    }

    Ok(())
}

/// Writes the showdown wager charts, one file per player and the pot averages.
fn write_showdown_charts(cli: &Cli, hands: &[HandRecord]) -> anyhow::Result<()> {
    let charts = cli.charts_dir();
    let rows = showdown_aggression(hands);
    create_shows_csv(&charts.join("full_shows_chart.csv"), &rows, true)?;
    for (level, group) in by_bet_level(&rows) {
        create_shows_csv(&charts.join(format!("chart_{}.csv", level)), &group, false)?;
    }

    let pots = average_pot_by_street(hands);
    for pot in &pots {
        log::info!("average {} pot: {:.2} over {} hands", pot.street, pot.average_pot, pot.hands);
    }
    create_pot_csv(&charts.join("average_pot_by_stage.csv"), &pots)?;

    let players = cli.players_dir();
    for (player, rows) in player_aggression(hands) {
        create_player_aggression_csv(&players.join(format!("{}.csv", file_stem(&player))), &rows)?;
    }
    Ok(())
}

/// A player name usable as a file name: spaces become underscores.
fn file_stem(player: &str) -> String {
    player.trim().replace(' ', "_")
}

fn write_net_results(cli: &Cli, hands: &[HandRecord], player: &str) -> anyhow::Result<()> {
    let nets = net_results(hands, player);
    let name = file_stem(player);
    let dir = cli.hands_dir();

    create_net_csv(
        &dir.join(format!("{}_top{}_wins.csv", name, cli.top)),
        &top_wins(&nets, cli.top),
    )?;
    create_net_csv(
        &dir.join(format!("{}_top{}_losses.csv", name, cli.top)),
        &top_losses(&nets, cli.top),
    )?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
