use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tap_histogram::{
    config::DEFAULT_CONFIG_FILE,
    display,
    input::{self, ControlMessage},
    Analysis, Config, TapTempo,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file; ./tap-histogram.yml is used when present
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of histogram bins
    #[arg(long)]
    bins: Option<usize>,
    /// Print every update as a JSON object
    #[arg(long)]
    json: bool,
    /// Only print the BPM values
    #[arg(long)]
    no_chart: bool,
    /// Also take taps from a MIDI input port (substring match, empty = first port)
    #[cfg(feature = "midi")]
    #[arg(long, value_name = "PORT", num_args = 0..=1, default_missing_value = "")]
    midi: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let (tx, rx) = mpsc::channel::<ControlMessage>();
    let _keyboard = input::spawn_keyboard(tx.clone(), config.keys.clone())?;

    #[cfg(feature = "midi")]
    let _midi = match &args.midi {
        Some(port) => {
            let port = if port.is_empty() {
                config.midi.port.as_str()
            } else {
                port.as_str()
            };
            let midi = input::MidiTapInput::connect(port, config.midi.reset_note, tx.clone())?;
            info!("taking taps from MIDI port \"{}\"", midi.port_name());
            Some(midi)
        }
        None => None,
    };

    // the MIDI connection holds its sender until exit, so the loop ends on
    // Quit (quit key, stdin EOF or stdin error) rather than on hang-up
    drop(tx);

    println!(
        "Enter = tap, \"{}\" + Enter = reset, \"{}\" + Enter = quit",
        config.keys.reset, config.keys.quit
    );

    let mut tapper = TapTempo::new(config.histogram_bins);
    let app_start = Instant::now();

    for message in rx {
        let analysis = match message {
            ControlMessage::Tap { timestamp } => {
                tapper.add_tap(input::millis_since(app_start, timestamp))
            }
            ControlMessage::Reset => tapper.reset(),
            ControlMessage::Quit => break,
        };
        present(&analysis, &args, &config)?;
    }

    info!("stopped after {} taps", tapper.len());
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("loading config {DEFAULT_CONFIG_FILE}"))?
        }
        None => Config::default(),
    };

    if let Some(bins) = args.bins {
        config.histogram_bins = bins;
    }
    if args.no_chart {
        config.chart.show = false;
    }
    config.validate()?;
    Ok(config)
}

fn present(analysis: &Analysis, args: &Args, config: &Config) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(analysis)?);
    } else {
        let chart_height = config.chart.show.then_some(config.chart.height);
        print!("{}", display::render_analysis(analysis, chart_height));
    }
    Ok(())
}
