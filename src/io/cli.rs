//! Command-line interface for eddy track statistics, animations and rotary spectra

use crate::analysis::histogram::Histogram;
use crate::analysis::lifetime::{TrackSummary, summarize_tracks};
use crate::analysis::statistics::{Metric, describe, write_reports};
use crate::io::animation::TrackAnimation;
use crate::io::configuration::{
    DEFAULT_ANIMATION_PATH, DEFAULT_FIGURE_DIR, DEFAULT_HISTOGRAM_BINS, DEFAULT_LATITUDE,
    DEFAULT_MIN_LIFETIME, DEFAULT_PIXELS_PER_DEGREE, DEFAULT_SEGMENT_HOURS,
    DEFAULT_SEGMENT_OVERLAP, DEFAULT_SPECTRUM_PATH, DEFAULT_SUMMARY_PATH, DEFAULT_TIME_STEP_DAYS,
    DEFAULT_TRACKS_PATH, DEFAULT_TRAIL_LENGTH, DEFAULT_VELOCITY_PATH, GIF_FRAME_DELAY_MS,
    MAP_PADDING_DEGREES, NEAR_INERTIAL_BAND, SPECTRUM_TABLE_SUFFIX,
};
use crate::io::error::{Result, computation_error, invalid_data, invalid_parameter};
use crate::io::figures::{histogram_figure, spectrum_figure};
use crate::io::progress::Progress;
use crate::io::series::load_velocity_series;
use crate::io::tables::{write_histogram_table, write_spectrum_table, write_summaries};
use crate::math::coriolis::{
    effective_inertial_frequency_cpd, inertial_frequency_cpd, inertial_period_hours,
};
use crate::math::geodesy::GeoBounds;
use crate::math::spectrum::{SpectrumConfig, Taper, rotary_spectrum};
use crate::tracks::filter::{Partition, differentiate_eddies, filter_region};
use crate::tracks::gaps::FillMethod;
use crate::tracks::loader::load_tracks;
use crate::tracks::record::{EddyTrack, Polarity};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "eddytracks")]
#[command(
    author,
    version,
    about = "Eddy track statistics and rotary spectra for near-inertial wave studies"
)]
/// Command-line arguments shared by every analysis
pub struct Cli {
    /// Analysis to run
    #[command(subcommand)]
    pub command: Command,

    /// Only report errors, hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Regenerate outputs even if they exist
    #[arg(short, long, global = true)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available analyses, each producing one artifact
#[derive(Subcommand)]
pub enum Command {
    /// Per-track lifetime and propagation table plus population statistics
    Summary(SummaryArgs),
    /// Cyclone and anticyclone histograms of every track metric
    Histograms(HistogramArgs),
    /// Animated map of the eddy tracks
    Animate(AnimateArgs),
    /// Rotary spectrum of a velocity record
    Spectrum(SpectrumArgs),
}

/// Track table and the tracks kept from it
#[derive(Args, Clone)]
pub struct TrackSelection {
    /// Eddy track table (CSV)
    #[arg(value_name = "TRACKS", default_value = DEFAULT_TRACKS_PATH)]
    pub tracks: PathBuf,

    /// Minimum lifetime in time steps
    #[arg(short = 'l', long, default_value_t = DEFAULT_MIN_LIFETIME)]
    pub min_lifetime: i64,

    /// Rule used to fill missing time steps
    #[arg(short, long, value_enum, default_value_t = FillMethod::default())]
    pub fill: FillMethod,

    /// Duration of one time step in days
    #[arg(short, long, default_value_t = DEFAULT_TIME_STEP_DAYS)]
    pub time_step_days: f64,

    /// Keep tracks entering lon_min,lon_max,lat_min,lat_max
    #[arg(short, long, allow_hyphen_values = true)]
    pub bounds: Option<GeoBounds>,
}

/// Arguments of the `summary` command
#[derive(Args)]
pub struct SummaryArgs {
    /// Track selection
    #[command(flatten)]
    pub selection: TrackSelection,

    /// Per-track summary table
    #[arg(short, long, default_value = DEFAULT_SUMMARY_PATH)]
    pub output: PathBuf,
}

/// Arguments of the `histograms` command
#[derive(Args)]
pub struct HistogramArgs {
    /// Track selection
    #[command(flatten)]
    pub selection: TrackSelection,

    /// Directory receiving one figure and table per metric
    #[arg(short, long, default_value = DEFAULT_FIGURE_DIR)]
    pub output_dir: PathBuf,

    /// Number of bins shared by both populations
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,
}

/// Arguments of the `animate` command
#[derive(Args)]
pub struct AnimateArgs {
    /// Track selection
    #[command(flatten)]
    pub selection: TrackSelection,

    /// Animated GIF
    #[arg(short, long, default_value = DEFAULT_ANIMATION_PATH)]
    pub output: PathBuf,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = GIF_FRAME_DELAY_MS)]
    pub delay: u32,

    /// Past positions drawn behind each eddy
    #[arg(long, default_value_t = DEFAULT_TRAIL_LENGTH)]
    pub trail: usize,

    /// Map resolution in pixels per degree
    #[arg(long, default_value_t = DEFAULT_PIXELS_PER_DEGREE)]
    pub resolution: u32,
}

/// Arguments of the `spectrum` command
#[derive(Args)]
pub struct SpectrumArgs {
    /// Velocity record (CSV with time_hours, u, v)
    #[arg(value_name = "VELOCITY", default_value = DEFAULT_VELOCITY_PATH)]
    pub velocity: PathBuf,

    /// Spectrum figure, the table is written next to it
    #[arg(short, long, default_value = DEFAULT_SPECTRUM_PATH)]
    pub output: PathBuf,

    /// Latitude of the record in degrees north
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_LATITUDE)]
    pub latitude: f64,

    /// Rossby number of the eddy core, positive for cyclones
    #[arg(long, allow_hyphen_values = true)]
    pub rossby: Option<f64>,

    /// Segment length in hours
    #[arg(long, default_value_t = DEFAULT_SEGMENT_HOURS)]
    pub segment_hours: f64,

    /// Fraction of overlap between consecutive segments
    #[arg(long, default_value_t = DEFAULT_SEGMENT_OVERLAP)]
    pub overlap: f64,

    /// Window applied to each segment
    #[arg(long, value_enum, default_value_t = Taper::default())]
    pub taper: Taper,
}

/// Runs the parsed command and writes its artifacts
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command, writing reports to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if loading, analysis or export fails
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run the command, writing reports to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if loading, analysis or export fails
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let start_time = Instant::now();

        match &self.cli.command {
            Command::Summary(args) => self.summary(args, out)?,
            Command::Histograms(args) => self.histograms(args)?,
            Command::Animate(args) => self.animate(args)?,
            Command::Spectrum(args) => self.spectrum(args, out)?,
        }

        debug!(elapsed = ?start_time.elapsed(), "command finished");
        Ok(())
    }

    fn summary<W: Write>(&self, args: &SummaryArgs, out: &mut W) -> Result<()> {
        if !self.should_write(&[&args.output]) {
            return Ok(());
        }

        let tracks = load_tracks(&args.selection.tracks)?;
        let partition = select(&args.selection, &tracks);
        let summaries = summarize(&args.selection, &partition)?;

        write_summaries(&args.output, &summaries)?;
        info!(path = %args.output.display(), tracks = summaries.len(), "wrote track summaries");

        let reports: Vec<_> = Polarity::all()
            .into_iter()
            .map(|polarity| describe(&summaries, polarity))
            .collect();
        write_reports(&reports, out)?;
        Ok(())
    }

    fn histograms(&self, args: &HistogramArgs) -> Result<()> {
        let tracks = load_tracks(&args.selection.tracks)?;
        let partition = select(&args.selection, &tracks);
        let summaries = summarize(&args.selection, &partition)?;

        for metric in Metric::all() {
            let figure_path = args.output_dir.join(format!("{}.png", metric.file_stem()));
            let table_path = figure_path.with_extension("csv");
            if !self.should_write(&[&figure_path, &table_path]) {
                continue;
            }

            let cyclones = metric.values(&summaries, Polarity::Cyclonic);
            let anticyclones = metric.values(&summaries, Polarity::Anticyclonic);
            if cyclones.is_empty() && anticyclones.is_empty() {
                debug!(metric = metric.label(), "no values, histogram skipped");
                continue;
            }

            let histograms = Histogram::shared(&[&cyclones, &anticyclones], args.bins)?;
            let [cyclonic, anticyclonic] = histograms.as_slice() else {
                return Err(computation_error(
                    "histograms",
                    &format!("expected 2 histograms, got {}", histograms.len()),
                ));
            };

            histogram_figure(metric, cyclonic, anticyclonic)?.save_png(&figure_path)?;
            write_histogram_table(&table_path, cyclonic, anticyclonic)?;
            info!(
                metric = metric.label(),
                path = %figure_path.display(),
                cyclones = cyclonic.total(),
                anticyclones = anticyclonic.total(),
                "wrote histogram"
            );
        }
        Ok(())
    }

    fn animate(&self, args: &AnimateArgs) -> Result<()> {
        if !self.should_write(&[&args.output]) {
            return Ok(());
        }

        let tracks = load_tracks(&args.selection.tracks)?;
        let partition = select(&args.selection, &tracks);

        let bounds = match args.selection.bounds {
            Some(bounds) => bounds,
            None => GeoBounds::enclosing(
                partition
                    .all()
                    .flat_map(|track| track.observations.iter().map(|obs| (obs.lon, obs.lat))),
                MAP_PADDING_DEGREES,
            )
            .ok_or_else(|| invalid_data(&"no tracks left to animate"))?,
        };

        let animation = TrackAnimation::new(
            partition.all(),
            args.selection.fill,
            bounds,
            args.resolution,
            args.trail,
        )?;
        let progress = Progress::new(
            "Rendering frames",
            animation.drawn_steps(args.delay).len(),
            self.cli.should_show_progress(),
        );
        animation.export_gif(&args.output, args.delay, &progress)
    }

    fn spectrum<W: Write>(&self, args: &SpectrumArgs, out: &mut W) -> Result<()> {
        if !(-90.0..=90.0).contains(&args.latitude) {
            return Err(invalid_parameter(
                "latitude",
                &args.latitude,
                &"must lie in [-90, 90]",
            ));
        }
        if let Some(rossby) = args.rossby {
            if !rossby.is_finite() {
                return Err(invalid_parameter("rossby", &rossby, &"must be finite"));
            }
            if rossby <= -1.0 {
                warn!(
                    rossby,
                    "Rossby number at or below -1 gives a non-positive effective inertial frequency"
                );
            }
        }
        let table_path = spectrum_table_path(&args.output);
        if !self.should_write(&[&args.output, &table_path]) {
            return Ok(());
        }

        let series = load_velocity_series(&args.velocity)?;
        let dt_hours = series.sample_interval_hours()?;
        let mut config =
            SpectrumConfig::from_hours(args.segment_hours, dt_hours, args.overlap, args.taper)?;
        if config.segment_len > series.len() {
            warn!(
                requested = config.segment_len,
                available = series.len(),
                "segment longer than the record, using the whole record"
            );
            config.segment_len = series.len();
        }

        let spectrum = rotary_spectrum(&series.u, &series.v, dt_hours, &config)?;

        let inertial = inertial_frequency_cpd(args.latitude);
        let effective = args
            .rossby
            .map(|rossby| effective_inertial_frequency_cpd(args.latitude, rossby));
        let markers: Vec<f64> = std::iter::once(inertial).chain(effective).collect();

        write_spectrum_table(&table_path, &spectrum)?;
        spectrum_figure(&spectrum, &markers)?.save_png(&args.output)?;
        info!(
            figure = %args.output.display(),
            table = %table_path.display(),
            segments = spectrum.segments,
            "wrote rotary spectrum"
        );

        writeln!(
            out,
            "inertial frequency: {inertial:.4} cpd (period {:.2} h)",
            inertial_period_hours(args.latitude)
        )?;
        if let Some(effective) = effective {
            writeln!(out, "effective inertial frequency: {effective:.4} cpd")?;
        }
        let band = spectrum.band_energy(effective.unwrap_or(inertial), NEAR_INERTIAL_BAND);
        writeln!(
            out,
            "near-inertial band energy: clockwise {:.4e}, counter-clockwise {:.4e} (m/s)^2",
            band.clockwise, band.counterclockwise
        )?;
        writeln!(out, "rotary coefficient: {:.3}", band.rotary_coefficient())?;
        if let Some((frequency, density)) = spectrum.clockwise_peak() {
            writeln!(
                out,
                "clockwise peak: {frequency:.4} cpd ({density:.4e} (m/s)^2/cpd)"
            )?;
        }
        writeln!(out, "total variance: {:.4e} (m/s)^2", spectrum.total_variance())?;
        Ok(())
    }

    // Outputs are skipped only when every one of them already exists
    fn should_write(&self, output_paths: &[&Path]) -> bool {
        if self.cli.skip_existing() && output_paths.iter().all(|path| path.exists()) {
            for path in output_paths {
                info!(path = %path.display(), "skipping, output exists");
            }
            false
        } else {
            true
        }
    }
}

/// Table written next to a spectrum figure: `<stem>_table.csv`
pub fn spectrum_table_path(figure_path: &Path) -> PathBuf {
    let stem = figure_path.file_stem().unwrap_or_default();
    let table_name = format!("{}{SPECTRUM_TABLE_SUFFIX}.csv", stem.to_string_lossy());

    if let Some(parent) = figure_path.parent() {
        parent.join(table_name)
    } else {
        PathBuf::from(table_name)
    }
}

fn select<'a>(selection: &TrackSelection, tracks: &'a [EddyTrack]) -> Partition<'a> {
    let partition = match &selection.bounds {
        Some(bounds) => differentiate_eddies(filter_region(tracks, bounds), selection.min_lifetime),
        None => differentiate_eddies(tracks, selection.min_lifetime),
    };
    info!(
        cyclones = partition.cyclones.len(),
        anticyclones = partition.anticyclones.len(),
        min_lifetime = selection.min_lifetime,
        "selected tracks"
    );
    partition
}

fn summarize(selection: &TrackSelection, partition: &Partition<'_>) -> Result<Vec<TrackSummary>> {
    summarize_tracks(partition.all(), selection.fill, selection.time_step_days)
}
