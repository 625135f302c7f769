//! Physical constants and runtime configuration defaults

// Input locations used when no path is given on the command line
/// Eddy track table exported from the AMEDA `eddy_tracks` structure
pub const DEFAULT_TRACKS_PATH: &str = "eddy_tracks.csv";
/// Velocity record at a single point used for the rotary spectrum
pub const DEFAULT_VELOCITY_PATH: &str = "velocity_series.csv";

// Output locations
/// Per-track summary table
pub const DEFAULT_SUMMARY_PATH: &str = "eddy_summary.csv";
/// Directory receiving one histogram figure and table per metric
pub const DEFAULT_FIGURE_DIR: &str = "figures";
/// Track animation
pub const DEFAULT_ANIMATION_PATH: &str = "eddy_tracks.gif";
/// Rotary spectrum figure
pub const DEFAULT_SPECTRUM_PATH: &str = "rotary_spectrum.png";
/// Suffix appended to the spectrum figure stem for its table
pub const SPECTRUM_TABLE_SUFFIX: &str = "_table";

// Physical constants
/// Radius of Earth used by the haversine formula (km)
pub const EARTH_RADIUS_KM: f64 = 6373.0;
/// Kilometres spanned by one degree of latitude
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
/// Angular rotation rate of Earth (rad/s)
pub const EARTH_ROTATION_RATE: f64 = 7.2921e-5;
/// Seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;

// Track selection defaults
/// Minimum lifetime in time steps, zero keeps every track
pub const DEFAULT_MIN_LIFETIME: i64 = 0;
/// Duration of one AMEDA time step (days)
pub const DEFAULT_TIME_STEP_DAYS: f64 = 1.0;

// Spectral analysis defaults
/// Reference latitude of the northwestern Mediterranean mooring sites
pub const DEFAULT_LATITUDE: f64 = 42.0;
/// Segment length for spectral averaging (hours)
pub const DEFAULT_SEGMENT_HOURS: f64 = 240.0;
/// Fractional overlap between consecutive segments
pub const DEFAULT_SEGMENT_OVERLAP: f64 = 0.5;
/// Half width of the near-inertial band as a fraction of its centre frequency
pub const NEAR_INERTIAL_BAND: f64 = 0.2;
/// Relative tolerance when checking that a record is evenly sampled
pub const SAMPLING_TOLERANCE: f64 = 1e-6;

// Histogram defaults
/// Number of bins shared by cyclone and anticyclone histograms
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

// Animation defaults
/// Number of past positions drawn behind each eddy
pub const DEFAULT_TRAIL_LENGTH: usize = 10;
/// Map resolution in pixels per degree
pub const DEFAULT_PIXELS_PER_DEGREE: u32 = 80;
/// Padding around the tracks when the map extent is derived from the data (degrees)
pub const MAP_PADDING_DEGREES: f64 = 0.5;
/// Largest map side in pixels
pub const MAX_MAP_DIMENSION: u32 = 4_000;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 100;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 20;

// Figure layout
/// Figure width in pixels
pub const FIGURE_WIDTH: u32 = 800;
/// Figure height in pixels
pub const FIGURE_HEIGHT: u32 = 500;
/// Margin between the figure border and the plot area
pub const FIGURE_MARGIN: u32 = 50;
/// Length of axis tick marks
pub const TICK_LENGTH: u32 = 6;
/// Number of ticks along each linear axis
pub const LINEAR_TICKS: usize = 5;
/// Gap between tick marks, labels and titles
pub const LABEL_GAP: u32 = 3;
/// Space between consecutive legend entries
pub const LEGEND_SPACING: u32 = 12;

// Colours
/// Figure background
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Map background for animations
pub const SEA_COLOR: [u8; 4] = [236, 242, 248, 255];
/// Axes and tick marks
pub const AXIS_COLOR: [u8; 4] = [40, 40, 40, 255];
/// Cyclonic eddies
pub const CYCLONE_COLOR: [u8; 4] = [33, 102, 172, 255];
/// Anticyclonic eddies
pub const ANTICYCLONE_COLOR: [u8; 4] = [178, 24, 43, 255];
/// Clockwise spectral branch
pub const CLOCKWISE_COLOR: [u8; 4] = [178, 24, 43, 255];
/// Counter-clockwise spectral branch
pub const COUNTERCLOCKWISE_COLOR: [u8; 4] = [33, 102, 172, 255];
/// Inertial frequency markers
pub const MARKER_COLOR: [u8; 4] = [90, 90, 90, 255];

// Progress display
/// Loops shorter than this run without a progress bar
pub const MIN_PROGRESS_ITEMS: usize = 50;
