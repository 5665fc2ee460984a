use clap::Parser;
use std::path::PathBuf;
use wayrender::{ImageFormat, LineLayer, DEFAULT_MITER_LIMIT};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// GeoJSON files with planar coordinates; each is rendered in its own pass.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the rendered images.
    #[arg(long, env = "WAYRENDER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format.
    #[arg(long, env = "WAYRENDER_FORMAT", value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// Image width in logical pixels.
    #[arg(long, env = "WAYRENDER_WIDTH", default_value_t = 1024)]
    pub width: u32,

    /// Image height in logical pixels.
    #[arg(long, env = "WAYRENDER_HEIGHT", default_value_t = 1024)]
    pub height: u32,

    /// Device pixels per logical pixel.
    #[arg(long, env = "WAYRENDER_SCALE", default_value_t = 1.0)]
    pub scale: f64,

    /// Style layers as OFFSET:WIDTH:#RRGGBB[:FLAGS][:DASH]; defaults to a cased road.
    #[arg(long = "layer", env = "WAYRENDER_LAYERS", value_delimiter = ';')]
    pub layers: Vec<LineLayer>,

    /// Longest corner miter, in multiples of the offset, before bevelling.
    #[arg(long, env = "WAYRENDER_MITER_LIMIT", default_value_t = DEFAULT_MITER_LIMIT)]
    pub miter_limit: f64,

    /// Number of passes rendered at once.
    #[arg(long, env = "WAYRENDER_WORKER_COUNT", default_value_t = 4)]
    pub worker_count: usize,

    /// Start a Tracy profiler client.
    #[arg(long, env = "WAYRENDER_PROFILE")]
    pub profile: bool,
}
