/// Opens a Tracy zone when a profiler client is running.
macro_rules! profile_span {
    ($name:literal) => {
        tracy_client::Client::running()
            .map(|client| client.span(tracy_client::span_location!($name), 0))
    };
}

pub mod bounding_box;
pub mod colors;
pub mod coord_buffer;
pub mod coord_buffer_pool;
pub mod draw;
pub mod drawable;
pub mod geojson_utils;
pub mod image_format;
pub mod projectable;
pub mod render;
pub mod render_pass;
pub mod render_request;
pub mod size;
pub mod style;

pub use coord_buffer::{CoordBuffer, CoordRange};
pub use coord_buffer_pool::{CoordBufferPool, PooledCoordBuffer};
pub use draw::offset_line::{
    generate_parallel_way, generate_parallel_way_with, JoinOptions, ParallelWayError,
    DEFAULT_MITER_LIMIT,
};
pub use drawable::{Drawable, SegmentAttributes, SegmentFlags};
pub use geojson_utils::{load_drawables_from_geojson, parse_drawables, GeoJsonLoadError};
pub use image_format::ImageFormat;
pub use render::{render, RenderError, RenderedMap};
pub use render_pass::{RenderPass, RenderStats};
pub use render_request::RenderRequest;
pub use style::{LineLayer, StyleParseError};
