use crate::{
    bounding_box::BoundingBox,
    colors::ContextExt,
    coord_buffer::CoordBuffer,
    coord_buffer_pool::CoordBufferPool,
    drawable::Drawable,
    image_format::ImageFormat,
    projectable::{TileProjectable, TileProjector},
    render_pass::{RenderPass, RenderStats},
    render_request::RenderRequest,
    style::LineLayer,
};
use cairo::{Context, Format, ImageSurface, Surface, SvgSurface};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    CairoError(#[from] cairo::Error),

    #[error("Error writing image: {0}")]
    IoError(#[from] cairo::IoError),

    #[error("Error finishing output stream: {0}")]
    StreamError(String),
}

#[derive(Debug)]
pub struct RenderedMap {
    pub content_type: &'static str,
    pub image: Vec<u8>,
    pub stats: RenderStats,
}

/// Renders `drawables` fitted into the requested size. The coordinate buffer
/// for the pass is taken from `pool` and given back when done.
pub fn render(
    request: &RenderRequest,
    drawables: &[Drawable],
    layers: &[LineLayer],
    pool: &CoordBufferPool,
) -> Result<RenderedMap, RenderError> {
    let _span = profile_span!("render");

    let bbox = BoundingBox::from_coords(drawables.iter().flat_map(Drawable::coords));

    let projected: Vec<Drawable> = if bbox.is_empty() {
        Vec::new()
    } else {
        let projector = TileProjector::fit(&bbox, request.size, request.padding);

        drawables
            .iter()
            .map(|drawable| drawable.project_to_tile(&projector))
            .collect()
    };

    let mut buffer = pool.acquire();

    let pixels = request.size.scaled(request.scale);

    let (image, stats) = match request.format {
        ImageFormat::Svg => {
            let surface = SvgSurface::for_stream(pixels.width as f64, pixels.height as f64, Vec::new())?;

            let stats = draw(&surface, request, &projected, layers, &mut buffer)?;

            let image = surface
                .finish_output_stream()
                .map_err(|err| RenderError::StreamError(err.to_string()))?
                .downcast::<Vec<u8>>()
                .map_err(|_| RenderError::StreamError("unexpected stream type".into()))?;

            (*image, stats)
        }
        ImageFormat::Png => {
            let surface = ImageSurface::create(Format::ARgb32, pixels.width, pixels.height)?;

            let stats = draw(&surface, request, &projected, layers, &mut buffer)?;

            let _span = profile_span!("render::write_to_png");

            let mut image = Vec::new();

            surface.write_to_png(&mut image)?;

            (image, stats)
        }
    };

    log::info!(
        "rendered {} features: {} strokes, {} layers skipped, {} coords",
        drawables.len(),
        stats.drawn,
        stats.skipped,
        stats.coords
    );

    Ok(RenderedMap {
        content_type: request.format.content_type(),
        image,
        stats,
    })
}

fn draw(
    surface: &Surface,
    request: &RenderRequest,
    drawables: &[Drawable],
    layers: &[LineLayer],
    buffer: &mut CoordBuffer,
) -> Result<RenderStats, RenderError> {
    let context = Context::new(surface)?;

    context.scale(request.scale, request.scale);

    context.set_source_color(request.background);

    context.paint()?;

    let mut pass = RenderPass::new(&context, buffer, request.join_options);

    pass.draw_all(drawables, layers)?;

    Ok(pass.finish())
}
