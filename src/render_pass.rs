use crate::{
    colors::ContextExt,
    coord_buffer::{CoordBuffer, CoordRange},
    draw::{
        offset_line::{generate_parallel_way_with, JoinOptions},
        path_geom::path_range,
    },
    drawable::Drawable,
    style::LineLayer,
};
use cairo::Context;
use std::f64::consts::TAU;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
    /// Buffer length when the pass finished.
    pub coords: usize,
}

pub struct RenderPass<'a> {
    context: &'a Context,
    buffer: &'a mut CoordBuffer,
    join_options: JoinOptions,
    stats: RenderStats,
}

impl<'a> RenderPass<'a> {
    /// Starts a pass; `buffer` is reset first.
    pub fn new(context: &'a Context, buffer: &'a mut CoordBuffer, join_options: JoinOptions) -> Self {
        buffer.reset();

        Self {
            context,
            buffer,
            join_options,
            stats: RenderStats::default(),
        }
    }

    /// Draws `drawables` in ascending layer order, keeping input order within
    /// a layer.
    pub fn draw_all(&mut self, drawables: &[Drawable], layers: &[LineLayer]) -> cairo::Result<()> {
        let _span = profile_span!("render_pass::draw_all");

        let mut order: Vec<&Drawable> = drawables.iter().collect();

        order.sort_by_key(|drawable| drawable.layer());

        for drawable in order {
            self.draw(drawable, layers)?;
        }

        Ok(())
    }

    pub fn draw(&mut self, drawable: &Drawable, layers: &[LineLayer]) -> cairo::Result<()> {
        let Some(source) = drawable.push_to(self.buffer) else {
            return Ok(());
        };

        // offsetting a ring needs the closing corner joined too, so repeat the
        // second point right behind it
        let offset_source = match drawable {
            Drawable::Area { ring, .. } if ring.0.len() >= 3 => {
                self.buffer.push(ring.0[1]);

                CoordRange::new(source.from, source.to + 1)
            }
            _ => source,
        };

        for layer in layers.iter().filter(|layer| layer.applies_to(drawable)) {
            let range = if layer.offset == 0.0 {
                source
            } else {
                match generate_parallel_way_with(
                    self.buffer,
                    offset_source.from,
                    offset_source.to,
                    layer.offset,
                    &self.join_options,
                ) {
                    // the first and last points of an offset ring sit on the
                    // unjoined ends of its first edge, which close_path redraws
                    Ok(range) if offset_source != source => {
                        CoordRange::new(range.from + 1, range.to - 1)
                    }
                    Ok(range) => range,
                    Err(err) => {
                        log::debug!(
                            "skipping {} px layer of {}: {err}",
                            layer.offset,
                            drawable.attributes().kind
                        );

                        self.stats.skipped += 1;

                        continue;
                    }
                }
            };

            self.stroke(drawable, layer, range)?;

            self.stats.drawn += 1;
        }

        Ok(())
    }

    fn stroke(&self, drawable: &Drawable, layer: &LineLayer, range: CoordRange) -> cairo::Result<()> {
        let context = self.context;

        context.set_source_color(layer.color);

        if let Drawable::Node { .. } = drawable {
            let center = self.buffer.at(range.from);

            context.new_path();
            context.arc(center.x, center.y, layer.width / 2.0, 0.0, TAU);

            return context.fill();
        }

        context.set_line_width(layer.width);
        context.set_dash(&layer.dash, 0.0);
        context.set_line_join(cairo::LineJoin::Round);
        context.set_line_cap(cairo::LineCap::Butt);

        context.new_path();

        path_range(context, &*self.buffer, range, drawable.is_closed());

        context.stroke()
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats {
            coords: self.buffer.len(),
            ..self.stats
        }
    }

    /// Ends the pass and resets the buffer for the next one.
    pub fn finish(self) -> RenderStats {
        let stats = self.stats();

        self.buffer.reset();

        log::debug!(
            "pass finished: {} strokes, {} skipped, {} coords",
            stats.drawn,
            stats.skipped,
            stats.coords
        );

        stats
    }
}
