use log::trace;

use crate::{
    colour,
    escape::escape_count,
    framebuffer::Canvas,
    pixel::Complex,
    scale::scale,
    screen,
    view::ViewState,
};

/**
Draws one full frame of the set onto `canvas`.

Both axes span `[-2 / zoom, 2 / zoom]` whatever the window's aspect ratio, then
shift by the view's pan offsets. Every pixel is recomputed on every call.

`size` is in logical pixels, so HiDPI screens sample the plane as densely as
any other.

A one-pixel axis maps through a degenerate range, so its coordinate is `NaN`.
*/
pub fn render_frame(canvas: &mut impl Canvas, size: screen::Size, view: &ViewState) {
    trace!("begin render_frame {:?}", size);

    let extent = 2.0 / view.zoom;
    let last_column = f64::from(size.width) - 1.0;
    let last_row = f64::from(size.height) - 1.0;

    for a in 0..size.width {
        for b in 0..size.height {
            let point = Complex {
                real: scale(f64::from(a), 0.0, last_column, -extent, extent) + view.x_mov,
                imaginary: scale(f64::from(b), 0.0, last_row, -extent, extent) + view.y_mov,
            };
            canvas.draw_point(a, b, colour::colour(escape_count(point)));
        }
    }

    trace!("end render_frame");
}
