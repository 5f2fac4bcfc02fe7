//! Map widget drawing hex sprites on a Braille canvas.
//!
//! Sprite coordinates are pixel space with `y` growing downwards; the canvas
//! grows upwards, so every `y` is negated on the way in.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Context, Line as Segment},
    },
};
use replay_core::{EntityCategory, HexBounds, HexCoord, Layout, Point};
use viewer_core::{FrameView, PresentationMapper, Sprite};

use crate::presentation::theme::{CURSOR_COLOR, PATH_COLOR};

/// Canvas units covered by one terminal column.
const UNITS_PER_COLUMN: f64 = 5.0;
/// Canvas units covered by one terminal row (cells are about twice as tall).
const UNITS_PER_ROW: f64 = 10.0;
/// Concentric outlines used to fill a hexagon.
const FILL_RINGS: usize = 5;
const BADGE_SCALE: f64 = 0.25;

pub struct MapContext<'a> {
    pub view: Option<&'a FrameView>,
    /// Zoomed and panned layout the sprites were projected with.
    pub layout: Layout,
    /// Zoomed layout without pan, used to center the map.
    pub anchor: Layout,
    pub cursor: Option<HexCoord>,
    pub show_tile_labels: bool,
}

pub fn render<T>(frame: &mut Frame, area: Rect, ctx: MapContext<'_>, theme: &T)
where
    T: PresentationMapper<Color = Color, Style = Style>,
{
    let Some(view) = ctx.view else {
        let paragraph = Paragraph::new("No replay loaded. Press [o] to open a database.")
            .block(Block::default().borders(Borders::ALL).title("Map"));
        frame.render_widget(paragraph, area);
        return;
    };

    let title = match view.bounds {
        Some(bounds) => format!("Map ({}×{})", bounds.columns(), bounds.rows()),
        None => "Map (empty)".to_string(),
    };
    let (x_bounds, y_bounds) = window(&ctx.anchor, view.bounds, area);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|painter| {
            paint_sprites(painter, &ctx, view, theme);
            painter.layer();
            for sprite in &view.sprites {
                trace(painter, &sprite.path, PATH_COLOR);
            }
            if let Some(cursor) = ctx.cursor {
                outline(painter, &ctx.layout.corners(cursor, 1.0), CURSOR_COLOR);
            }
            for sprite in &view.sprites {
                print_label(painter, &ctx, sprite, theme);
            }
        });

    frame.render_widget(canvas, area);
}

/// Canvas `x` and `y` ranges that center `bounds` in `area`.
fn window(anchor: &Layout, bounds: Option<HexBounds>, area: Rect) -> ([f64; 2], [f64; 2]) {
    let center = bounds.map_or(anchor.origin, |b| {
        let extremes = [
            HexCoord::new(b.min_q, b.min_r),
            HexCoord::new(b.max_q, b.max_r),
            HexCoord::new(b.min_q, b.max_r),
            HexCoord::new(b.max_q, b.min_r),
        ]
        .map(|cell| anchor.hex_to_pixel(cell));
        let (min_x, max_x) = extremes
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        let (min_y, max_y) = extremes
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
    });

    let half_width = f64::from(area.width.saturating_sub(2).max(1)) * UNITS_PER_COLUMN / 2.0;
    let half_height = f64::from(area.height.saturating_sub(2).max(1)) * UNITS_PER_ROW / 2.0;
    (
        [center.x - half_width, center.x + half_width],
        [-center.y - half_height, -center.y + half_height],
    )
}

/// Fills sprites back to front, one canvas layer per category.
fn paint_sprites<T>(painter: &mut Context<'_>, ctx: &MapContext<'_>, view: &FrameView, theme: &T)
where
    T: PresentationMapper<Color = Color, Style = Style>,
{
    let mut current: Option<EntityCategory> = None;
    for sprite in &view.sprites {
        if current.is_some_and(|kind| kind != sprite.kind) {
            painter.layer();
        }
        current = Some(sprite.kind);

        let corners = ctx.layout.corners(sprite.coord, sprite.scale);
        fill(painter, corners, theme.fill(sprite.color));

        if let Some((food, _)) = sprite.badge {
            let offset = ctx.layout.size * (sprite.scale - BADGE_SCALE);
            let corners = ctx
                .layout
                .corners(sprite.coord, BADGE_SCALE)
                .map(|p| Point::new(p.x + offset, p.y - offset));
            fill(painter, corners, theme.fill(food));
        }
    }
}

fn print_label<T>(painter: &mut Context<'_>, ctx: &MapContext<'_>, sprite: &Sprite, theme: &T)
where
    T: PresentationMapper<Color = Color, Style = Style>,
{
    let text = match (&sprite.label, sprite.kind) {
        (Some(label), _) => label.clone(),
        (None, EntityCategory::Tile) if ctx.show_tile_labels => sprite.coord.to_string(),
        _ => return,
    };
    let x = sprite.center.x - text.chars().count() as f64 * UNITS_PER_COLUMN / 2.0;
    let style = Style::default().fg(theme.text(sprite.color));
    painter.print(x, -sprite.center.y, Span::styled(text, style));
}

/// Shrinking outlines from the full hexagon towards its center.
fn fill(painter: &mut Context<'_>, corners: [Point; 6], color: Color) {
    let center = Point::new(
        corners.iter().map(|p| p.x).sum::<f64>() / 6.0,
        corners.iter().map(|p| p.y).sum::<f64>() / 6.0,
    );
    for ring in 0..FILL_RINGS {
        let t = 1.0 - ring as f64 / FILL_RINGS as f64;
        let scaled = corners.map(|p| {
            Point::new(
                center.x + (p.x - center.x) * t,
                center.y + (p.y - center.y) * t,
            )
        });
        outline(painter, &scaled, color);
    }
}

fn outline(painter: &mut Context<'_>, corners: &[Point; 6], color: Color) {
    for (i, from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        painter.draw(&Segment::new(from.x, -from.y, to.x, -to.y, color));
    }
}

fn trace(painter: &mut Context<'_>, path: &[Point], color: Color) {
    for step in path.windows(2) {
        painter.draw(&Segment::new(
            step[0].x, -step[0].y, step[1].x, -step[1].y, color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_centers_bounds() {
        let anchor = Layout::flat(10.0);
        let bounds = HexBounds::from_cells([HexCoord::new(0, 0), HexCoord::new(2, 0)]);
        let area = Rect::new(0, 0, 42, 22);
        let ([x0, x1], [y0, y1]) = window(&anchor, bounds, area);

        let right = anchor.hex_to_pixel(HexCoord::new(2, 0));
        assert!(((x0 + x1) / 2.0 - right.x / 2.0).abs() < 1e-9);
        assert!((x1 - x0 - 40.0 * UNITS_PER_COLUMN).abs() < 1e-9);
        assert!((y1 - y0 - 20.0 * UNITS_PER_ROW).abs() < 1e-9);
    }

    #[test]
    fn empty_map_centers_on_origin() {
        let anchor = Layout::flat(10.0).with_origin(Point::new(30.0, 15.0));
        let ([x0, x1], [y0, y1]) = window(&anchor, None, Rect::new(0, 0, 12, 12));
        assert!(((x0 + x1) / 2.0 - 30.0).abs() < 1e-9);
        assert!(((y0 + y1) / 2.0 + 15.0).abs() < 1e-9);
    }
}
