use std::time::Duration;

use shimmerconfig::Rgba;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

use crate::canvas::skia_color;
use crate::RenderError;

/// Text lines the avatar column is sized against.
const PATTERN_LINES: u32 = 3;

/// Sweep time granted to each placeholder row.
const MILLIS_PER_ITEM: u64 = 1000;

/// Density-independent pixels to physical pixels, rounded half up.
pub fn dp(value: f32, density: f32) -> i32 {
    (value * density + 0.5) as i32
}

/// Physical sizes of the placeholder pieces at one display density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonMetrics {
    pub spacing: f32,
    pub line_height: f32,
    pub image_size: f32,
    pub corner_radius: f32,
}

impl SkeletonMetrics {
    pub fn for_density(density: f32) -> Self {
        Self {
            spacing: dp(8.0, density) as f32,
            line_height: dp(15.0, density) as f32,
            image_size: dp(68.0, density) as f32,
            corner_radius: dp(2.0, density) as f32,
        }
    }

    /// Height of one placeholder row.
    pub fn row_height(&self) -> f32 {
        let lines = PATTERN_LINES as f32;
        let with_image = self.image_size + self.spacing * 2.0;
        let with_lines = lines * self.line_height + self.spacing * (lines + 1.0);
        with_image.max(with_lines).trunc()
    }
}

/// Grey ramp from the darkest (`1`) to the lightest shade.
fn palette(step: i32) -> Rgba {
    let argb = match step {
        1 => 0xFF9E_9E9E,
        2 => 0xFFBD_BDBD,
        3 => 0xFFE0_E0E0,
        4 => 0xFFEE_EEEE,
        5 => 0xFFF5_F5F5,
        _ => 0xFFFA_FAFA,
    };
    Rgba::from_argb(argb)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonRow {
    pub top: f32,
    pub color: Rgba,
}

/// List-shaped loading placeholder: avatar, title, timestamp and two text
/// lines per row, rows stacked until the surface is full.
#[derive(Debug, Clone)]
pub struct SkeletonList {
    width: u32,
    height: u32,
    metrics: SkeletonMetrics,
    rows: Vec<SkeletonRow>,
    item_count: u32,
    reveal_fraction: f32,
}

impl SkeletonList {
    pub fn layout(width: u32, height: u32, density: f32) -> Self {
        let metrics = SkeletonMetrics::for_density(density);
        let row_height = metrics.row_height();
        let pitch = row_height + metrics.spacing;
        let surface_height = height as f32;
        let stacked = pitch > 0.0;

        let mut rows = Vec::new();
        let mut top = 0.0;
        let mut estimate: i32 = 1;
        let mut index: i32 = 1;
        if stacked {
            loop {
                // Rows fade lighter the further down the list they sit.
                let step = if estimate == 1 {
                    1
                } else {
                    (1.0 + f64::from(index - 1) * 5.0 / f64::from(estimate)) as i32
                };
                rows.push(SkeletonRow {
                    top,
                    color: palette(step),
                });
                index += 1;
                estimate = (surface_height / pitch).trunc() as i32;
                top += pitch;
                if top + row_height >= surface_height {
                    break;
                }
            }
        } else {
            tracing::warn!(density, "skeleton metrics collapse to zero; laying out a single row");
            rows.push(SkeletonRow {
                top,
                color: palette(1),
            });
        }

        let item_count = estimate.max(1) as u32;
        let reveal_fraction = if height == 0 || !stacked {
            1.0
        } else {
            (pitch * item_count as f32 / surface_height).min(1.0)
        };
        tracing::debug!(
            width,
            height,
            rows = rows.len(),
            item_count,
            reveal_fraction,
            "laid out skeleton list"
        );

        Self {
            width,
            height,
            metrics,
            rows,
            item_count,
            reveal_fraction,
        }
    }

    pub fn rows(&self) -> &[SkeletonRow] {
        &self.rows
    }

    pub fn metrics(&self) -> SkeletonMetrics {
        self.metrics
    }

    /// Rows that fit entirely on the surface, at least one.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Share of the surface height occupied by the counted rows.
    pub fn reveal_fraction(&self) -> f32 {
        self.reveal_fraction
    }

    /// Sweep duration that gives every row the same time under the highlight.
    pub fn cycle_duration(&self) -> Duration {
        Duration::from_millis(MILLIS_PER_ITEM * u64::from(self.item_count))
    }

    /// Paints the rows onto a transparent pixmap of the list's size.
    pub fn rasterize(&self) -> Result<Pixmap, RenderError> {
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(RenderError::SurfaceAllocation {
                width: self.width,
                height: self.height,
            })?;
        for row in &self.rows {
            self.paint_row(&mut pixmap, row);
        }
        Ok(pixmap)
    }

    fn paint_row(&self, pixmap: &mut Pixmap, row: &SkeletonRow) {
        let m = self.metrics;
        let width = self.width as f32;
        let translate = Transform::from_translate(0.0, row.top);

        let mut card = Paint::default();
        card.set_color(skia_color(Rgba::WHITE));
        let mut placeholder = Paint::default();
        placeholder.set_color(skia_color(row.color));

        let mut fill = |rect: Option<Rect>, paint: &Paint<'static>| {
            fill_rounded(pixmap, rect, m.corner_radius, paint, translate);
        };

        fill(
            Rect::from_ltrb(0.0, 0.0, width, m.row_height()),
            &card,
        );

        let avatar = Rect::from_ltrb(
            m.spacing,
            m.spacing,
            m.spacing + m.image_size,
            m.spacing + m.image_size,
        );
        fill(avatar, &placeholder);

        let text_left = m.spacing + m.image_size + m.spacing;
        let text_right = width - m.spacing;
        let text_width = text_right - text_left;

        let title_width = text_width * 0.5;
        fill(
            Rect::from_ltrb(
                text_left,
                m.spacing,
                text_left + title_width,
                m.spacing + m.line_height,
            ),
            &placeholder,
        );

        let time_width = text_width * 0.2;
        fill(
            Rect::from_ltrb(
                text_right - time_width,
                m.spacing,
                text_right,
                m.spacing + m.line_height,
            ),
            &placeholder,
        );

        let mut bottom = m.spacing + m.line_height;
        for _ in 0..2 {
            let line_top = bottom + m.spacing;
            bottom = line_top + m.line_height;
            fill(
                Rect::from_ltrb(text_left, line_top, text_right, bottom),
                &placeholder,
            );
        }
    }
}

fn fill_rounded(
    pixmap: &mut Pixmap,
    rect: Option<Rect>,
    radius: f32,
    paint: &Paint<'_>,
    transform: Transform,
) {
    if let Some(path) = rect.and_then(|rect| rounded_rect(rect, radius)) {
        pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
    }
}

fn rounded_rect(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.quad_to(rt, t, rt, t + r);
    pb.line_to(rt, b - r);
    pb.quad_to(rt, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.quad_to(l, b, l, b - r);
    pb.line_to(l, t + r);
    pb.quad_to(l, t, l + r, t);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_rounds_half_up() {
        assert_eq!(dp(8.0, 1.0), 8);
        assert_eq!(dp(15.0, 1.5), 23);
        assert_eq!(dp(2.0, 2.75), 6);
    }

    #[test]
    fn row_height_follows_the_avatar() {
        let metrics = SkeletonMetrics::for_density(1.0);
        assert_eq!(metrics.row_height(), 84.0);
        let dense = SkeletonMetrics::for_density(2.0);
        assert_eq!(dense.row_height(), 168.0);
    }

    #[test]
    fn rows_fill_the_surface() {
        // pitch 92: rows at 0, 92, 184, 276; the fifth would overflow 400.
        let list = SkeletonList::layout(360, 400, 1.0);
        let tops: Vec<f32> = list.rows().iter().map(|row| row.top).collect();
        assert_eq!(tops, vec![0.0, 92.0, 184.0, 276.0]);
        assert_eq!(list.item_count(), 4);
        assert!((list.reveal_fraction() - 0.92).abs() < 1e-6);
        assert_eq!(list.cycle_duration(), Duration::from_millis(4000));
    }

    #[test]
    fn earlier_rows_are_darker() {
        let list = SkeletonList::layout(360, 400, 1.0);
        let rows = list.rows();
        assert_eq!(rows[0].color, Rgba::from_argb(0xFF9E_9E9E));
        for pair in rows.windows(2) {
            assert!(pair[0].color.r <= pair[1].color.r);
        }
    }

    #[test]
    fn tiny_surface_still_counts_one_item() {
        let list = SkeletonList::layout(100, 40, 1.0);
        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.item_count(), 1);
    }

    #[test]
    fn collapsed_density_lays_out_one_row() {
        let metrics = SkeletonMetrics::for_density(0.001);
        assert_eq!(metrics.row_height(), 0.0);

        let list = SkeletonList::layout(360, 640, 0.001);
        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.item_count(), 1);
        assert_eq!(list.reveal_fraction(), 1.0);
    }

    #[test]
    fn rasterize_paints_avatar_and_card() {
        let list = SkeletonList::layout(200, 100, 1.0);
        let pixmap = list.rasterize().expect("pixmap");
        let avatar = pixmap.pixel(40, 40).expect("pixel");
        assert_eq!(avatar.alpha(), 255);
        assert_eq!(avatar.red(), 0x9E);
        let card = pixmap.pixel(190, 80).expect("pixel");
        assert_eq!((card.red(), card.alpha()), (255, 255));
        let below = pixmap.pixel(10, 95).expect("pixel");
        assert_eq!(below.alpha(), 0);
    }

    #[test]
    fn empty_surface_cannot_be_rasterized() {
        let list = SkeletonList::layout(0, 0, 1.0);
        assert!(matches!(
            list.rasterize(),
            Err(RenderError::SurfaceAllocation { .. })
        ));
    }
}
