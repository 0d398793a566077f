//! Small line-art pictograms drawn on tinted badges.
//!
//! Every icon is described on a 24 × 24 unit grid and stroked with round caps, the way
//! outline icon sets are drawn.  [`render_badge`] scales the icon into a square badge filled
//! with a light tint of its colour.

use image::RgbImage;

use super::raster::Canvas;
use crate::palette::Rgb;

const GRID: f64 = 24.0;
const BADGE_TINT: f64 = 0.0625;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Leaf,
    TrendingUp,
    Coins,
    Award,
    Users,
    Droplets,
    Briefcase,
    Truck,
    MapPin,
    DollarSign,
    Sun,
    Candy,
}

impl Icon {
    pub const ALL: [Icon; 12] = [
        Icon::Leaf,
        Icon::TrendingUp,
        Icon::Coins,
        Icon::Award,
        Icon::Users,
        Icon::Droplets,
        Icon::Briefcase,
        Icon::Truck,
        Icon::MapPin,
        Icon::DollarSign,
        Icon::Sun,
        Icon::Candy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::Leaf => "leaf",
            Icon::TrendingUp => "trending-up",
            Icon::Coins => "coins",
            Icon::Award => "award",
            Icon::Users => "users",
            Icon::Droplets => "droplets",
            Icon::Briefcase => "briefcase",
            Icon::Truck => "truck",
            Icon::MapPin => "map-pin",
            Icon::DollarSign => "dollar-sign",
            Icon::Sun => "sun",
            Icon::Candy => "candy",
        }
    }
}

/// Stroke primitive in grid units.
enum Mark {
    Path(Vec<(f64, f64)>),
    Circle { cx: f64, cy: f64, r: f64 },
    Dot { cx: f64, cy: f64, r: f64 },
}

fn arc(cx: f64, cy: f64, r: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    let steps = (((to - from).abs() / 10.0).ceil() as usize).max(2);
    (0..=steps)
        .map(|step| {
            let degrees = from + (to - from) * step as f64 / steps as f64;
            let radians = degrees.to_radians();
            (cx + r * radians.cos(), cy + r * radians.sin())
        })
        .collect()
}

fn marks(icon: Icon) -> Vec<Mark> {
    use Mark::*;
    match icon {
        Icon::Leaf => {
            let mut outline = arc(20.0, 20.0, 16.0, 180.0, 270.0);
            outline.extend(arc(4.0, 4.0, 16.0, 0.0, 90.0));
            vec![Path(outline), Path(vec![(4.0, 20.0), (14.0, 10.0)])]
        }
        Icon::TrendingUp => vec![
            Path(vec![(2.0, 17.0), (8.5, 10.5), (13.5, 15.5), (22.0, 7.0)]),
            Path(vec![(16.0, 7.0), (22.0, 7.0), (22.0, 13.0)]),
        ],
        Icon::Coins => vec![
            Circle { cx: 8.0, cy: 8.0, r: 6.0 },
            Path(arc(16.0, 16.0, 6.0, -70.0, 200.0)),
            Path(vec![(7.0, 6.0), (8.0, 6.0), (8.0, 10.0)]),
        ],
        Icon::Award => vec![
            Circle { cx: 12.0, cy: 8.0, r: 6.0 },
            Path(vec![(8.5, 13.0), (7.0, 22.0), (12.0, 19.0), (17.0, 22.0), (15.5, 13.0)]),
        ],
        Icon::Users => vec![
            Circle { cx: 9.0, cy: 7.0, r: 4.0 },
            Path(arc(9.0, 21.0, 6.0, 180.0, 360.0)),
            Path(arc(16.0, 7.0, 4.0, -90.0, 90.0)),
            Path(arc(17.0, 21.0, 5.0, 270.0, 360.0)),
        ],
        Icon::Droplets => {
            let mut big = vec![(12.0, 3.0)];
            big.extend(arc(12.0, 15.0, 6.0, -30.0, 210.0));
            big.push((12.0, 3.0));
            vec![Path(big)]
        }
        Icon::Briefcase => vec![
            Path(vec![(3.0, 7.0), (21.0, 7.0), (21.0, 20.0), (3.0, 20.0), (3.0, 7.0)]),
            Path(vec![(8.0, 7.0), (8.0, 4.0), (16.0, 4.0), (16.0, 7.0)]),
            Path(vec![(3.0, 13.0), (21.0, 13.0)]),
        ],
        Icon::Truck => vec![
            Path(vec![(1.0, 4.0), (15.0, 4.0), (15.0, 17.0), (1.0, 17.0), (1.0, 4.0)]),
            Path(vec![(15.0, 9.0), (19.0, 9.0), (22.0, 12.0), (22.0, 17.0), (15.0, 17.0)]),
            Circle { cx: 5.5, cy: 18.5, r: 2.5 },
            Circle { cx: 18.5, cy: 18.5, r: 2.5 },
        ],
        Icon::MapPin => {
            let mut outline = arc(12.0, 10.0, 8.0, 150.0, 390.0);
            outline.push((12.0, 22.0));
            outline.push(outline[0]);
            vec![Path(outline), Circle { cx: 12.0, cy: 10.0, r: 3.0 }]
        }
        Icon::DollarSign => {
            let mut stroke = vec![(17.0, 5.0)];
            stroke.extend(arc(9.5, 8.5, 3.5, 270.0, 90.0));
            stroke.extend(arc(14.5, 15.5, 3.5, -90.0, 90.0));
            stroke.push((6.0, 19.0));
            vec![Path(vec![(12.0, 1.0), (12.0, 23.0)]), Path(stroke)]
        }
        Icon::Sun => {
            let mut out = vec![Circle { cx: 12.0, cy: 12.0, r: 4.0 }];
            for step in 0..8 {
                let radians = (step as f64 * 45.0).to_radians();
                let (c, s) = (radians.cos(), radians.sin());
                out.push(Path(vec![(12.0 + 7.0 * c, 12.0 + 7.0 * s), (12.0 + 10.0 * c, 12.0 + 10.0 * s)]));
            }
            out
        }
        Icon::Candy => vec![
            Circle { cx: 12.0, cy: 12.0, r: 5.0 },
            Path(vec![(8.5, 8.5), (4.0, 4.0), (2.0, 8.0)]),
            Path(vec![(4.0, 4.0), (8.0, 2.0)]),
            Path(vec![(15.5, 15.5), (20.0, 20.0), (22.0, 16.0)]),
            Path(vec![(20.0, 20.0), (16.0, 22.0)]),
            Dot { cx: 12.0, cy: 12.0, r: 1.5 },
        ],
    }
}

/// Strokes `icon` into the square at (`x`, `y`) with side `size` pixels.
pub fn draw_icon(canvas: &mut Canvas, icon: Icon, x: f64, y: f64, size: f64, color: Rgb) {
    let unit = size / GRID;
    let stroke = (2.0 * unit).max(1.0);
    let at = |(gx, gy): (f64, f64)| (x + gx * unit, y + gy * unit);
    for mark in marks(icon) {
        match mark {
            Mark::Path(points) => {
                let points: Vec<(f64, f64)> = points.into_iter().map(at).collect();
                canvas.polyline(&points, stroke, color);
            }
            Mark::Circle { cx, cy, r } => {
                let (px, py) = at((cx, cy));
                canvas.stroke_circle(px, py, r * unit, stroke, color);
            }
            Mark::Dot { cx, cy, r } => {
                let (px, py) = at((cx, cy));
                canvas.fill_circle(px, py, r * unit, color);
            }
        }
    }
}

/// Renders `icon` stroked in `stroke` on a rounded tile of `background`, `size_px` pixels square.
pub fn render_tile(icon: Icon, stroke: Rgb, background: Rgb, size_px: u32) -> RgbImage {
    let size = f64::from(size_px.max(4));
    let mut canvas = Canvas::white(size as u32, size as u32);
    canvas.fill_rounded(0.0, 0.0, size, size, size * 0.25, background);
    let inset = size * 0.2;
    draw_icon(&mut canvas, icon, inset, inset, size - 2.0 * inset, stroke);
    canvas.into_image()
}

/// Renders `icon` in `color` on a light tint of the same colour.
pub fn render_badge(icon: Icon, color: Rgb, size_px: u32) -> RgbImage {
    render_tile(icon, color, color.tint(BADGE_TINT), size_px)
}

/// Renders `icon` in `color` edge to edge on a flat `background`, for inline use next to text.
pub fn render_glyph(icon: Icon, color: Rgb, background: Rgb, size_px: u32) -> RgbImage {
    let size = f64::from(size_px.max(4));
    let mut canvas = Canvas::new(size as u32, size as u32, background);
    draw_icon(&mut canvas, icon, 0.0, 0.0, size, color);
    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::neutral;

    #[test]
    fn every_icon_marks_the_badge() {
        let color = Rgb(21, 128, 61);
        for icon in Icon::ALL {
            let badge = render_badge(icon, color, 96);
            assert_eq!(badge.dimensions(), (96, 96));
            let inked = badge.pixels().filter(|p| p.0 == [color.0, color.1, color.2]).count();
            assert!(inked > 20, "{} drew {} pixels", icon.name(), inked);
        }
    }

    #[test]
    fn badge_background_is_tinted() {
        let color = Rgb(0, 0, 0);
        let badge = render_badge(Icon::Sun, color, 64);
        let corner = badge.get_pixel(32, 3);
        assert_ne!(corner.0, [neutral::WHITE.0, neutral::WHITE.1, neutral::WHITE.2]);
        assert_eq!(corner.0, {
            let tint = color.tint(BADGE_TINT);
            [tint.0, tint.1, tint.2]
        });
    }
}
