//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, deterministic output (golden-testable).
//!
//! Plot elements:
//! - interpolated contour: `-` line, broken where the contour is undefined
//! - control points: `o`

use crate::domain::PitchTier;

/// Render the contour of `tier` over its span `[xmin, xmax]`.
pub fn render_contour_plot(tier: &PitchTier, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = time_range(tier).unwrap_or((0.0, 1.0));
    let curve = sample_contour(tier, t_min, t_max, width);

    let (f_min, f_max) = freq_range(tier).unwrap_or((0.0, 1.0));
    let (f_min, f_max) = pad_range(f_min, f_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so points can overlay).
    draw_curve(&mut grid, &curve, t_min, t_max, f_min, f_max);

    for p in tier.points() {
        if !(p.time().is_finite() && p.frequency().is_finite()) {
            continue;
        }
        let x = map_x(p.time(), t_min, t_max, width);
        let y = map_y(p.frequency(), f_min, f_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: time=[{t_min:.3}, {t_max:.3}] s | f0=[{f_min:.2}, {f_max:.2}] Hz\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn time_range(tier: &PitchTier) -> Option<(f64, f64)> {
    let (t0, t1) = (tier.xmin(), tier.xmax());
    if t0.is_finite() && t1.is_finite() && t1 > t0 {
        return Some((t0, t1));
    }

    // Degenerate span: fall back to the control points.
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for p in tier.points() {
        min_t = min_t.min(p.time());
        max_t = max_t.max(p.time());
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn freq_range(tier: &PitchTier) -> Option<(f64, f64)> {
    let mut min_f = f64::INFINITY;
    let mut max_f = f64::NEG_INFINITY;
    for p in tier.points() {
        if p.frequency().is_finite() {
            min_f = min_f.min(p.frequency());
            max_f = max_f.max(p.frequency());
        }
    }

    if !(min_f.is_finite() && max_f.is_finite()) {
        None
    } else if max_f > min_f {
        Some((min_f, max_f))
    } else {
        // Flat contour: center it.
        Some((min_f - 1.0, max_f + 1.0))
    }
}

/// One sample per column; `None` where the contour is undefined.
fn sample_contour(tier: &PitchTier, t_min: f64, t_max: f64, n: usize) -> Vec<(f64, Option<f64>)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let t = t_min + u * (t_max - t_min);
            let f = tier.frequency_at(t);
            (t, f.is_finite().then_some(f))
        })
        .collect()
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(f: f64, f_min: f64, f_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((f - f_min) / (f_max - f_min)).clamp(0.0, 1.0);
    // top row is f_max
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, Option<f64>)],
    t_min: f64,
    t_max: f64,
    f_min: f64,
    f_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, f) in curve {
        let Some(f) = f else {
            prev = None;
            continue;
        };
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(f, f_min, f_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, '-'),
            None => grid[y][x] = '-',
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ControlPoint;

    #[test]
    fn plot_golden_snapshot_small() {
        let tier = PitchTier::new(0.0, 1.0, vec![ControlPoint::new(0.0, 100.0), ControlPoint::new(1.0, 110.0)]);
        let txt = render_contour_plot(&tier, 10, 5);
        let expected = concat!(
            "Plot: time=[0.000, 1.000] s | f0=[99.50, 110.50] Hz\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_leaves_gaps_outside_contour() {
        let tier = PitchTier::new(0.0, 1.0, vec![ControlPoint::new(0.4, 100.0), ControlPoint::new(0.6, 100.0)]);
        let txt = render_contour_plot(&tier, 11, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        // Flat contour sits on the middle row, columns 4..=6 only.
        assert_eq!(rows[2], "    o-o    ");
        assert!(rows.iter().enumerate().all(|(i, r)| i == 2 || r.trim().is_empty()));
    }

    #[test]
    fn plot_empty_tier_is_blank() {
        let txt = render_contour_plot(&PitchTier::new(0.0, 1.0, vec![]), 10, 5);
        assert_eq!(txt.lines().count(), 6);
        assert!(txt.lines().skip(1).all(|r| r.trim().is_empty()));
    }
}
