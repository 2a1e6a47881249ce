//! Curve Figure Renderer
//! Renders the six-panel color figure as a bitmap using plotters.
//!
//! Layout per panel:
//! 1. Two title lines with the four summary percentages
//! 2. Bar chart: per-set mean creature count per mana value, ±std error bars
//! 3. Per-bar percentage label from the bucket's display ratio
//! 4. Color tag in the top-right corner

use crate::stats::{ColorFilter, ColorSummary};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// Bar fills, one per color filter; edges are always black.
const WHITE_FILL: RGBColor = RGBColor(255, 255, 240); // ivory
const BLUE_FILL: RGBColor = RGBColor(173, 216, 230); // lightblue
const BLACK_FILL: RGBColor = RGBColor(128, 128, 128); // gray
const RED_FILL: RGBColor = RGBColor(250, 128, 114); // salmon
const GREEN_FILL: RGBColor = RGBColor(0, 250, 154); // mediumspringgreen
const COLORLESS_FILL: RGBColor = RGBColor(192, 192, 192); // silver

fn panel_fill(color: ColorFilter) -> RGBColor {
    match color {
        ColorFilter::White => WHITE_FILL,
        ColorFilter::Blue => BLUE_FILL,
        ColorFilter::Black => BLACK_FILL,
        ColorFilter::Red => RED_FILL,
        ColorFilter::Green => GREEN_FILL,
        ColorFilter::Colorless => COLORLESS_FILL,
    }
}

/// Format a ratio as a whole percentage; NaN renders as "n/a".
fn pct(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.0}%", 100.0 * value)
    }
}

/// Static six-panel figure: one creature-curve bar chart per color filter.
pub struct CurveFigure {
    width: u32,
    height: u32,
    title: String,
}

impl CurveFigure {
    pub fn new(width: u32, height: u32, title: &str) -> Self {
        Self {
            width,
            height,
            title: title.to_string(),
        }
    }

    /// Render all panels to a PNG at `path`.
    pub fn render(&self, summaries: &[ColorSummary], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let titled = root.titled(&self.title, ("sans-serif", 28))?;

        let panels = titled.split_evenly((2, 3));
        for (panel, summary) in panels.iter().zip(summaries) {
            Self::draw_panel(panel, summary)?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &ColorSummary,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let headline = format!(
            "{} of {} cards are creatures. {} of creatures have evasion.",
            pct(summary.creature_ratio),
            summary.color.name(),
            pct(summary.creature_evasion_ratio),
        );
        let subline = format!(
            "{} of noncreatures are removal. {} of noncreatures are combat tricks.",
            pct(summary.noncreature_removal_ratio),
            pct(summary.noncreature_combat_trick_ratio),
        );
        let area = area.titled(&headline, ("sans-serif", 15))?;
        let area = area.titled(&subline, ("sans-serif", 15))?;

        let x_max = summary
            .curve
            .iter()
            .map(|b| b.mana_value)
            .fold(0.0, f64::max)
            + 1.0;
        let y_max = summary
            .curve
            .iter()
            .map(|b| b.mean + b.std)
            .fold(0.0, f64::max)
            .max(1.0)
            * 1.2;

        let mut chart = ChartBuilder::on(&area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(20)
            .build_cartesian_2d(-0.5..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .y_labels(0)
            .x_desc("Creature Curve (Mana Value)")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .axis_desc_style(("sans-serif", 14))
            .draw()?;

        let fill = panel_fill(summary.color);
        let bar_label = TextStyle::from(("sans-serif", 13).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));

        for bucket in &summary.curve {
            let x0 = bucket.mana_value - 0.4;
            let x1 = bucket.mana_value + 0.4;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, bucket.mean)],
                fill.filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, bucket.mean)],
                BLACK.stroke_width(1),
            )))?;

            if bucket.std > 0.0 {
                chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                    bucket.mana_value,
                    (bucket.mean - bucket.std).max(0.0),
                    bucket.mean,
                    bucket.mean + bucket.std,
                    BLACK.filled(),
                    6,
                )))?;
            }

            chart.draw_series(std::iter::once(Text::new(
                pct(bucket.count_ratio),
                (bucket.mana_value, y_max * 0.04),
                bar_label.clone(),
            )))?;
        }

        let corner_tag = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Right, VPos::Top));
        chart.draw_series(std::iter::once(Text::new(
            summary.color.name().to_string(),
            (x_max - 0.1, y_max * 0.97),
            corner_tag,
        )))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_ratios_render_as_na() {
        assert_eq!(pct(f64::NAN), "n/a");
        assert_eq!(pct(0.5), "50%");
        assert_eq!(pct(1.0), "100%");
        assert_eq!(pct(0.0), "0%");
    }
}
