//! Sentiment chart rendering

use crate::api::{PostId, status_url};
use crate::engine::dataset::Dataset;
use crate::error::{PlotbotError, Result};
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{FontStyle, register_font};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 500;
const FONT_FAMILY: &str = "sans-serif";
const FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

/// A rendered chart and the posts it points at
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub image_path: PathBuf,
    pub most_negative_id: PostId,
    pub most_positive_id: PostId,
    pub mean_compound: f64,
    pub post_count: usize,
}

/// Draws datasets to a fixed PNG path, overwriting it each time
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    output_path: PathBuf,
    status_url_base: String,
}

impl ReportRenderer {
    pub fn new(
        output_path: impl Into<PathBuf>,
        status_url_base: impl Into<String>,
    ) -> Result<Self> {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT)
            .map_err(|_| PlotbotError::Render("embedded font could not be loaded".to_string()))?;

        let output_path = output_path.into();
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            output_path,
            status_url_base: status_url_base.into(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Chart `dataset` for `target`; `None` when there is nothing to draw
    #[instrument(skip(self, dataset), fields(posts = dataset.len()))]
    pub fn render(&self, target: &str, dataset: &Dataset) -> Result<Option<Report>> {
        let (Some(negative), Some(positive), Some(mean)) = (
            dataset.most_negative(),
            dataset.most_positive(),
            dataset.mean_compound(),
        ) else {
            debug!("nothing to chart for {}", target);
            return Ok(None);
        };

        self.draw(target, dataset, mean)?;

        info!("Sentiment analysis for {}", target);
        info!(
            "Most negative tweet: {}",
            status_url(&self.status_url_base, negative.post_id)
        );
        info!(
            "Most positive tweet: {}",
            status_url(&self.status_url_base, positive.post_id)
        );

        Ok(Some(Report {
            image_path: self.output_path.clone(),
            most_negative_id: negative.post_id,
            most_positive_id: positive.post_id,
            mean_compound: mean,
            post_count: dataset.len(),
        }))
    }

    fn draw(&self, target: &str, dataset: &Dataset, mean: f64) -> Result<()> {
        let (start, end) = x_range(dataset)?;
        let points: Vec<(DateTime<Utc>, f64)> =
            dataset.iter().map(|e| (e.timestamp, e.compound)).collect();

        let root = BitMapBackend::new(&self.output_path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Sentiment Analysis of Tweets for {target}"),
                (FONT_FAMILY, 26),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(start..end, -1.05f64..1.05f64)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc("Date of tweet")
            .y_desc("Tweet polarity")
            .x_labels(8)
            .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%Y-%m-%d").to_string())
            .label_style((FONT_FAMILY, 14))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), STEEL_BLUE.stroke_width(2)))
            .map_err(render_error)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, STEEL_BLUE.filled())),
            )
            .map_err(render_error)?;

        chart
            .draw_series(DashedLineSeries::new(
                vec![(start, mean), (end, mean)],
                10,
                5,
                RED.stroke_width(2),
            ))
            .map_err(render_error)?
            .label(format!("Avg: {mean:.2}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 14))
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        debug!("chart written to {}", self.output_path.display());
        Ok(())
    }
}

/// Time span of the x-axis; a single instant is widened by an hour each way
fn x_range(dataset: &Dataset) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let (start, end) = dataset
        .time_range()
        .ok_or_else(|| PlotbotError::Render("dataset is empty".to_string()))?;
    if start == end {
        return Ok((start - Duration::hours(1), end + Duration::hours(1)));
    }
    Ok((start, end))
}

fn render_error(err: impl Display) -> PlotbotError {
    PlotbotError::Render(err.to_string())
}
