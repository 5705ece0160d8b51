use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use super::MonthBucket;

const BAR_SIZE: (u32, u32) = (800, 400);
const LINE_SIZE: (u32, u32) = (800, 400);

/// Frequency bar chart with the category labels rotated 90 degrees.
/// Writes nothing for an empty count set.
pub fn write_bar_chart(
    output_path: &Path,
    caption: &str,
    x_desc: &str,
    counts: &[(String, usize)],
) -> Result<()> {
    if counts.is_empty() {
        return Ok(());
    }
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(1);

    let root = BitMapBackend::new(output_path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 24))
        .x_label_area_size(90)
        .y_label_area_size(50)
        .build_cartesian_2d(0..counts.len(), 0..max + 1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(counts.len())
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|x| {
            counts
                .get(*x)
                .map(|(value, _)| value.clone())
                .unwrap_or_default()
        })
        .x_desc(x_desc)
        .y_desc("Contagem")
        .draw()?;

    for (idx, (_, count)) in counts.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(idx, 0), (idx + 1, *count)],
            BLUE.mix(0.5).filled(),
        )))?;
    }

    Ok(())
}

/// Monthly trend line chart. Writes nothing when no month bucket exists
/// (every date cell of the column was blank).
pub fn write_trend_chart(
    output_path: &Path,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    buckets: &[MonthBucket],
) -> Result<()> {
    if buckets.is_empty() {
        return Ok(());
    }
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(1);

    let root = BitMapBackend::new(output_path, LINE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 24))
        .x_label_area_size(70)
        .y_label_area_size(50)
        .build_cartesian_2d(0..buckets.len(), 0..max + 1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(buckets.len().min(14))
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|x| {
            buckets.get(*x).map(|b| b.month.clone()).unwrap_or_default()
        })
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(
        buckets.iter().enumerate().map(|(idx, b)| (idx, b.count)),
        &BLUE,
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_write_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cargo_dist.png");
        write_bar_chart(&path, "Distribuição de Cargos", "Cargo", &[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn bar_chart_renders_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cargo_dist.png");
        let counts = vec![
            ("Analista".to_string(), 4),
            ("Dev".to_string(), 2),
            ("Gerente".to_string(), 1),
        ];
        write_bar_chart(&path, "Distribuição de Cargos", "Cargo", &counts).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn trend_chart_renders_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contratacao_trend.png");
        let buckets = vec![
            MonthBucket { month: "2024-01".into(), count: 2 },
            MonthBucket { month: "2024-02".into(), count: 0 },
            MonthBucket { month: "2024-03".into(), count: 1 },
        ];
        write_trend_chart(
            &path,
            "Tendência de Contratação ao Longo do Tempo",
            "Data de Contratação",
            "Número de Contratações",
            &buckets,
        )
        .unwrap();
        assert!(path.exists());
    }
}
