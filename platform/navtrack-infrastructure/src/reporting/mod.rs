use navtrack_domain::entities::performance::PerformanceReport;
use navtrack_domain::entities::track_record::TrackRecordView;
use navtrack_domain::repositories::sink::PerformanceSink;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Plain-text summary table, the terminal counterpart of the dashboard.
pub struct ConsoleSink<W: Write> {
    writer: Mutex<W>,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> PerformanceSink for ConsoleSink<W> {
    fn render(&self, view: &TrackRecordView) -> Result<(), String> {
        let text = render_summary_table(view);
        let mut writer = self.writer.lock();
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|err| format!("failed to write summary: {err}"))
    }
}

pub fn render_summary_table(view: &TrackRecordView) -> String {
    let rows = view.display.rows();
    let width = rows
        .iter()
        .map(|row| row.metric.len())
        .max()
        .unwrap_or(0)
        .max("Metric".len());

    let mut out = String::new();
    out.push_str("Strategy Track Record\n");
    out.push_str(&format!("Source: {}\n", view.source));
    out.push_str("Cashflows adjusted. For research display only.\n\n");
    out.push_str(&format!("{:<width$}  Value\n", "Metric"));
    for row in &rows {
        out.push_str(&format!("{:<width$}  {}\n", row.metric, row.value));
    }
    out.push_str(&format!(
        "\nNotes: returns use daily equity and cashflow; Sharpe uses {} trading days.\n",
        view.annualization_factor
    ));
    out
}

/// Writes the whole view (summary, display rows and chart series) as one JSON
/// document.
pub struct JsonSink<W: Write> {
    writer: Mutex<W>,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

pub fn view_json(view: &TrackRecordView) -> serde_json::Value {
    serde_json::json!({
        "source": view.source,
        "annualization_factor": view.annualization_factor,
        "summary": view.report.summary,
        "display": view.display.rows(),
        "nav": view.nav_series,
        "drawdown": view.drawdown_series,
    })
}

impl<W: Write> PerformanceSink for JsonSink<W> {
    fn render(&self, view: &TrackRecordView) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&view_json(view))
            .map_err(|err| format!("failed to serialize view: {err}"))?;
        let mut writer = self.writer.lock();
        writer
            .write_all(json.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|err| format!("failed to write view json: {err}"))
    }
}

/// Exports `series.csv` and `summary.json` into a directory.
pub struct FilesystemSink {
    out_dir: PathBuf,
}

impl FilesystemSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl PerformanceSink for FilesystemSink {
    fn render(&self, view: &TrackRecordView) -> Result<(), String> {
        fs::create_dir_all(&self.out_dir).map_err(|err| {
            format!(
                "failed to create output dir {}: {}",
                self.out_dir.display(),
                err
            )
        })?;
        write_series_csv(self.out_dir.join("series.csv").as_path(), &view.report)?;
        write_summary_json(self.out_dir.join("summary.json").as_path(), view)?;
        tracing::info!(out_dir = %self.out_dir.display(), "wrote track record artifacts");
        Ok(())
    }
}

pub fn write_series_csv(path: &Path, report: &PerformanceReport) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create series csv {}: {}", path.display(), err))?;
    wtr.write_record(["date", "ret", "nav", "drawdown"])
        .map_err(|err| format!("failed to write series csv header: {}", err))?;

    for idx in 0..report.len() {
        wtr.write_record([
            report.dates[idx].to_string(),
            report.returns[idx].to_string(),
            report.nav[idx].to_string(),
            report.drawdown[idx].to_string(),
        ])
        .map_err(|err| format!("failed to write series row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush series csv: {}", err))
}

pub fn write_summary_json(path: &Path, view: &TrackRecordView) -> Result<(), String> {
    let json = serde_json::json!({
        "source": view.source,
        "annualization_factor": view.annualization_factor,
        "summary": view.report.summary,
        "display": view.display,
    });
    let json = serde_json::to_string_pretty(&json)
        .map_err(|err| format!("failed to serialize summary: {}", err))?;
    let mut file =
        fs::File::create(path).map_err(|err| format!("failed to create summary: {}", err))?;
    file.write_all(json.as_bytes())
        .map_err(|err| format!("failed to write summary: {}", err))
}
