//! Rendering backends for finished figures.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::figure::Figure;
use crate::error::ChartError;
use crate::trader::setting::SETTINGS;
use crate::trader::utility::get_folder_path;

const DEFAULT_PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const DEFAULT_FOLDER: &str = "charts";

/// Backend receiving a finished figure
pub trait ChartRenderer {
    fn render(&mut self, figure: &Figure) -> Result<(), ChartError>;
}

/// Writes each figure as a standalone HTML page using plotly.js
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    output_dir: PathBuf,
    file_stem: String,
    plotly_js: String,
    last_path: Option<PathBuf>,
}

impl HtmlRenderer {
    /// Write `<file_stem>.html` into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
            plotly_js: SETTINGS
                .get_string("chart.plotly_js")
                .unwrap_or_else(|| DEFAULT_PLOTLY_JS.to_string()),
            last_path: None,
        }
    }

    /// Write into the `chart.folder` folder of the temp directory
    pub fn from_settings(file_stem: impl Into<String>) -> Self {
        let folder = SETTINGS
            .get_string("chart.folder")
            .unwrap_or_else(|| DEFAULT_FOLDER.to_string());
        Self::new(get_folder_path(&folder), file_stem)
    }

    /// Path of the last written page
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Target path of the next page
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.html", self.file_stem))
    }
}

/// Embed figure JSON into an HTML page loading plotly.js from `plotly_js`
pub fn to_html(figure: &Figure, plotly_js: &str) -> Result<String, ChartError> {
    // "</" would close the script element early
    let json = figure.to_json()?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{plotly_js}"></script>
</head>
<body>
<div id="chart"></div>
<script>
var figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#
    ))
}

impl ChartRenderer for HtmlRenderer {
    fn render(&mut self, figure: &Figure) -> Result<(), ChartError> {
        let html = to_html(figure, &self.plotly_js)?;
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_path();
        fs::write(&path, html)?;
        info!("chart written to {}", path.display());

        self.last_path = Some(path);
        Ok(())
    }
}

/// Keeps rendered figures in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    pub figures: Vec<Figure>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently rendered figure
    pub fn last(&self) -> Option<&Figure> {
        self.figures.last()
    }
}

impl ChartRenderer for MemoryRenderer {
    fn render(&mut self, figure: &Figure) -> Result<(), ChartError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}
