//! `rsvg-convert` subprocess implementation of the image renderer.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use askama::Template;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::domain::repositories::{ImageRenderer, RenderError};

/// Width of rendered preview images in pixels.
pub const OG_IMAGE_WIDTH: u32 = 600;

/// Height of rendered preview images in pixels.
pub const OG_IMAGE_HEIGHT: u32 = 315;

/// SVG card with the preview text; askama escapes `text` for XML.
#[derive(Template)]
#[template(path = "og-template.svg", escape = "html")]
struct OgImageTemplate<'a> {
    text: &'a str,
    width: u32,
    height: u32,
}

/// Renders preview images by piping an SVG card through an external converter.
///
/// The converter is invoked as `<converter> -w <width> -h <height> -o <output>`
/// with the SVG on stdin. It is killed if it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct RsvgRenderer {
    converter: String,
    width: u32,
    height: u32,
    timeout: Duration,
}

impl RsvgRenderer {
    /// Creates a renderer producing 600x315 images.
    pub fn new(converter: impl Into<String>, timeout: Duration) -> Self {
        Self {
            converter: converter.into(),
            width: OG_IMAGE_WIDTH,
            height: OG_IMAGE_HEIGHT,
            timeout,
        }
    }

    /// Resolves the converter to an executable path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ConverterUnavailable`] if the converter is neither an
    /// existing file nor found on `PATH`.
    pub fn locate_converter(&self) -> Result<PathBuf, RenderError> {
        find_executable(&self.converter)
            .ok_or_else(|| RenderError::ConverterUnavailable(self.converter.clone()))
    }

    /// Builds the SVG document for `text`.
    pub fn svg_for(&self, text: &str) -> Result<String, RenderError> {
        OgImageTemplate {
            text,
            width: self.width,
            height: self.height,
        }
        .render()
        .map_err(|e| RenderError::Template(e.to_string()))
    }
}

#[async_trait]
impl ImageRenderer for RsvgRenderer {
    async fn render(&self, text: &str, output: &Path) -> Result<(), RenderError> {
        let program = self.locate_converter()?;
        let svg = self.svg_for(text)?;

        let mut child = Command::new(&program)
            .arg("-w")
            .arg(self.width.to_string())
            .arg("-h")
            .arg(self.height.to_string())
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    RenderError::ConverterUnavailable(program.display().to_string())
                }
                _ => RenderError::Io(e),
            })?;

        let run = async {
            if let Some(mut stdin) = child.stdin.take() {
                // A converter that exits early closes the pipe; its exit status tells why.
                match stdin.write_all(svg.as_bytes()).await {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                    _ => {}
                }
            }
            child.wait_with_output().await
        };

        let output_status = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result?,
            Err(_) => return Err(RenderError::Timeout(self.timeout)),
        };

        if !output_status.status.success() {
            return Err(RenderError::ProcessFailure {
                status: output_status.status.to_string(),
                stderr: String::from_utf8_lossy(&output_status.stderr)
                    .trim()
                    .to_string(),
            });
        }

        debug!(output = %output.display(), "Converter finished");
        Ok(())
    }
}

fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}
