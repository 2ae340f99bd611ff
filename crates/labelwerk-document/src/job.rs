// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label job: the end-to-end pipeline shared by the CLI and the form.
//
//   input --classify--> address --CodeSource--> code --+
//                       code ----------------------------+--> layout --> PDF --> persist
//
// Nothing touches the network for a code input, and nothing touches the
// output path until the PDF has been rendered in full. The file is written to
// a temporary sibling and atomically renamed into place, so a failure never
// leaves a partial label behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_core::source::CodeSource;
use labelwerk_core::types::{Credentials, InputKind, LabelSize, RegistrationCode, classify_strict};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::image::{Logo, generate_qr};
use crate::layout::LabelLayout;
use crate::layout::fit::FitStrategy;
use crate::pdf::writer::LabelWriter;

/// Everything needed to produce one label.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    /// Device address or registration code, as typed.
    pub input: String,
    pub size: LabelSize,
    /// Only used when `input` is an address.
    pub credentials: Credentials,
    /// Logo to draw if it can be loaded.
    pub logo_path: Option<PathBuf>,
}

/// A label rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub bytes: Vec<u8>,
    pub layout: LabelLayout,
}

/// What a finished job produced.
#[derive(Debug, Clone)]
pub struct LabelOutcome {
    pub code: RegistrationCode,
    /// Whether the code came from a device query.
    pub fetched: bool,
    pub path: PathBuf,
    pub bytes_written: usize,
    pub fit: FitStrategy,
    pub logo_drawn: bool,
}

/// Turn user input into a registration code, querying the device if the
/// input is an address.
#[instrument(skip(credentials, source))]
pub async fn resolve_code<S: CodeSource>(
    input: &str,
    credentials: &Credentials,
    source: &S,
) -> Result<(RegistrationCode, bool)> {
    match classify_strict(input)? {
        InputKind::NetworkAddress(address) => {
            info!(%address, "Detected network address - fetching data from device");
            let data = source.fetch(address, credentials).await?;
            info!(code = %data.registration_code, "Registration code fetched");
            Ok((data.registration_code, true))
        }
        InputKind::OpaqueCode(code) => {
            info!(code = %code, "Detected registration code");
            Ok((code, false))
        }
        InputKind::Unrecognized => Err(LabelwerkError::InvalidInput(input.to_owned())),
    }
}

/// Render a label for `code` in memory.
#[instrument(skip(logo), fields(code = %code, logo = logo.is_some()))]
pub fn render_label(
    code: &RegistrationCode,
    size: LabelSize,
    logo: Option<&Logo>,
) -> Result<RenderedLabel> {
    let layout = LabelLayout::compute(size, code, logo.map(Logo::aspect_ratio));
    let qr = generate_qr(code.as_str())
        .map_err(|e| LabelwerkError::RenderFailed(e.to_string()))?;

    let mut writer = LabelWriter::new(size);
    writer.set_title(format!("Registration Label {code}"));
    let bytes = writer.render(&layout, &qr, logo)?;

    Ok(RenderedLabel { bytes, layout })
}

/// Run the whole pipeline and write the label to `output`.
pub async fn generate_label<S: CodeSource>(
    request: &LabelRequest,
    source: &S,
    output: &Path,
) -> Result<LabelOutcome> {
    let (code, fetched) = resolve_code(&request.input, &request.credentials, source).await?;

    let logo = request.logo_path.as_deref().and_then(Logo::load_optional);
    let rendered = render_label(&code, request.size, logo.as_ref())?;

    persist(&rendered.bytes, output)?;
    info!(path = %output.display(), bytes = rendered.bytes.len(), "PDF label saved");

    Ok(LabelOutcome {
        code,
        fetched,
        path: output.to_path_buf(),
        bytes_written: rendered.bytes.len(),
        fit: rendered.layout.fit_strategy(),
        logo_drawn: rendered.layout.logo.is_some(),
    })
}

/// Write `bytes` to `path` via a temporary file in the same directory.
///
/// The temporary file is removed on every failure path when it drops.
pub fn persist(bytes: &[u8], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let render_err =
        |e: std::io::Error| LabelwerkError::RenderFailed(format!("writing {}: {e}", path.display()));

    let mut tmp = NamedTempFile::new_in(dir).map_err(render_err)?;
    tmp.write_all(bytes).map_err(render_err)?;
    tmp.as_file().sync_all().map_err(render_err)?;
    tmp.persist(path).map_err(|e| render_err(e.error))?;
    Ok(())
}
