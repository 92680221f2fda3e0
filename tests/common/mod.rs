/*!
 * Common test utilities for the vidvox test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given bytes in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small fake video file (content does not matter to the driver)
pub fn create_test_video(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, b"\x00\x00\x00\x18ftypmp42fake-video-payload")
}

/// Creates a small fake WAV audio artifact
pub fn create_test_audio(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, b"RIFF\x24\x00\x00\x00WAVEfmt fake-audio")
}

/// Creates a minimal single-page PDF whose extracted text contains `lines`.
///
/// The document is assembled by hand with a correct xref table so it parses
/// with a real PDF reader, not just a lenient one. Each line is placed at a
/// distinct vertical position so extraction preserves the line breaks.
pub fn create_test_pdf(dir: &PathBuf, filename: &str, lines: &[&str]) -> Result<PathBuf> {
    let mut content = String::from("BT\n/F1 12 Tf\n");
    let mut y = 720;
    for line in lines {
        let escaped = line
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        content.push_str(&format!("1 0 0 1 72 {} Tm\n({}) Tj\n", y, escaped));
        y -= 16;
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf: Vec<u8> = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in &offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    create_test_file(dir, filename, &pdf)
}
