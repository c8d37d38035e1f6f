use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::report::FeatureReport;

/// File name of the structured report inside an output directory.
pub const REPORT_JSON: &str = "result.json";

/// File name of the plain-text rendering inside an output directory.
pub const REPORT_TEXT: &str = "result.txt";

/// Reads a corpus file and returns its whole content lower-cased.
///
/// - Reads the entire file into memory (no streaming)
/// - Fails on invalid UTF-8
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents.to_lowercase())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/corpus.txt` + `"bin"` → `data/corpus.bin`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Writes `result.json` and `result.txt` into `folder`, creating it if needed.
///
/// Returns the paths of the two written files, JSON first.
pub fn write_report(folder: &str, report: &FeatureReport) -> Result<(PathBuf, PathBuf)> {
	let folder = normalize_folder(folder);
	fs::create_dir_all(&folder)?;

	let json_path = folder.join(REPORT_JSON);
	fs::write(&json_path, report.to_json()?)?;

	let text_path = folder.join(REPORT_TEXT);
	fs::write(&text_path, report.to_text()?)?;

	Ok((json_path, text_path))
}
