//! File processing API
//!
//! This module runs a source through a [Frontend] and renders one stage of the result in
//! one format. Format strings are `<stage>-<format>`:
//!
//! - stages: `tokens`, `derivation`, `tree`, `table`, `relations`
//! - formats: `simple`, `json`, and `treeviz` for the tree stage only
//!
//! The `table` and `relations` stages describe the grammar, not the source, so they
//! ignore their input.
//!
//! # Sample Sources
//!
//! [samples::Samples] gives tests access to the programs under `samples/`, raw or already
//! processed:
//!
//! ```rust
//! use weakprec::weakprec::processor::samples::Samples;
//!
//! let source = Samples::get_string("000-return-variable.wp").unwrap();
//! let tree = Samples::get_processed("020-assignments.wp", "tree-treeviz").unwrap();
//! ```

use crate::weakprec::error::{AnalysisError, GrammarError};
use crate::weakprec::formats::{
    derivation_to_lines, lexemes_to_lines, relations_to_lines, table_to_grid, to_treeviz_str,
};
use crate::weakprec::frontend::Frontend;
use crate::weakprec::lexing::LexicalAnalyzer;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Tokens,
    Derivation,
    Tree,
    Table,
    Relations,
}

impl ProcessingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStage::Tokens => "tokens",
            ProcessingStage::Derivation => "derivation",
            ProcessingStage::Tree => "tree",
            ProcessingStage::Table => "table",
            ProcessingStage::Relations => "relations",
        }
    }
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Treeviz,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

/// A stage and an output format, parsed from `<stage>-<format>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "tokens-simple" or "tree-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "tokens" => ProcessingStage::Tokens,
            "derivation" => ProcessingStage::Derivation,
            "tree" => ProcessingStage::Tree,
            "table" => ProcessingStage::Table,
            "relations" => ProcessingStage::Relations,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        if format == OutputFormat::Treeviz && stage != ProcessingStage::Tree {
            return Err(ProcessingError::InvalidFormatType(
                "Format 'treeviz' only works with the tree stage".to_string(),
            ));
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Every valid stage and format combination
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let stages = [
            ProcessingStage::Tokens,
            ProcessingStage::Derivation,
            ProcessingStage::Tree,
            ProcessingStage::Table,
            ProcessingStage::Relations,
        ];
        let mut specs = Vec::new();
        for stage in stages {
            specs.push(ProcessingSpec {
                stage,
                format: OutputFormat::Simple,
            });
            specs.push(ProcessingSpec {
                stage,
                format: OutputFormat::Json,
            });
            if stage == ProcessingStage::Tree {
                specs.push(ProcessingSpec {
                    stage,
                    format: OutputFormat::Treeviz,
                });
            }
        }
        specs
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage.as_str(), self.format.as_str())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    FileNotFound(String),
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Grammar(GrammarError),
    Analysis(AnalysisError),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Grammar(err) => write!(f, "{}", err),
            ProcessingError::Analysis(err) => write!(f, "{}", err),
        }
    }
}

impl From<GrammarError> for ProcessingError {
    fn from(err: GrammarError) -> Self {
        ProcessingError::Grammar(err)
    }
}

impl From<AnalysisError> for ProcessingError {
    fn from(err: AnalysisError) -> Self {
        ProcessingError::Analysis(err)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ProcessingError> {
    serde_json::to_string_pretty(value).map_err(|e| ProcessingError::IoError(e.to_string()))
}

/// Process source text and render the requested stage
pub fn process_source(
    frontend: &Frontend,
    source: &str,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let parser = frontend.parser();

    match (spec.stage, spec.format) {
        (ProcessingStage::Table, OutputFormat::Simple) => Ok(table_to_grid(parser.table())),
        (ProcessingStage::Table, _) => to_json(parser.table()),
        (ProcessingStage::Relations, OutputFormat::Simple) => {
            Ok(relations_to_lines(parser.relations()))
        }
        (ProcessingStage::Relations, _) => {
            to_json(&parser.relations().iter().collect::<Vec<_>>())
        }
        (ProcessingStage::Tokens, format) => {
            let lexemes = LexicalAnalyzer::new().tokenize(source).map_err(AnalysisError::from)?;
            match format {
                OutputFormat::Json => to_json(&lexemes),
                _ => Ok(lexemes_to_lines(&lexemes)),
            }
        }
        (ProcessingStage::Derivation, format) => {
            let analysis = frontend.analyze(source)?;
            match format {
                OutputFormat::Json => to_json(&analysis.derivation),
                _ => Ok(derivation_to_lines(&analysis.derivation)),
            }
        }
        (ProcessingStage::Tree, format) => {
            let analysis = frontend.analyze(source)?;
            match format {
                OutputFormat::Json => to_json(&analysis.tree),
                OutputFormat::Treeviz => Ok(to_treeviz_str(&analysis.tree)),
                OutputFormat::Simple => {
                    let mut frontier = analysis.tree.frontier(parser.grammar()).join(" ");
                    frontier.push('\n');
                    Ok(frontier)
                }
            }
        }
    }
}

/// Process a source file and render the requested stage
pub fn process_file<P: AsRef<Path>>(
    frontend: &Frontend,
    file_path: P,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }

    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    process_source(frontend, &content, spec)
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}

/// Sample sources module for accessing the bundled sample programs
pub mod samples {
    use super::*;

    /// Available sample files, all written against the program grammar
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "000-return-variable.wp",
        "010-declarations.wp",
        "020-assignments.wp",
        "030-nested-expressions.wp",
        "040-string-literals.wp",
        "900-lexical-error.wp",
        "910-missing-semicolon.wp",
    ];

    pub struct Samples;

    impl Samples {
        fn sample_path(filename: &str) -> String {
            format!("samples/{}", filename)
        }

        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        /// Get sample content as raw string
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Get sample content processed with the program grammar
        pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let spec = ProcessingSpec::from_string(format)?;
            let frontend = Frontend::program()?;
            process_file(&frontend, Self::sample_path(filename), &spec)
        }

        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }
}
