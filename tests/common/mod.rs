//! Shared test utilities for integration tests

#![allow(dead_code)]

use statreport::scope::GameLogEntry;
use statreport::{
    compile_report, parser, CompileError, CompiledReport, CompilerConfig, ReportRequest, ReportSpec,
};

/// Load a configuration fixture from the tests/test_data directory
pub fn load_config(name: &str) -> CompilerConfig {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path).unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Load a request fixture from tests/test_data/requests
pub fn load_request(name: &str) -> ReportRequest {
    let path = format!("tests/test_data/requests/{}", name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

/// Load the in-memory game log fixture
pub fn load_game_log(name: &str) -> Vec<GameLogEntry> {
    let path = format!("tests/test_data/{}", name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

/// Compile with the default configuration
pub fn compile(spec: &ReportSpec) -> Result<CompiledReport, CompileError> {
    compile_report(spec, &CompilerConfig::default())
}

// =============================================================================
// Query Text Inspection Utilities
// =============================================================================

/// Placeholder indices (`$k`) in the order they appear in `text`
pub fn placeholders_in(text: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            continue;
        }
        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if let Ok(index) = digits.parse() {
            found.push(index);
        }
    }
    found
}

/// The text of the clause starting with `keyword`, up to the next line break
pub fn clause<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    text.lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(keyword))
}
