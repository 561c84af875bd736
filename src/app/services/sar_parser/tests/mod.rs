//! Test utilities and fixtures for sar parser testing
//!
//! This module provides sample sar content and helper functions used across
//! the parser test modules.

use crate::app::models::CellValue;


/// CPU section with an average block, followed by a memory-commit section
pub const SAMPLE_SAR: &str = "Linux someversion blah blah

12:00:02 AM     CPU      %usr     %nice
12:10:02 AM     all      1.47      0.00
12:10:02 AM       0      0.34      0.00
12:10:02 AM       1      0.21      0.00
12:20:01 AM     all      2.01      0.00
12:20:01 AM       0      0.43      0.00
12:20:01 AM       1      0.25      5.00
12:30:01 AM     all      1.56      0.00
12:30:01 AM       0      0.64      0.00
12:30:01 AM       1      1.62      7.00
12:40:01 AM     all      1.47      0.21
12:40:01 AM       0      2.48      0.71
12:40:01 AM       1      0.32      9.00

Average:        CPU      %usr     %nice
Average:        all      1.19      0.11
Average:          0      1.18      0.64
Average:          1      1.23      0.07

12:00:02 AM %commit  kbcommit
12:10:02 AM   11.11    111100
12:20:01 AM   11.14    111400
12:30:01 AM   17.11    171100
12:40:01 AM   33.33    333300
Average:      18.17    181725
";

/// Memory-commit section split into two blocks by a repeated header
pub const CONTINUED_SAR: &str = "Linux 5.4.0 (host) 01/02/2020 _x86_64_ (2 CPU)

00:00:01 %commit  kbcommit
00:10:01   11.11    111100
00:20:01   11.14    111400

00:20:01 kbmemfree kbmemused
00:30:01    500000    300000

00:20:01 %commit  kbcommit
00:30:01   17.11    171100
00:40:01   33.33    333300
Average:   18.17    181725
";

/// Helper to split fixture text into owned lines
pub fn lines_of(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// Helper to build a text column
pub fn text_column(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}

/// Helper to build a float column
pub fn float_column(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}

/// Helper to build an integer column
pub fn int_column(values: &[i64]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::from(*value)).collect()
}
