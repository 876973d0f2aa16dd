/// Data layer: result types, CSV loading, and field selection.
///
/// Architecture:
/// ```text
///  results/<name>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResultFile
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ ResultFile  │  Vec<ResultRow>, ordered column list
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  canonical fields, else first non-time columns
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod select;
