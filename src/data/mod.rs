/// Data layer: core types, storage, filtering, aggregation and lookup.
///
/// Architecture:
/// ```text
///   shodo_data.csv
///        │  ▲
///        ▼  │ persist (full rewrite on every append)
///   ┌──────────┐
///   │  store    │  CSV ⇄ RecordSet, memoized load
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ RecordSet  │  Vec<Record>, insertion order
///   └───────────┘
///     │     │     │
///     ▼     ▼     ▼
///  filter aggregate lookup
///     └─────┼─────┘
///           ▼
///     ┌───────────┐
///     │ dashboard  │  one view per interaction
///     └───────────┘
/// ```

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod lookup;
pub mod model;
pub mod store;
