/// Data layer: schema, loading, derivation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  bundled / uploaded .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + schema check → RawTable (default source memoized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  engagement, rate, per-million → CandidateTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  party selection + name search → filtered CandidateTable
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │  export   │  totals, per-party sums, ranking / CSV
///   └───────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod view;
