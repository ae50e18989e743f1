use ferrous_watch_domain::{QueryAction, QueryCall};
use std::fmt;

/// Advisory produced for a slow query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySuggestion {
    MissingPagination,
    MissingOrdering,
    EagerRelations,
    UnindexedCount,
    VerySlow { duration_ms: u64 },
}

impl fmt::Display for QuerySuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPagination => {
                f.write_str("Consider adding pagination (take/skip) to findMany queries")
            }
            Self::MissingOrdering => {
                f.write_str("Consider adding an explicit orderBy to filtered findMany queries")
            }
            Self::EagerRelations => {
                f.write_str("Eagerly included relations may be expensive; select only required fields")
            }
            Self::UnindexedCount => {
                f.write_str("Count with a filter on non-indexed columns; consider adding an index")
            }
            Self::VerySlow { duration_ms } => write!(
                f,
                "Query took {}ms; review the query plan and consider caching or denormalization",
                duration_ms
            ),
        }
    }
}

/// Heuristic rules run over a slow query's shape.
pub fn suggest(call: &QueryCall, duration_ms: u64, very_slow_threshold_ms: u64) -> Vec<QuerySuggestion> {
    let mut suggestions = Vec::new();
    let shape = &call.shape;

    match call.action {
        QueryAction::FindMany => {
            if !shape.has_pagination {
                suggestions.push(QuerySuggestion::MissingPagination);
            }
            if shape.has_filter && !shape.has_ordering {
                suggestions.push(QuerySuggestion::MissingOrdering);
            }
            if shape.includes_relations {
                suggestions.push(QuerySuggestion::EagerRelations);
            }
        }
        QueryAction::Count if shape.has_filter && !shape.filter_uses_index => {
            suggestions.push(QuerySuggestion::UnindexedCount);
        }
        _ => {}
    }

    if duration_ms > very_slow_threshold_ms {
        suggestions.push(QuerySuggestion::VerySlow { duration_ms });
    }

    suggestions
}
