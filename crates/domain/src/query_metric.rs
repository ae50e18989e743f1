use serde::Serialize;
use std::fmt;

/// Data-access operation issued against a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryAction {
    FindMany,
    FindUnique,
    FindFirst,
    Create,
    Update,
    Upsert,
    Delete,
    Count,
    Aggregate,
    Raw,
    Other(String),
}

impl QueryAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FindMany => "findMany",
            Self::FindUnique => "findUnique",
            Self::FindFirst => "findFirst",
            Self::Create => "create",
            Self::Update => "update",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
            Self::Count => "count",
            Self::Aggregate => "aggregate",
            Self::Raw => "queryRaw",
            Self::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "findMany" => Self::FindMany,
            "findUnique" => Self::FindUnique,
            "findFirst" => Self::FindFirst,
            "create" => Self::Create,
            "update" => Self::Update,
            "upsert" => Self::Upsert,
            "delete" => Self::Delete,
            "count" => Self::Count,
            "aggregate" => Self::Aggregate,
            "queryRaw" | "executeRaw" => Self::Raw,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for QueryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of a query's arguments, computed once when the call is issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryShape {
    pub has_pagination: bool,
    pub has_ordering: bool,
    pub has_filter: bool,
    pub includes_relations: bool,
    /// The filter only touches columns known to be indexed.
    pub filter_uses_index: bool,
}

impl QueryShape {
    pub fn paginated(mut self) -> Self {
        self.has_pagination = true;
        self
    }

    pub fn ordered(mut self) -> Self {
        self.has_ordering = true;
        self
    }

    pub fn filtered(mut self) -> Self {
        self.has_filter = true;
        self
    }

    pub fn filtered_on_index(mut self) -> Self {
        self.has_filter = true;
        self.filter_uses_index = true;
        self
    }

    pub fn with_relations(mut self) -> Self {
        self.includes_relations = true;
        self
    }
}

/// A single instrumented database call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCall {
    pub model: String,
    pub action: QueryAction,
    pub shape: QueryShape,
}

impl QueryCall {
    pub fn new(model: impl Into<String>, action: QueryAction) -> Self {
        Self {
            model: model.into(),
            action,
            shape: QueryShape::default(),
        }
    }

    pub fn with_shape(mut self, shape: QueryShape) -> Self {
        self.shape = shape;
        self
    }

    /// `Model.action`, the key used by metrics and the slow-query set.
    pub fn key(&self) -> String {
        format!("{}.{}", self.model, self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryMetricRecord {
    pub model_action: String,
    pub duration_ms: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub failed: bool,
}

impl QueryMetricRecord {
    /// Model part of `Model.action`.
    pub fn model(&self) -> &str {
        self.model_action
            .split_once('.')
            .map(|(model, _)| model)
            .unwrap_or(&self.model_action)
    }
}
