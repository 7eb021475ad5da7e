use kennel_domain::{RecordKind, TimeWindow, TransactionRecord, TransportRow};

use crate::{
    filter::{by_category, in_window},
    CoreError,
};

/// Describes which records a report needs from the data store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    /// Owning user/tenant id. `None` lets single-tenant sources return everything.
    pub tenant: Option<String>,
    pub window: Option<TimeWindow>,
    /// Equality match on the categorical column. `None`/`"All"` disables it.
    pub category: Option<String>,
    /// Source tables to read. Empty means every table.
    pub kinds: Vec<RecordKind>,
}

impl RecordQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        Self {
            tenant: Some(tenant.into()),
            ..Self::default()
        }
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_kinds(mut self, kinds: &[RecordKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Applies the window, category and kind constraints to already-loaded records.
    pub fn apply(&self, records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        by_category(records, self.category.as_deref())
            .into_iter()
            .filter(|record| self.kinds.is_empty() || self.kinds.contains(&record.kind))
            .filter(|record| match &self.window {
                Some(window) => in_window(*record, window),
                None => true,
            })
            .cloned()
            .collect()
    }
}

/// Read interface over the hosted data store, already normalized to records.
pub trait RecordSource: Send + Sync {
    fn fetch(&self, query: &RecordQuery) -> Result<Vec<TransactionRecord>, CoreError>;

    /// Transportation log rows, optionally limited to `window`. Sources without
    /// a transport log return `CoreError::DataFetch` rather than an empty list.
    fn fetch_transport(&self, window: Option<TimeWindow>) -> Result<Vec<TransportRow>, CoreError>;
}

/// Vec-backed source for callers that already hold the records.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub records: Vec<TransactionRecord>,
    pub transport: Vec<TransportRow>,
}

impl InMemorySource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            records,
            transport: Vec::new(),
        }
    }

    pub fn with_transport(mut self, transport: Vec<TransportRow>) -> Self {
        self.transport = transport;
        self
    }
}

impl RecordSource for InMemorySource {
    fn fetch(&self, query: &RecordQuery) -> Result<Vec<TransactionRecord>, CoreError> {
        Ok(query.apply(&self.records))
    }

    fn fetch_transport(&self, window: Option<TimeWindow>) -> Result<Vec<TransportRow>, CoreError> {
        Ok(self
            .transport
            .iter()
            .filter(|row| window.as_ref().map_or(true, |w| in_window(*row, w)))
            .cloned()
            .collect())
    }
}
