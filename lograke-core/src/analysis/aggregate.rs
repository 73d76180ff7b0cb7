use crate::analysis::types::ParsedRecord;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Running latency statistics for one endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointStats {
    pub count: u64,
    pub time_sum: f64,
    /// Latencies in arrival order.
    pub samples: Vec<f64>,
}

impl EndpointStats {
    fn record(&mut self, latency: f64) {
        self.count += 1;
        self.time_sum += latency;
        self.samples.push(latency);
    }
}

/// Per-endpoint statistics keyed by endpoint, iterated in first-seen order.
#[derive(Debug, Default)]
pub struct EndpointTable {
    endpoints: IndexMap<String, EndpointStats>,
    total_records: u64,
    total_time: f64,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in, creating the endpoint entry on first sighting.
    pub fn record(&mut self, record: ParsedRecord) {
        let ParsedRecord { endpoint, latency } = record;

        let stats = match self.endpoints.entry(endpoint) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(EndpointStats::default()),
        };
        stats.record(latency);

        self.total_records += 1;
        self.total_time += latency;
    }

    pub fn get(&self, endpoint: &str) -> Option<&EndpointStats> {
        self.endpoints.get(endpoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointStats)> {
        self.endpoints.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Number of records folded in across all endpoints.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Sum of every recorded latency, in arrival order.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl FromIterator<ParsedRecord> for EndpointTable {
    fn from_iter<I: IntoIterator<Item = ParsedRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.record(record);
        }
        table
    }
}
