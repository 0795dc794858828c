// Ordered label -> value mapping rendered as one report table

/// A single cell value: plain text, or a nested group (one per disk / GPU).
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Text(String),
    Section(MetricSection),
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<MetricSection> for MetricValue {
    fn from(section: MetricSection) -> Self {
        MetricValue::Section(section)
    }
}

/// Insertion-ordered mapping with unique labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSection {
    entries: Vec<(String, MetricValue)>,
}

impl MetricSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<MetricValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Builder form of [`MetricSection::insert`].
    pub fn with(mut self, label: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&MetricValue> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Text value for `label`, if present and not a nested group.
    pub fn text(&self, label: &str) -> Option<&str> {
        match self.get(label)? {
            MetricValue::Text(s) => Some(s.as_str()),
            MetricValue::Section(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
