//! Kind-agnostic display state
//!
//! A [`Table`] is an immutable snapshot: once published by a List it is only
//! ever replaced wholesale, never edited in place.

use std::collections::BTreeMap;

/// Header label of the leading namespace column
pub const NAMESPACE_COLUMN: &str = "NAMESPACE";

/// Header label of the trailing age column
pub const AGE_COLUMN: &str = "AGE";

/// Ordered display fields, positionally aligned with a header
pub type Row = Vec<String>;

/// Stable identity of a row across reconciliations (`namespace/name` or `name`)
pub type RowKey = String;

/// One displayed object: its fields plus the prior value of every field that
/// changed since the previous snapshot (empty string when unchanged).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEvent {
    pub fields: Row,
    pub deltas: Row,
}

impl RowEvent {
    /// A row with no recorded changes
    pub fn unchanged(fields: Row) -> Self {
        let deltas = blank_row(fields.len());
        Self { fields, deltas }
    }

    /// True if any field carries a prior value
    pub fn has_deltas(&self) -> bool {
        self.deltas.iter().any(|d| !d.is_empty())
    }
}

/// Snapshot of one (kind, namespace) listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub namespace: String,
    pub header: Row,
    pub rows: BTreeMap<RowKey, RowEvent>,
}

impl Table {
    pub fn new(namespace: impl Into<String>, header: Row) -> Self {
        Self {
            namespace: namespace.into(),
            header,
            rows: BTreeMap::new(),
        }
    }

    /// Build the next snapshot from freshly projected rows.
    ///
    /// Deltas are computed against `previous`, the snapshot that was current
    /// before this cycle. Rows absent from `rows` are dropped, new rows carry
    /// no deltas, and the age column never does since it moves on its own.
    pub fn reconcile(
        namespace: impl Into<String>,
        header: Row,
        rows: BTreeMap<RowKey, Row>,
        previous: &Table,
    ) -> Self {
        let skip = header.iter().position(|h| h == AGE_COLUMN);
        let rows = rows
            .into_iter()
            .map(|(key, fields)| {
                let event = match previous.rows.get(&key) {
                    Some(prev) => RowEvent {
                        deltas: delta_row(&prev.fields, &fields, skip),
                        fields,
                    },
                    None => RowEvent::unchanged(fields),
                };
                (key, event)
            })
            .collect();

        Self {
            namespace: namespace.into(),
            header,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check the structural invariants: every row is as wide as the header
    /// and carries exactly one delta per field.
    pub fn is_consistent(&self) -> bool {
        self.rows.values().all(|row| {
            row.fields.len() == self.header.len() && row.deltas.len() == row.fields.len()
        })
    }

    /// Rows with at least one changed field
    pub fn changed_rows(&self) -> impl Iterator<Item = (&RowKey, &RowEvent)> {
        self.rows.iter().filter(|(_, row)| row.has_deltas())
    }
}

/// Drill-down view of one object: its related items as plain rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XRay {
    pub header: Row,
    pub rows: Vec<Row>,
}

/// Compute per-position deltas between two rows.
///
/// Rows of different widths cannot be compared position by position and are
/// treated as a fresh appearance.
pub fn delta_row(previous: &Row, current: &Row, skip: Option<usize>) -> Row {
    if previous.len() != current.len() {
        return blank_row(current.len());
    }

    previous
        .iter()
        .zip(current)
        .enumerate()
        .map(|(i, (old, new))| {
            if Some(i) == skip || old == new {
                String::new()
            } else {
                old.clone()
            }
        })
        .collect()
}

pub(crate) fn blank_row(len: usize) -> Row {
    vec![String::new(); len]
}
