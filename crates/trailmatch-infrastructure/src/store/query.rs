//! List queries.

use std::cmp::Ordering;

use serde_json::Value;

use super::Document;

/// Field predicate evaluated by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equal(String, Value),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equal(field.into(), value.into())
    }

    /// Evaluates the predicate locally.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Equal(field, value) => document.get(field) == Some(value),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Filter, ordering and one page window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order_by: Option<(String, Order)>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.order_by = Some((field.into(), order));
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    /// Applies the whole query to an in-memory set of documents.
    pub fn apply(&self, documents: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut selected: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.filter.as_ref().is_none_or(|f| f.matches(doc)))
            .collect();

        if let Some((field, order)) = &self.order_by {
            selected.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                match order {
                    Order::Asc => ordering,
                    Order::Desc => ordering.reverse(),
                }
            });
        }

        let window = selected.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => window.take(limit).collect(),
            None => window.collect(),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_or_of_and_filters() {
        let pair = Filter::Or(vec![
            Filter::And(vec![
                Filter::equal("sender_id", "u1"),
                Filter::equal("receiver_id", "u2"),
            ]),
            Filter::And(vec![
                Filter::equal("sender_id", "u2"),
                Filter::equal("receiver_id", "u1"),
            ]),
        ]);

        assert!(pair.matches(&doc(json!({"sender_id": "u1", "receiver_id": "u2"}))));
        assert!(pair.matches(&doc(json!({"sender_id": "u2", "receiver_id": "u1"}))));
        assert!(!pair.matches(&doc(json!({"sender_id": "u1", "receiver_id": "u3"}))));
    }

    #[test]
    fn test_apply_orders_and_pages() {
        let docs = vec![
            doc(json!({"n": "c"})),
            doc(json!({"n": "a"})),
            doc(json!({"n": "b"})),
        ];
        let query = Query::new().order_by("n", Order::Asc).page(2, 1);
        let page = query.apply(docs);
        assert_eq!(page, vec![doc(json!({"n": "b"})), doc(json!({"n": "c"}))]);
    }
}
