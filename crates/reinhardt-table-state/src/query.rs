//! Query representation and query-string adapter.
//!
//! [`Query`] is the parsed form of a URL query string: an insertion-ordered
//! map from parameter name to a single value or a list of values. A missing
//! key stands for "undefined". [`QueryUpdate`] describes a set of
//! parameter writes and deletions that [`Query::apply`] merges in.
//!
//! # Example
//!
//! ```
//! use reinhardt_table_state::query::{Query, QueryUpdate};
//!
//! let mut query = Query::parse("?globalFilter=john&tag=a&tag=b");
//! assert_eq!(query.get_single("globalFilter"), Some("john"));
//!
//! let mut update = QueryUpdate::new();
//! update.delete("tag");
//! update.set("pageIndex", Some("2".into()));
//! query.apply(&update);
//!
//! assert_eq!(query.to_search_params(), "globalFilter=john&pageIndex=2");
//! ```

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
	/// `key=value`
	Single(String),
	/// `key=a&key=b`
	Multi(Vec<String>),
}

impl QueryValue {
	/// Returns the value when it is a single string.
	///
	/// A repeated parameter is a type mismatch for single-valued slices,
	/// so `Multi` yields `None`.
	pub fn as_single(&self) -> Option<&str> {
		match self {
			Self::Single(value) => Some(value),
			Self::Multi(_) => None,
		}
	}

	/// Returns every value in order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		let values: &[String] = match self {
			Self::Single(value) => std::slice::from_ref(value),
			Self::Multi(values) => values,
		};
		values.iter().map(String::as_str)
	}

	fn push(&mut self, value: String) {
		match self {
			Self::Single(existing) => {
				*self = Self::Multi(vec![std::mem::take(existing), value]);
			}
			Self::Multi(values) => values.push(value),
		}
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<Vec<String>> for QueryValue {
	fn from(values: Vec<String>) -> Self {
		Self::Multi(values)
	}
}

/// Parsed URL query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(IndexMap<String, QueryValue>);

impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string. A leading `?` is ignored and repeated keys
	/// collapse into [`QueryValue::Multi`].
	///
	/// Input that is not valid `application/x-www-form-urlencoded` yields an
	/// empty query.
	pub fn parse(search: &str) -> Self {
		let search = search.strip_prefix('?').unwrap_or(search);
		let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(search) {
			Ok(pairs) => pairs,
			Err(e) => {
				tracing::debug!(search, error = %e, "ignoring unparseable query string");
				return Self::new();
			}
		};

		let mut query = Self::new();
		for (key, value) in pairs {
			match query.0.entry(key) {
				Entry::Occupied(mut existing) => existing.get_mut().push(value),
				Entry::Vacant(slot) => {
					slot.insert(QueryValue::Single(value));
				}
			}
		}
		query
	}

	/// Serializes the query as `key=value&key2=value2`.
	///
	/// `Multi` values are written as repeated keys.
	pub fn to_search_params(&self) -> String {
		let pairs: Vec<(&str, &str)> = self
			.0
			.iter()
			.flat_map(|(key, value)| value.values().map(move |v| (key.as_str(), v)))
			.collect();

		serde_urlencoded::to_string(pairs).unwrap_or_default()
	}

	/// Flattens a JSON object into a query.
	///
	/// Nested objects become dot-notation keys, arrays become
	/// [`QueryValue::Multi`], and `null` entries are omitted.
	pub fn from_nested(value: &Value) -> Self {
		let mut query = Self::new();
		if let Value::Object(map) = value {
			for (key, value) in map {
				query.flatten_into(key.clone(), value);
			}
		}
		query
	}

	fn flatten_into(&mut self, key: String, value: &Value) {
		match value {
			Value::Null => {}
			Value::Object(map) => {
				for (child, value) in map {
					self.flatten_into(format!("{}.{}", key, child), value);
				}
			}
			Value::Array(items) => {
				let values: Vec<String> = items
					.iter()
					.filter(|item| !item.is_null())
					.map(scalar_to_string)
					.collect();
				if !values.is_empty() {
					self.0.insert(key, QueryValue::Multi(values));
				}
			}
			scalar => {
				self.0.insert(key, QueryValue::Single(scalar_to_string(scalar)));
			}
		}
	}

	/// Expands dot-notation keys back into nested JSON objects.
	///
	/// Values stay strings; a key that is both a scalar and a prefix keeps
	/// the nested object.
	pub fn to_nested(&self) -> Value {
		let mut root = Map::new();
		for (key, value) in &self.0 {
			let leaf = match value {
				QueryValue::Single(v) => Value::String(v.clone()),
				QueryValue::Multi(vs) => {
					Value::Array(vs.iter().cloned().map(Value::String).collect())
				}
			};
			insert_path(&mut root, key.split('.').collect::<Vec<_>>().as_slice(), leaf);
		}
		Value::Object(root)
	}

	/// Returns the value for `key`.
	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.0.get(key)
	}

	/// Returns the value for `key` if it is a single string.
	pub fn get_single(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(QueryValue::as_single)
	}

	/// Sets `key`, keeping its position if it already exists.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Removes `key`, preserving the order of the remaining entries.
	pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
		self.0.shift_remove(key)
	}

	/// Returns whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over parameters in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Merges `update` into the query. `None` entries delete their key.
	pub fn apply(&mut self, update: &QueryUpdate) {
		for (key, value) in update.iter() {
			match value {
				Some(value) => self.insert(key, value.clone()),
				None => {
					self.remove(key);
				}
			}
		}
	}
}

impl<K, V> FromIterator<(K, V)> for Query
where
	K: Into<String>,
	V: Into<QueryValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

/// Ordered set of parameter writes (`Some`) and deletions (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate(IndexMap<String, Option<QueryValue>>);

impl QueryUpdate {
	/// Creates an empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Writes `key`, or deletes it when `value` is `None`.
	pub fn set(&mut self, key: impl Into<String>, value: Option<QueryValue>) {
		self.0.insert(key.into(), value);
	}

	/// Deletes `key`.
	pub fn delete(&mut self, key: impl Into<String>) {
		self.0.insert(key.into(), None);
	}

	/// Appends every entry of `other`; later entries win.
	pub fn extend(&mut self, other: QueryUpdate) {
		self.0.extend(other.0);
	}

	/// Returns the pending value for `key`. The outer `None` means "not touched".
	pub fn get(&self, key: &str) -> Option<Option<&QueryValue>> {
		self.0.get(key).map(Option::as_ref)
	}

	/// Iterates over entries in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&QueryValue>)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
	}

	/// Returns the number of touched keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether nothing is touched.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

fn scalar_to_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

fn insert_path(map: &mut Map<String, Value>, path: &[&str], leaf: Value) {
	match path {
		[] => {}
		[last] => {
			// An existing object at this key wins over a scalar
			if !matches!(map.get(*last), Some(Value::Object(_))) {
				map.insert((*last).to_string(), leaf);
			}
		}
		[head, rest @ ..] => {
			let entry = map
				.entry((*head).to_string())
				.or_insert_with(|| Value::Object(Map::new()));
			if !entry.is_object() {
				*entry = Value::Object(Map::new());
			}
			if let Value::Object(child) = entry {
				insert_path(child, rest, leaf);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_parse_ignores_leading_question_mark() {
		let query = Query::parse("?a=1&b=two");
		assert_eq!(query.get_single("a"), Some("1"));
		assert_eq!(query.get_single("b"), Some("two"));
		assert_eq!(query.len(), 2);
	}

	#[rstest]
	fn test_parse_repeated_keys_become_multi() {
		let query = Query::parse("tag=a&x=1&tag=b&tag=c");
		assert_eq!(
			query.get("tag"),
			Some(&QueryValue::Multi(vec![
				"a".to_string(),
				"b".to_string(),
				"c".to_string()
			]))
		);
		assert_eq!(query.get_single("tag"), None);
	}

	#[rstest]
	fn test_parse_decodes_percent_escapes() {
		let query = Query::parse("columnFilters=name.%2522John%2522&q=a+b");
		assert_eq!(query.get_single("columnFilters"), Some("name.%22John%22"));
		assert_eq!(query.get_single("q"), Some("a b"));
	}

	#[rstest]
	#[case("")]
	#[case("?")]
	fn test_parse_empty(#[case] input: &str) {
		assert!(Query::parse(input).is_empty());
	}

	#[rstest]
	fn test_to_search_params_repeats_multi_values() {
		let query: Query = [
			("sorting", QueryValue::from("name.desc")),
			("tag", QueryValue::from(vec!["a".to_string(), "b".to_string()])),
		]
		.into_iter()
		.collect();

		assert_eq!(query.to_search_params(), "sorting=name.desc&tag=a&tag=b");
	}

	#[rstest]
	fn test_to_search_params_escapes_percent() {
		let mut query = Query::new();
		query.insert("columnFilters", "name.%22John%22");

		insta::assert_snapshot!(query.to_search_params(), @"columnFilters=name.%2522John%2522");
	}

	#[rstest]
	fn test_search_params_parse_inverse() {
		let mut query = Query::new();
		query.insert("globalFilter", "a&b=c");
		query.insert("ids", vec!["1".to_string(), "2".to_string()]);

		assert_eq!(Query::parse(&query.to_search_params()), query);
	}

	#[rstest]
	fn test_apply_sets_and_deletes_preserving_order() {
		let mut query = Query::parse("a=1&b=2&c=3");
		let mut update = QueryUpdate::new();
		update.delete("b");
		update.set("a", Some("10".into()));
		update.set("d", Some("4".into()));
		update.delete("missing");

		query.apply(&update);

		assert_eq!(query.to_search_params(), "a=10&c=3&d=4");
	}

	#[rstest]
	fn test_query_update_extend_later_wins() {
		let mut first = QueryUpdate::new();
		first.set("a", Some("1".into()));
		let mut second = QueryUpdate::new();
		second.delete("a");

		first.extend(second);

		assert_eq!(first.get("a"), Some(None));
		assert_eq!(first.get("b"), None);
	}

	#[rstest]
	fn test_from_nested_flattens_with_dot_notation() {
		let query = Query::from_nested(&json!({
			"filter": { "name": "John", "age": { "min": 18 } },
			"tags": ["a", 2, null],
			"missing": null,
			"empty": [],
			"page": 3
		}));

		assert_eq!(query.get_single("filter.name"), Some("John"));
		assert_eq!(query.get_single("filter.age.min"), Some("18"));
		assert_eq!(
			query.get("tags"),
			Some(&QueryValue::Multi(vec!["a".to_string(), "2".to_string()]))
		);
		assert_eq!(query.get_single("page"), Some("3"));
		assert!(!query.contains_key("missing"));
		assert!(!query.contains_key("empty"));
	}

	#[rstest]
	fn test_to_nested_expands_dot_notation() {
		let query = Query::parse("filter.name=John&filter.age.min=18&tags=a&tags=b&page=3");

		assert_eq!(
			query.to_nested(),
			json!({
				"filter": { "name": "John", "age": { "min": "18" } },
				"tags": ["a", "b"],
				"page": "3"
			})
		);
	}

	#[rstest]
	fn test_to_nested_object_wins_over_scalar() {
		let query = Query::parse("a=1&a.b=2");
		assert_eq!(query.to_nested(), json!({ "a": { "b": "2" } }));

		let query = Query::parse("a.b=2&a=1");
		assert_eq!(query.to_nested(), json!({ "a": { "b": "2" } }));
	}
}
