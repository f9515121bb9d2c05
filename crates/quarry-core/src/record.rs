use crate::{Error, Path, Result, Value};

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// An insertion-ordered map of field names to values.
///
/// Records are both the application-side shape fed to the projection mapper
/// and the database-side shape of a row. Key order is significant: it decides
/// the column order of generated `INSERT` and `SET` clauses.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Converts any serializable struct into a record by way of JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Value::from(serde_json::to_value(value)?).into_record()
    }

    /// Builds a `T` from this record by way of JSON.
    pub fn deserialize_into<T: DeserializeOwned>(self) -> Result<T> {
        let json = serde_json::Value::from(Value::Record(self));
        Ok(serde_json::from_value(json)?)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Removes fields holding `Null`.
    pub fn without_nulls(self) -> Self {
        self.into_iter().filter(|(_, value)| !value.is_null()).collect()
    }

    /// Resolves a path through nested records.
    ///
    /// Returns `None` when any step is missing or an intermediate value is not
    /// a record. A present `Null` resolves to `Some(&Value::Null)`.
    pub fn get_path(&self, path: &Path) -> Option<&Value> {
        let (last, parents) = path.steps().split_last()?;
        let mut record = self;
        for step in parents {
            record = record.get(step)?.as_record()?;
        }
        record.get(last)
    }

    /// Writes `value` at `path`, creating intermediate records as needed.
    ///
    /// An intermediate value that is not a record is replaced by one. An empty
    /// path is ignored.
    pub fn set_path(&mut self, path: &Path, value: Value) {
        let Some((last, parents)) = path.steps().split_last() else {
            return;
        };

        let mut record = self;
        for step in parents {
            let slot = record
                .fields
                .entry(step.clone())
                .or_insert_with(|| Value::Record(Record::new()));

            if !slot.is_record() {
                *slot = Value::Record(Record::new());
            }

            record = match slot {
                Value::Record(nested) => nested,
                _ => unreachable!(),
            };
        }

        record.fields.insert(last.clone(), value);
    }

    /// Removes `key` and converts its value to `T`. Errors name the missing
    /// key.
    pub fn take<T>(&mut self, key: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        match self.remove(key) {
            Some(value) => T::try_from(value),
            None => Err(crate::err!("missing field `{key}`")),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builds a [`Record`] from `key => value` pairs, keeping their order.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut record = $crate::Record::new();
        $( record.insert($key, $value); )+
        record
    }};
}
