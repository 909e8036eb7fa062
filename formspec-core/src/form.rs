// Form accessors

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Anything that can produce a string value for a named field.
///
/// Missing fields return `""`; rules never distinguish "missing" from
/// "present but empty".
pub trait Form {
    fn form_value(&self, field: &str) -> String;
}

impl<T: Form + ?Sized> Form for &T {
    fn form_value(&self, field: &str) -> String {
        (**self).form_value(field)
    }
}

impl<S: BuildHasher> Form for HashMap<String, String, S> {
    fn form_value(&self, field: &str) -> String {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl Form for BTreeMap<String, String> {
    fn form_value(&self, field: &str) -> String {
        self.get(field).cloned().unwrap_or_default()
    }
}

/// JSON objects: strings as-is, numbers and booleans as their JSON text.
/// `null`, arrays, nested objects and non-object roots read as blank.
impl Form for serde_json::Value {
    fn form_value(&self, field: &str) -> String {
        match self.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

/// Adapter turning a closure into a `Form`.
///
/// This is how a hand-rolled model exposes its fields:
///
/// ```
/// use formspec_core::{FnForm, Form};
///
/// struct User { name: String }
///
/// let user = User { name: "toqoz".into() };
/// let form = FnForm(|field: &str| match field {
///     "name" => user.name.clone(),
///     _ => String::new(),
/// });
/// assert_eq!(form.form_value("name"), "toqoz");
/// assert_eq!(form.form_value("age"), "");
/// ```
#[derive(Clone, Copy)]
pub struct FnForm<F>(pub F);

impl<F> Form for FnForm<F>
where
    F: Fn(&str) -> String,
{
    fn form_value(&self, field: &str) -> String {
        (self.0)(field)
    }
}

/// Insertion-ordered key/value form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new();
        for (key, value) in pairs {
            data.set(key, value);
        }
        data
    }

    /// Parse an `application/x-www-form-urlencoded` string, such as a query
    /// string or a form POST body.
    pub fn from_query(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a value, keeping the key's original position
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Form for FormData {
    fn form_value(&self, field: &str) -> String {
        self.get(field).map(str::to_string).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
