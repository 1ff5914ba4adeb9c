//! Field-keyed validation errors
//!
//! Validation never fails with an exception: every broken rule attaches a
//! human-readable message to the form field it concerns, and the caller maps
//! those messages onto its inputs. Messages the caller cannot place on a
//! field (e.g. a server error for an unknown key) go to the general list.

use std::collections::BTreeMap;
use std::fmt;

/// A form field that can carry validation messages
pub trait FormField: Copy + Ord + fmt::Debug {
    /// The field's key in API request bodies and server error responses
    fn api_name(&self) -> &'static str;

    /// Resolve an API key back to a field
    fn from_api_name(name: &str) -> Option<Self>;
}

/// Validation messages grouped by field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: FormField> {
    fields: BTreeMap<F, Vec<String>>,
    general: Vec<String>,
}

impl<F: FormField> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            general: Vec::new(),
        }
    }
}

impl<F: FormField> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field
    pub fn add(&mut self, field: F, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Record a message that belongs to no particular field
    pub fn add_general(&mut self, message: impl Into<String>) {
        self.general.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    /// Total number of messages
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum::<usize>() + self.general.len()
    }

    pub fn has(&self, field: F) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn messages(&self, field: F) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn general(&self) -> &[String] {
        &self.general
    }

    /// Fields with at least one message, in field order
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.fields
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (*field, m.as_str())))
    }

    /// Move all messages of `other` into `self`
    pub fn merge(&mut self, other: FieldErrors<F>) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        self.general.extend(other.general);
    }

    /// `Ok(value)` when no message was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Map a server error body (`{"field": ["message", ..]}`) onto fields
    pub fn from_api_map<'a, I, M>(errors: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, M)>,
        M: IntoIterator<Item = String>,
    {
        let mut result = Self::new();
        for (key, messages) in errors {
            match F::from_api_name(key) {
                Some(field) => {
                    for message in messages {
                        result.add(field, message);
                    }
                }
                None => {
                    for message in messages {
                        result.add_general(format!("{}: {}", key, message));
                    }
                }
            }
        }
        result
    }
}

impl<F: FormField> fmt::Display for FieldErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.api_name(), message))
            .collect();
        parts.extend(self.general.iter().cloned());
        write!(f, "{}", parts.join("; "))
    }
}

impl<F: FormField> std::error::Error for FieldErrors<F> {}
