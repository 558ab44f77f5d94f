//! Id-to-name joins used when a table shows foreign references.

use std::collections::HashMap;

use crate::resource::Named;

/// Maps record ids to display names for one fetched collection.
#[derive(Debug, Default)]
pub struct NameLookup<'a> {
    names: HashMap<&'a str, &'a str>,
}

impl<'a> NameLookup<'a> {
    pub fn from_records<R: Named>(records: &'a [R]) -> Self {
        let names = records.iter().map(|r| (r.id(), r.name())).collect();
        Self { names }
    }

    /// Name for `id`, or `id` itself when unknown or unnamed.
    pub fn resolve<'b>(&'b self, id: &'b str) -> &'b str {
        match self.names.get(id) {
            Some(name) if !name.is_empty() => *name,
            _ => id,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
