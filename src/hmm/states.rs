use std::collections::HashMap;

/// Dense ids for the tags of a model.
///
/// Ids follow the order the tags were inserted in; built from a model they
/// are lexicographic, which is what makes arg-max ties deterministic.
#[derive(Debug, Default, Clone)]
pub struct StateSet {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl StateSet {
    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    fn insert(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }
}

impl<'a> FromIterator<&'a str> for StateSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut states = Self::default();
        for name in iter {
            states.insert(name);
        }
        states
    }
}
