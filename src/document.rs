use std::io;

/// The parsed form of one input: its sections in order of appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) source_name: String,
    pub(crate) sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub(crate) name: String,
    pub(crate) pairs: Vec<KeyValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyValue {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Document {
    pub(crate) fn new<S: Into<String>>(source_name: S) -> Self {
        Self {
            source_name: source_name.into(),
            sections: Vec::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections, counting repeated names separately
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First section called `name`
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Value of the last `key` in any section called `section`
    pub fn lookup_last(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .filter(|s| s.name == section)
            .find_map(|s| s.lookup_last(key))
    }

    /// Writes the document back in `[section]` / `key=value` form.
    ///
    /// A leading section without a name is written without a header. Values
    /// containing a newline and keys containing `=` can't be read back as-is.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 || !section.name.is_empty() {
                writeln!(writer, "[{}]", section.name)?;
            }
            for pair in &section.pairs {
                writeln!(writer, "{}={}", pair.key, pair.value)?;
            }
        }

        Ok(())
    }
}

impl Section {
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, pair: KeyValue) {
        self.pairs.push(pair)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pairs(&self) -> &[KeyValue] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All values for `key`, in order of appearance
    pub fn lookup_all<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.pairs
            .iter()
            .filter(move |p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn lookup_last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

impl KeyValue {
    pub(crate) fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
