//! Field registry
//!
//! Every name a pattern may reference is listed in [`FIELDS`] together with
//! its kind and an accessor. Lookup never inspects the record dynamically, so
//! the set of valid names can be enumerated (e.g. for editor completion).

use chrono::NaiveDate;

use crate::types::Metadata;

/// How a field's value is formatted and which modifiers it accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain text
    Text,
    /// Optional non-negative integer
    Number,
    /// Optional calendar date
    Date,
    /// Ordered list of strings
    List,
}

/// A value resolved from a record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Text, possibly empty
    Text(String),
    /// Number, `None` when the record has none
    Number(Option<u64>),
    /// Date, `None` when the record has none
    Date(Option<NaiveDate>),
    /// List of strings in record order
    List(Vec<String>),
}

impl FieldValue {
    /// Kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::List(_) => FieldKind::List,
        }
    }

    /// Whether the value renders as an empty string without a modifier
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Number(n) => n.is_none(),
            FieldValue::Date(d) => d.is_none(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

/// A registered field
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// Name as written in patterns
    pub name: &'static str,
    /// Kind of the resolved value
    pub kind: FieldKind,
    /// Short description for help texts
    pub description: &'static str,
    accessor: fn(&Metadata) -> FieldValue,
}

impl FieldDef {
    /// Resolve this field against a record
    pub fn resolve(&self, record: &Metadata) -> FieldValue {
        (self.accessor)(record)
    }
}

impl std::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// All fields patterns can reference
pub static FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "artists",
        kind: FieldKind::List,
        description: "all artists, joined with the modifier",
        accessor: |m| FieldValue::List(m.artists().to_vec()),
    },
    FieldDef {
        name: "artist",
        kind: FieldKind::Text,
        description: "artists joined naturally (A, B & C)",
        accessor: |m| FieldValue::Text(m.artist_credit()),
    },
    FieldDef {
        name: "artistsTitle",
        kind: FieldKind::Text,
        description: "artist credit followed by the title",
        accessor: |m| FieldValue::Text(m.artists_title()),
    },
    FieldDef {
        name: "title",
        kind: FieldKind::Text,
        description: "title",
        accessor: |m| FieldValue::Text(m.title().to_string()),
    },
    FieldDef {
        name: "titleRaw",
        kind: FieldKind::Text,
        description: "title without bracketed sections",
        accessor: |m| FieldValue::Text(m.title_parts().raw),
    },
    FieldDef {
        name: "feat",
        kind: FieldKind::Text,
        description: "featured artists",
        accessor: |m| FieldValue::Text(m.title_parts().feat),
    },
    FieldDef {
        name: "remix",
        kind: FieldKind::Text,
        description: "remix section of the title",
        accessor: |m| FieldValue::Text(m.title_parts().remix),
    },
    FieldDef {
        name: "album",
        kind: FieldKind::Text,
        description: "album",
        accessor: |m| FieldValue::Text(m.album().to_string()),
    },
    FieldDef {
        name: "track",
        kind: FieldKind::Number,
        description: "track number, modifier pads with zeros",
        accessor: |m| FieldValue::Number(m.track().map(u64::from)),
    },
    FieldDef {
        name: "trackCount",
        kind: FieldKind::Number,
        description: "number of tracks on the release",
        accessor: |m| FieldValue::Number(m.track_count().map(u64::from)),
    },
    FieldDef {
        name: "releaseType",
        kind: FieldKind::Text,
        description: "release type",
        accessor: |m| FieldValue::Text(m.release_type().display_name().to_string()),
    },
    FieldDef {
        name: "type",
        kind: FieldKind::Text,
        description: "release type",
        accessor: |m| FieldValue::Text(m.release_type().display_name().to_string()),
    },
    FieldDef {
        name: "catalogId",
        kind: FieldKind::Text,
        description: "catalog id",
        accessor: |m| FieldValue::Text(m.catalog_id().to_string()),
    },
    FieldDef {
        name: "releaseDate",
        kind: FieldKind::Date,
        description: "release date, modifier is a strftime format",
        accessor: |m| FieldValue::Date(m.release_date()),
    },
];

/// Find a registered field by name
pub fn field(name: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|def| def.name == name)
}

/// Names of all registered fields, in registry order
pub fn field_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|def| def.name)
}

impl Metadata {
    /// Look a field up by name
    ///
    /// Returns `None` for names that are not registered. A registered field
    /// whose value is empty returns `Some` with an empty value.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_dl::Metadata;
    /// use catalog_dl::template::fields::FieldValue;
    ///
    /// let record = Metadata::new(["Rogue"], "Unity");
    /// assert_eq!(record.lookup("album"), Some(FieldValue::Text(String::new())));
    /// assert_eq!(record.lookup("nope"), None);
    /// ```
    pub fn lookup(&self, name: &str) -> Option<FieldValue> {
        field(name).map(|def| def.resolve(self))
    }
}
