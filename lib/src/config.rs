//! Hierarchical settings for the library and its tools.
//!
//! A setting is addressed by a *path* of section names ending in a value name,
//! for example `&["db", "sqlite", "db-path"]`.  Paths are case-insensitive and
//! every value is a string until read through a [`ValueRef`], which parses and
//! validates it.
//!
//! These are process settings, read at startup.  Settings stored in the
//! database are [`ConfigVariable`](crate::model::ConfigVariable)s.

pub mod parse;
pub mod validate;

pub trait ValueParser<T>: std::fmt::Debug {
    fn parse(&self, value: &str) -> Result<T, String>;
}

pub trait ValueValidator<T>: std::fmt::Debug {
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Everything needed to read a setting.
#[derive(Clone, Copy, Debug)]
pub struct ValueRef<'a, T> {
    pub names: &'a [&'a str],
    /// Used when no source has a value at the path.
    pub def: &'a str,
    pub type_: &'a dyn ValueParser<T>,
    pub validators: &'a [&'a dyn ValueValidator<T>],
}

/// A source of settings.
pub trait Config: std::fmt::Debug {
    /// The raw value at the path given by `names`, if this source has one.
    fn get(&self, names: &[&str]) -> Option<&str>;
}

/// Read a setting using a [reference](ValueRef).
pub fn get_ref<C, T>(config: &C, vref: &ValueRef<T>) -> Result<T, String>
where
    C: Config + ?Sized,
{
    let raw = config.get(vref.names).unwrap_or(vref.def);
    let path = vref.names.join(".");
    let parsed = vref.type_.parse(raw)
        .map_err(|e| format!("{path}: {e}"))?;
    for val in vref.validators {
        val.validate(&parsed)
            .map_err(|e| format!("{path}: {e}"))?;
    }
    Ok(parsed)
}

/// Settings held in memory as nested sections.
///
/// A value and a section may not exist at the same path.
pub mod map {
    use std::collections::HashMap;

    /// A value or a section.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Entry {
        Value(String),
        Section(HashMap<String, Entry>),
    }

    impl Entry {
        fn get(&self, names: &[&str]) -> Option<&str> {
            match (names.split_first(), self) {
                (None, Entry::Value(value)) => Some(value.as_str()),
                (Some((first, rest)), Entry::Section(section)) => section
                    .get(&first.to_lowercase())
                    .and_then(|entry| entry.get(rest)),
                _ => None,
            }
        }

        /// Copy with every key lowercased.
        fn normalise(&self) -> Entry {
            match self {
                Entry::Value(v) => Entry::Value(v.to_owned()),
                Entry::Section(m) => Entry::Section(m.iter()
                    .map(|(k, v)| (k.to_lowercase(), v.normalise()))
                    .collect()),
            }
        }
    }

    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        root: Entry,
    }

    impl super::Config for Config {
        fn get(&self, names: &[&str]) -> Option<&str> {
            self.root.get(names)
        }
    }

    /// Construct a config from the top-level section.
    pub fn new(cfg: HashMap<String, Entry>) -> Config {
        Config { root: Entry::Section(cfg).normalise() }
    }
}

/// Settings taken from the process environment.
///
/// - Values are captured at construction.
/// - Only variables starting with the prefix are kept.
/// - Path names are uppercased and joined with `_`; `-` in a name matches `_`.
/// - Variables that are not valid unicode are ignored.
pub mod env {
    use std::collections::HashMap;

    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        prefix: String,
        env: HashMap<String, String>,
    }

    impl Config {
        fn var_name(&self, names: &[&str]) -> String {
            let mapped: Vec<String> = names.iter()
                .map(|name| name.to_ascii_uppercase().replace('-', "_"))
                .collect();
            format!("{}{}", self.prefix, mapped.join("_"))
        }
    }

    impl super::Config for Config {
        fn get(&self, names: &[&str]) -> Option<&str> {
            self.env.get(&self.var_name(names)).map(String::as_str)
        }
    }

    /// Construct a config from the given variables.
    pub fn from_vars<I>(prefix: &str, vars: I) -> Config
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = vars.into_iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .collect();
        Config { prefix: prefix.to_owned(), env }
    }

    /// Construct a config from the current process environment.
    pub fn new(prefix: &str) -> Config {
        from_vars(prefix, std::env::vars_os().filter_map(|(name, val)| {
            Some((name.into_string().ok()?, val.into_string().ok()?))
        }))
    }
}

/// Settings read from a YAML file.
///
/// When several keys in the file differ only by case, which one wins is
/// unspecified.
pub mod file {
    use std::{fs::File, path::Path};
    use serde_yaml::Value;
    use super::map::{self, Entry};

    fn entry(value: &Value) -> Entry {
        match value {
            Value::Null | Value::Tagged(_) => Entry::Value("".to_owned()),
            Value::Bool(b) => Entry::Value(b.to_string()),
            Value::Number(n) => Entry::Value(n.to_string()),
            Value::String(s) => Entry::Value(s.to_owned()),
            Value::Sequence(s) => Entry::Section(s.iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), entry(v)))
                .collect()),
            Value::Mapping(m) => Entry::Section(m.iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_owned(), entry(v))))
                .collect()),
        }
    }

    /// `None` unless the document is a mapping.
    fn top_level(value: &Value) -> Option<map::Config> {
        match (value, entry(value)) {
            (Value::Mapping(_), Entry::Section(e)) => Some(map::new(e)),
            _ => None,
        }
    }

    /// Construct a config from YAML text.
    pub fn parse(text: &str) -> Result<map::Config, String> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| format!("error parsing config: {e}"))?;
        top_level(&value)
            .ok_or("invalid config: top-level must be a map".to_owned())
    }

    /// Construct a config from a YAML file.
    pub fn new<P>(path: P) -> Result<map::Config, String>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("error opening file ({}): {e}",
                                 path.display()))?;
        let value: Value = serde_yaml::from_reader(file)
            .map_err(|e| format!("error loading config from file ({}): {e}",
                                 path.display()))?;
        top_level(&value)
            .ok_or(format!("invalid config file ({}): top-level must be a map",
                           path.display()))
    }
}

/// Several sources consulted in order; the first with a value wins.
pub mod layered {
    #[derive(Debug, Default)]
    pub struct Config {
        layers: Vec<Box<dyn super::Config>>,
    }

    impl Config {
        /// Add a source consulted after all existing ones.
        pub fn with(mut self, layer: impl super::Config + 'static) -> Config {
            self.layers.push(Box::new(layer));
            self
        }
    }

    impl super::Config for Config {
        fn get(&self, names: &[&str]) -> Option<&str> {
            self.layers.iter().find_map(|layer| layer.get(names))
        }
    }
}
