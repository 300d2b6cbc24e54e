use std::{collections::HashMap, env, path::Path};

/// A read-only key → string lookup the binder pulls raw values from
pub trait Source {
    /// `Some` when the key is present, even if its value is empty
    fn lookup(&self, key: &str) -> Option<String>;

    /// Falls back to `fallback` for keys this source doesn't have
    fn or<S: Source>(self, fallback: S) -> Layered<Self, S>
    where
        Self: Sized,
    {
        Layered {
            primary: self,
            fallback,
        }
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values still count as present
        env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

/// An in-memory set of variables
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl Source for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Variables read from a `.env` file without touching the process environment
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    vars: MapSource,
}

impl DotenvSource {
    pub fn from_path(path: impl AsRef<Path>) -> dotenvy::Result<Self> {
        let mut vars = MapSource::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        tracing::debug!(path = %path.as_ref().display(), "read dotenv file");
        Ok(Self { vars })
    }
}

impl Source for DotenvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.lookup(key)
    }
}

/// Two sources, the first taking priority; built with [`Source::or`]
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A: Source, B: Source> Source for Layered<A, B> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.primary
            .lookup(key)
            .or_else(|| self.fallback.lookup(key))
    }
}
