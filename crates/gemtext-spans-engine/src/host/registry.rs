use std::collections::BTreeMap;

/// Maps fence language tags to host-provided handlers.
///
/// Lookups are ASCII case-insensitive and never fail: an absent or unknown
/// tag resolves to the fallback handler.
#[derive(Debug, Clone)]
pub struct HandlerRegistry<H> {
    handlers: BTreeMap<String, H>,
    aliases: BTreeMap<String, String>,
    fallback: H,
}

impl<H> HandlerRegistry<H> {
    pub fn new(fallback: H) -> Self {
        Self {
            handlers: BTreeMap::new(),
            aliases: BTreeMap::new(),
            fallback,
        }
    }

    pub fn register(&mut self, tag: &str, handler: H) -> &mut Self {
        self.handlers.insert(tag.to_ascii_lowercase(), handler);
        self
    }

    /// Makes `alias` resolve like `tag`.
    pub fn alias(&mut self, alias: &str, tag: &str) -> &mut Self {
        self.aliases
            .insert(alias.to_ascii_lowercase(), tag.to_ascii_lowercase());
        self
    }

    pub fn aliases<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> &mut Self {
        for (alias, tag) in pairs {
            self.alias(alias, tag);
        }
        self
    }

    /// The handler registered for `tag`, following one level of aliasing.
    pub fn get(&self, tag: &str) -> Option<&H> {
        let tag = tag.to_ascii_lowercase();
        self.handlers.get(&tag).or_else(|| {
            self.aliases
                .get(&tag)
                .and_then(|target| self.handlers.get(target))
        })
    }

    pub fn resolve(&self, tag: Option<&str>) -> &H {
        tag.and_then(|tag| self.get(tag)).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &H {
        &self.fallback
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}
