//! # Tag Registry
//!
//! Maps 4-character tags to generator factories.
//!
//! Wrapped generators are stored as tagged records, so reading one means
//! looking up its tag, building a default instance, and letting that instance
//! read the rest of the record. The registry does the lookup.
//!
//! ## Sharing
//!
//! [`NoiseRegistry::global`] is a process-wide instance with every built-in
//! generator registered. Callers that need isolation (extra generators,
//! tests) build their own with [`NoiseRegistry::with_defaults`] and pass it
//! to [`crate::Noise::string_deserialize_with`].
//!
//! Lookups take a read lock, registration takes a write lock. The lock is
//! never held while a nested record is being read.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

use crate::error::{NoiseError, NoiseResult};
use crate::flan::FlanNoise;
use crate::foamplex::FoamplexNoise;
use crate::honey::HoneyNoise;
use crate::noise::Noise;
use crate::primitive_noise::{SimplexNoise, ValueNoise};
use crate::serial::{self, Cursor, FIELD_SEPARATOR, RECORD_DELIMITER, TAG_LEN};
use crate::tooth::ToothNoise;
use crate::wrapper::{NoiseWrapper, RadialNoiseWrapper};

/// Builds a default-configured generator.
pub type NoiseFactory = fn() -> Box<dyn Noise>;

/// Tag → factory table.
pub struct NoiseRegistry {
    factories: parking_lot::RwLock<HashMap<String, NoiseFactory>>,
}

impl NoiseRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: parking_lot::RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding every built-in generator.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        let defaults: [(&str, NoiseFactory); 8] = [
            (HoneyNoise::TAG, || Box::<HoneyNoise>::default()),
            (FoamplexNoise::TAG, || Box::<FoamplexNoise>::default()),
            (FlanNoise::TAG, || Box::<FlanNoise>::default()),
            (ToothNoise::TAG, || Box::new(ToothNoise)),
            (SimplexNoise::TAG, || Box::<SimplexNoise>::default()),
            (ValueNoise::TAG, || Box::<ValueNoise>::default()),
            (NoiseWrapper::TAG, || Box::<NoiseWrapper>::default()),
            (RadialNoiseWrapper::TAG, || Box::<RadialNoiseWrapper>::default()),
        ];
        {
            let mut factories = registry.factories.write();
            for (tag, factory) in defaults {
                factories.insert(tag.to_owned(), factory);
            }
        }
        registry
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<NoiseRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_defaults)
    }

    /// Registers `factory` under `tag`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidValue`] if `tag` is not exactly 4 bytes
    /// or contains a record delimiter.
    pub fn register(&self, tag: &str, factory: NoiseFactory) -> NoiseResult<()> {
        if tag.len() != TAG_LEN || tag.contains([FIELD_SEPARATOR, RECORD_DELIMITER]) {
            return Err(NoiseError::InvalidValue {
                field: "tag",
                value: tag.to_owned(),
            });
        }
        let previous = self.factories.write().insert(tag.to_owned(), factory);
        if previous.is_some() {
            tracing::warn!(tag, "noise factory replaced");
        } else {
            tracing::debug!(tag, "noise factory registered");
        }
        Ok(())
    }

    /// Whether `tag` has a factory.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.read().contains_key(tag)
    }

    /// All registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.factories.read().keys().cloned().collect();
        tags.sort_unstable();
        tags
    }

    /// Builds a default-configured generator for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownTag`] if nothing is registered.
    pub fn create(&self, tag: &str) -> NoiseResult<Box<dyn Noise>> {
        let factory = self
            .factories
            .read()
            .get(tag)
            .copied()
            .ok_or_else(|| NoiseError::UnknownTag(tag.to_owned()))?;
        Ok(factory())
    }

    /// Like [`NoiseRegistry::create`], then applies `seed` if the generator
    /// uses one.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownTag`] if nothing is registered.
    pub fn create_with_seed(&self, tag: &str, seed: i64) -> NoiseResult<Box<dyn Noise>> {
        let mut noise = self.create(tag)?;
        if noise.can_use_seed() {
            noise.set_seed(seed);
        }
        Ok(noise)
    }

    /// Reads `TAG` followed by that generator's record.
    ///
    /// On success the cursor sits just past the record's closing backtick.
    ///
    /// # Errors
    ///
    /// Fails on a short or unknown tag, nesting past
    /// [`crate::serial::MAX_NESTING`], or any error in the record itself.
    pub fn read_tagged(&self, cursor: &mut Cursor<'_>) -> NoiseResult<Box<dyn Noise>> {
        cursor.descend()?;
        let result = self.read_tagged_body(cursor);
        cursor.ascend();
        result
    }

    fn read_tagged_body(&self, cursor: &mut Cursor<'_>) -> NoiseResult<Box<dyn Noise>> {
        let tag = cursor.tag()?;
        let mut noise = self.create(tag)?;
        noise.read_record(cursor, self)?;
        Ok(noise)
    }

    /// Writes `noise` as a tagged record: `TAG` then its record.
    #[must_use]
    pub fn serialize(noise: &dyn Noise) -> String {
        let mut out = String::new();
        serial::write_tagged(noise, &mut out);
        out
    }

    /// Reads a complete tagged record written by [`NoiseRegistry::serialize`].
    ///
    /// # Errors
    ///
    /// Fails on empty input, any malformed record, or trailing text.
    pub fn deserialize(&self, text: &str) -> NoiseResult<Box<dyn Noise>> {
        let result = if text.is_empty() {
            Err(NoiseError::Empty)
        } else {
            let mut cursor = Cursor::new(text);
            self.read_tagged(&mut cursor)
                .and_then(|noise| cursor.finish().map(|()| noise))
        };
        if let Err(err) = &result {
            tracing::debug!(%err, "failed to deserialize noise");
        }
        result
    }

    /// Byte span of the tagged record starting at `start`.
    ///
    /// The span covers the tag and the record up to and including its
    /// closing backtick, however deeply it nests.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not a character boundary of `text` or no valid
    /// tagged record starts there.
    pub fn record_span(&self, text: &str, start: usize) -> NoiseResult<Range<usize>> {
        if !text.is_char_boundary(start) {
            return Err(NoiseError::TruncatedTag { position: start });
        }
        let mut cursor = Cursor::at(text, start);
        self.read_tagged(&mut cursor)?;
        Ok(start..cursor.position())
    }
}

impl Default for NoiseRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for NoiseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
