// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;

/// Transliterates to ASCII, lowercases and joins words with single hyphens.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slug::slugify(input)
    }
}
