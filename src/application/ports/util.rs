// src/application/ports/util.rs
use uuid::Uuid;

pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;

    /// Eight lowercase hex characters.
    fn random_suffix(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }
}
