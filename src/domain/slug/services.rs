// src/domain/slug/services.rs
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::resource::ResourceKind;
use crate::domain::slug::{Disambiguator, Slug, SlugPolicy, SlugRepository, SlugRules};

/// Domain service producing unique slugs for every sluggable resource kind.
pub struct SlugAssigner {
    repo: Arc<dyn SlugRepository>,
    generator: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl SlugAssigner {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    pub fn new(
        repo: Arc<dyn SlugRepository>,
        generator: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            generator,
            clock,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Bare base slug when free, otherwise a disambiguated candidate.
    pub async fn assign(
        &self,
        kind: ResourceKind,
        title: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let rules = rules_for(kind)?;
        let base = self.base_slug(title)?;
        let candidate = Slug::new(base.clone())?;
        if !self.repo.slug_exists(kind, &candidate, exclude_id).await? {
            return Ok(candidate);
        }
        debug!(%kind, slug = %candidate, "base slug taken, disambiguating");
        self.disambiguate(kind, rules, &base, exclude_id).await
    }

    /// Skips the bare candidate. Used after the store rejected an insert on its unique index.
    pub async fn assign_disambiguated(
        &self,
        kind: ResourceKind,
        title: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let rules = rules_for(kind)?;
        let base = self.base_slug(title)?;
        self.disambiguate(kind, rules, &base, exclude_id).await
    }

    /// New slug for an edited record, or `None` when the current one stays.
    pub async fn reassign_on_update(
        &self,
        kind: ResourceKind,
        current_title: &str,
        new_title: Option<&str>,
        id: i64,
    ) -> DomainResult<Option<Slug>> {
        let rules = rules_for(kind)?;
        let Some(new_title) = new_title else {
            return Ok(None);
        };
        if rules.policy == SlugPolicy::Immutable || new_title == current_title {
            return Ok(None);
        }
        self.assign(kind, new_title, Some(id)).await.map(Some)
    }

    fn base_slug(&self, title: &str) -> DomainResult<String> {
        let base = self.generator.slugify(title);
        if base.is_empty() {
            return Err(DomainError::invalid(
                "title",
                "title must contain at least one letter or digit",
            ));
        }
        Ok(base)
    }

    async fn disambiguate(
        &self,
        kind: ResourceKind,
        rules: SlugRules,
        base: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        for attempt in 1..=self.max_attempts {
            let candidate = Slug::new(format!(
                "{base}-{}",
                self.suffix(rules.disambiguator, attempt)
            ))?;
            if !self.repo.slug_exists(kind, &candidate, exclude_id).await? {
                return Ok(candidate);
            }
            debug!(%kind, slug = %candidate, attempt, "disambiguated slug taken");
        }
        Err(DomainError::Generation(format!(
            "no free {} slug for '{base}' after {} attempts",
            kind.profile().label,
            self.max_attempts
        )))
    }

    fn suffix(&self, disambiguator: Disambiguator, attempt: u32) -> String {
        match disambiguator {
            Disambiguator::RandomSuffix => self.generator.random_suffix(),
            Disambiguator::Timestamp => {
                let stamp = self.clock.now().format("%Y%m%d-%H%M%S");
                if attempt == 1 {
                    stamp.to_string()
                } else {
                    format!("{stamp}-{attempt}")
                }
            }
        }
    }
}

fn rules_for(kind: ResourceKind) -> DomainResult<SlugRules> {
    kind.profile().slug.ok_or_else(|| {
        DomainError::Validation(format!("{} records do not carry slugs", kind.profile().label))
    })
}
