//! Per-state security deposit statutes.
//!
//! The built-in table ships as an embedded CSV document and is parsed once on
//! first access. Operators can layer an override file on top of it to correct
//! or add jurisdictions without a rebuild.

mod loader;

use super::calendar::DayUnit;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::error;

const BUILTIN_TABLE: &str = include_str!("state_rules.csv");

/// Statutory deposit parameters for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRules {
    pub code: String,
    pub slug: String,
    pub name: String,
    pub statute_title: String,
    /// Days to return the full deposit when no deductions are claimed.
    pub return_deadline: u32,
    /// Days to send the itemized deduction notice.
    pub claim_deadline: u32,
    pub day_unit: DayUnit,
    pub damages_multiplier: f64,
    /// Whether a late itemization forfeits the right to deduct anything.
    pub forfeits_on_late_notice: bool,
    pub damages_description: String,
    pub additional_damages: String,
    pub max_small_claims: u32,
    pub small_claims_note: String,
}

impl StateRules {
    /// True when the statute has one window for both returning and itemizing.
    pub fn has_single_deadline(&self) -> bool {
        self.return_deadline == self.claim_deadline
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RulesLoadError {
    #[error("failed to read state rules table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid state rules CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("state rules row is missing a code or slug")]
    MissingIdentifier,
    #[error("state code {0} appears more than once")]
    DuplicateCode(String),
    #[error("state slug {0} appears more than once")]
    DuplicateSlug(String),
    #[error("{code}: claim deadline ({claim_deadline} days) is shorter than return deadline ({return_deadline} days)")]
    DeadlineOrder {
        code: String,
        return_deadline: u32,
        claim_deadline: u32,
    },
    #[error("{code}: damages multiplier must be a finite number >= 1 (found {multiplier})")]
    InvalidMultiplier { code: String, multiplier: f64 },
}

/// Immutable, indexed set of state rules.
#[derive(Debug, Clone, Default)]
pub struct RulesRegistry {
    states: Vec<StateRules>,
    by_code: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

impl RulesRegistry {
    /// Registry backed by the embedded table, parsed on first use.
    pub fn builtin() -> &'static RulesRegistry {
        static BUILTIN: OnceLock<RulesRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| match Self::from_reader(BUILTIN_TABLE.as_bytes()) {
            Ok(registry) => registry,
            Err(err) => {
                error!(%err, "built-in state rules table failed to load");
                RulesRegistry::default()
            }
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RulesLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RulesLoadError> {
        let states = loader::parse_rules(reader)?;
        Self::from_states(states)
    }

    /// Validate and index a set of rules. Order of the result is by state name.
    pub fn from_states(mut states: Vec<StateRules>) -> Result<Self, RulesLoadError> {
        for rules in &states {
            validate(rules)?;
        }

        states.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));

        let mut by_code = HashMap::with_capacity(states.len());
        let mut by_slug = HashMap::with_capacity(states.len());
        for (index, rules) in states.iter().enumerate() {
            if by_code.insert(rules.code.clone(), index).is_some() {
                return Err(RulesLoadError::DuplicateCode(rules.code.clone()));
            }
            if by_slug.insert(rules.slug.clone(), index).is_some() {
                return Err(RulesLoadError::DuplicateSlug(rules.slug.clone()));
            }
        }

        Ok(Self {
            states,
            by_code,
            by_slug,
        })
    }

    /// Replace (by code) or add the jurisdictions found in `reader`.
    pub fn with_overrides<R: Read>(&self, reader: R) -> Result<Self, RulesLoadError> {
        let overrides = Self::from_reader(reader)?;
        let replaced: HashSet<&str> = overrides.states.iter().map(|s| s.code.as_str()).collect();

        let merged = self
            .states
            .iter()
            .filter(|rules| !replaced.contains(rules.code.as_str()))
            .cloned()
            .chain(overrides.states.iter().cloned())
            .collect();

        Self::from_states(merged)
    }

    pub fn with_overrides_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Self, RulesLoadError> {
        let file = std::fs::File::open(path)?;
        self.with_overrides(file)
    }

    pub fn by_code(&self, code: &str) -> Option<&StateRules> {
        let key = code.trim().to_ascii_uppercase();
        self.by_code.get(&key).map(|&index| &self.states[index])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&StateRules> {
        let key = slug.trim().to_ascii_lowercase();
        self.by_slug.get(&key).map(|&index| &self.states[index])
    }

    /// All jurisdictions, alphabetical by name.
    pub fn all(&self) -> &[StateRules] {
        &self.states
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.states.iter().map(|rules| rules.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn validate(rules: &StateRules) -> Result<(), RulesLoadError> {
    if rules.code.is_empty() || rules.slug.is_empty() {
        return Err(RulesLoadError::MissingIdentifier);
    }

    if rules.claim_deadline < rules.return_deadline {
        return Err(RulesLoadError::DeadlineOrder {
            code: rules.code.clone(),
            return_deadline: rules.return_deadline,
            claim_deadline: rules.claim_deadline,
        });
    }

    if !rules.damages_multiplier.is_finite() || rules.damages_multiplier < 1.0 {
        return Err(RulesLoadError::InvalidMultiplier {
            code: rules.code.clone(),
            multiplier: rules.damages_multiplier,
        });
    }

    Ok(())
}

pub fn get_state_rules_by_code(code: &str) -> Option<&'static StateRules> {
    RulesRegistry::builtin().by_code(code)
}

pub fn get_state_rules_by_slug(slug: &str) -> Option<&'static StateRules> {
    RulesRegistry::builtin().by_slug(slug)
}

pub fn get_all_states() -> &'static [StateRules] {
    RulesRegistry::builtin().all()
}

pub fn get_all_state_slugs() -> Vec<&'static str> {
    RulesRegistry::builtin().slugs()
}
