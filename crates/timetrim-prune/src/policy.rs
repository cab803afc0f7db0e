//! Prune policy configuration.

use serde::{Deserialize, Serialize};

use timetrim_core::ServiceDate;

use crate::error::{PruneError, Result};

/// Earliest cutoff accepted by the default policy.
pub const DEFAULT_CUTOFF_MIN: ServiceDate = ServiceDate::from_ymd_const(2017, 1, 1);

/// Latest cutoff accepted by the default policy.
pub const DEFAULT_CUTOFF_MAX: ServiceDate = ServiceDate::from_ymd_const(2022, 1, 1);

/// Policy governing a prune.
///
/// The cutoff bounds are a sanity check on the operator's input: a cutoff
/// outside `[cutoff_min, cutoff_max]` is almost certainly a typo, and a typo
/// here deletes most of a schedule.
///
/// # Example
///
/// ```rust
/// use timetrim_core::ServiceDate;
/// use timetrim_prune::PrunePolicy;
///
/// // Use defaults
/// let policy = PrunePolicy::default();
///
/// // Or customize
/// let policy = PrunePolicy {
///     cutoff_min: ServiceDate::from_yyyymmdd(20_200_101)?,
///     cutoff_max: ServiceDate::from_yyyymmdd(20_301_231)?,
///     prune_orphans: false,
/// };
/// assert!(policy.validate().is_none());
/// # Ok::<(), timetrim_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PrunePolicy {
    /// Earliest acceptable cutoff (inclusive).
    pub cutoff_min: ServiceDate,

    /// Latest acceptable cutoff (inclusive).
    pub cutoff_max: ServiceDate,

    /// Remove routes and stops that have no trips at all, regardless of
    /// the cutoff.
    ///
    /// A route or stop with trips is removed only when every one of its
    /// trips is removed; this flag only decides the fate of entities that
    /// had zero trips to begin with.
    pub prune_orphans: bool,
}

impl Default for PrunePolicy {
    fn default() -> Self {
        Self {
            cutoff_min: DEFAULT_CUTOFF_MIN,
            cutoff_max: DEFAULT_CUTOFF_MAX,
            prune_orphans: true,
        }
    }
}

impl PrunePolicy {
    /// Creates a new policy with the specified values.
    #[must_use]
    pub const fn new(cutoff_min: ServiceDate, cutoff_max: ServiceDate, prune_orphans: bool) -> Self {
        Self {
            cutoff_min,
            cutoff_max,
            prune_orphans,
        }
    }

    /// Returns true if `cutoff` lies within the configured bounds.
    #[must_use]
    pub fn accepts(&self, cutoff: ServiceDate) -> bool {
        self.cutoff_min <= cutoff && cutoff <= self.cutoff_max
    }

    /// Validates the policy settings are reasonable.
    ///
    /// Returns an error message if validation fails.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.cutoff_min > self.cutoff_max {
            return Some(format!(
                "cutoff_min ({}) cannot be after cutoff_max ({})",
                self.cutoff_min, self.cutoff_max
            ));
        }
        None
    }

    /// Loads the policy from environment variables, starting from defaults.
    ///
    /// - `TIMETRIM_CUTOFF_MIN` (`YYYYMMDD`)
    /// - `TIMETRIM_CUTOFF_MAX` (`YYYYMMDD`)
    /// - `TIMETRIM_PRUNE_ORPHANS` (true/false/1/0/yes/no)
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if a variable is set but cannot be
    /// parsed, or the resulting policy is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the policy from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`PrunePolicy::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut policy = Self::default();
        let var = |name: &str| {
            lookup(name).and_then(|v| {
                let trimmed = v.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };

        if let Some(v) = var("TIMETRIM_CUTOFF_MIN") {
            policy.cutoff_min = parse_date("TIMETRIM_CUTOFF_MIN", &v)?;
        }
        if let Some(v) = var("TIMETRIM_CUTOFF_MAX") {
            policy.cutoff_max = parse_date("TIMETRIM_CUTOFF_MAX", &v)?;
        }
        if let Some(v) = var("TIMETRIM_PRUNE_ORPHANS") {
            policy.prune_orphans = parse_bool("TIMETRIM_PRUNE_ORPHANS", &v)?;
        }

        match policy.validate() {
            Some(message) => Err(PruneError::validation(message)),
            None => Ok(policy),
        }
    }
}

fn parse_date(name: &str, value: &str) -> Result<ServiceDate> {
    value
        .parse()
        .map_err(|e| PruneError::validation(format!("{name}: {e}")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(PruneError::validation(format!(
            "{name} must be a boolean (true/false/1/0)"
        ))),
    }
}
