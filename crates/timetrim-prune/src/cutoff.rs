//! Cutoff evaluation: which service periods have expired.

use std::collections::BTreeSet;

use timetrim_core::{ServiceDate, ServiceId, ServicePeriod};

use crate::error::{PruneError, Result};
use crate::policy::PrunePolicy;

/// Decides which service periods are expired relative to a cutoff.
///
/// A period is expired iff its `end_date` is strictly before the cutoff; a
/// period ending on the cutoff date itself still runs that day and is kept.
#[derive(Debug, Clone, Copy)]
pub struct CutoffEvaluator {
    min: ServiceDate,
    max: ServiceDate,
}

impl CutoffEvaluator {
    /// Creates an evaluator enforcing the policy's cutoff bounds.
    #[must_use]
    pub fn new(policy: &PrunePolicy) -> Self {
        Self {
            min: policy.cutoff_min,
            max: policy.cutoff_max,
        }
    }

    /// Checks that `cutoff` lies within the configured bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if the cutoff is out of range.
    pub fn validate(&self, cutoff: ServiceDate) -> Result<ServiceDate> {
        if cutoff < self.min || cutoff > self.max {
            return Err(PruneError::validation(format!(
                "cutoff {cutoff} must be in the format YYYYMMDD and {} <= cutoff <= {}",
                self.min, self.max
            )));
        }
        Ok(cutoff)
    }

    /// Parses and validates a `YYYYMMDD` cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if the text is not a calendar date
    /// or the date is out of range.
    pub fn parse_cutoff(&self, text: &str) -> Result<ServiceDate> {
        let cutoff = text
            .parse::<ServiceDate>()
            .map_err(|e| PruneError::validation(format!("cutoff: {e}")))?;
        self.validate(cutoff)
    }

    /// Returns the ids of every service period that ends before `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if the cutoff is out of range. No
    /// period is inspected in that case.
    pub fn compute_expired_services<'a>(
        &self,
        service_periods: impl IntoIterator<Item = &'a ServicePeriod>,
        cutoff: ServiceDate,
    ) -> Result<BTreeSet<ServiceId>> {
        let cutoff = self.validate(cutoff)?;
        let expired: BTreeSet<_> = service_periods
            .into_iter()
            .filter(|period| is_expired(period, cutoff))
            .map(|period| period.id.clone())
            .collect();
        tracing::debug!(%cutoff, expired = expired.len(), "evaluated service periods");
        Ok(expired)
    }
}

/// Returns true if `period` ends strictly before `cutoff`.
#[must_use]
pub fn is_expired(period: &ServicePeriod, cutoff: ServiceDate) -> bool {
    period.end_date < cutoff
}
