//! Enrichment coordinator.
//!
//! Runs the age, gender and nationality lookups concurrently for one name and
//! reduces their outcomes to a single success or a single failure. Each lookup
//! owns a disjoint slot; errors go to a bounded channel that is drained only
//! after every lookup has finished. The caller's record is written only when
//! all three lookups succeeded.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::lookup::{
    AgeLookup, Attribute, DemographicLookup, GenderLookup, LookupError, NationalityLookup,
    ProviderEndpoints, resolve,
};
use super::ports::JsonFetcher;
use super::{Demographics, EnrichedRecord, NameInput};

/// Number of concurrent lookups per enrichment; also the error channel bound.
pub const LOOKUP_FAN_OUT: usize = 3;

/// Failure of one enrichment call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichmentError {
    /// One of the lookups failed; the first observed failure is reported.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Every lookup reported success but a slot stayed empty.
    #[error("{attribute} lookup finished without a value")]
    Incomplete {
        /// Attribute whose slot was empty.
        attribute: Attribute,
    },
}

#[derive(Debug, Default)]
struct DemographicSlots {
    age: Option<u8>,
    gender: Option<String>,
    nationality: Option<String>,
}

impl DemographicSlots {
    fn into_demographics(self) -> Result<Demographics, EnrichmentError> {
        let incomplete = |attribute| EnrichmentError::Incomplete { attribute };
        Ok(Demographics {
            age: self.age.ok_or_else(|| incomplete(Attribute::Age))?,
            gender: self.gender.ok_or_else(|| incomplete(Attribute::Gender))?,
            nationality: self
                .nationality
                .ok_or_else(|| incomplete(Attribute::Nationality))?,
        })
    }
}

/// Domain service deriving demographics for a name.
#[derive(Clone)]
pub struct EnrichmentService {
    fetcher: Arc<dyn JsonFetcher>,
    age: AgeLookup,
    gender: GenderLookup,
    nationality: NationalityLookup,
}

impl EnrichmentService {
    /// Build a coordinator over `fetcher` querying `endpoints`.
    pub fn new(fetcher: Arc<dyn JsonFetcher>, endpoints: ProviderEndpoints) -> Self {
        let ProviderEndpoints {
            age,
            gender,
            nationality,
        } = endpoints;
        Self {
            fetcher,
            age: AgeLookup::new(age),
            gender: GenderLookup::new(gender),
            nationality: NationalityLookup::new(nationality),
        }
    }

    /// Derive age, gender and nationality for `name` and store them in
    /// `record`.
    ///
    /// All three lookups run to completion even when one fails early. On
    /// failure `record` is left exactly as it was.
    ///
    /// # Errors
    /// Returns the first lookup failure in completion order.
    pub async fn enrich(
        &self,
        name: &str,
        record: &mut EnrichedRecord,
    ) -> Result<(), EnrichmentError> {
        let mut slots = DemographicSlots::default();
        let (errors_tx, mut errors_rx) = mpsc::channel(LOOKUP_FAN_OUT);
        {
            let DemographicSlots {
                age,
                gender,
                nationality,
            } = &mut slots;
            let fetcher = self.fetcher.as_ref();
            tokio::join!(
                run_lookup(&self.age, fetcher, name, age, &errors_tx),
                run_lookup(&self.gender, fetcher, name, gender, &errors_tx),
                run_lookup(&self.nationality, fetcher, name, nationality, &errors_tx),
            );
        }
        drop(errors_tx);

        if let Some(first) = errors_rx.recv().await {
            while let Some(other) = errors_rx.recv().await {
                debug!(error = %other, "additional lookup failure suppressed");
            }
            error!(%name, error = %first, "enrichment failed");
            return Err(first.into());
        }

        let demographics = slots.into_demographics().inspect_err(|err| {
            error!(%name, error = %err, "enrichment incomplete");
        })?;
        debug!(%name, age = demographics.age, "enrichment succeeded");
        record.apply(demographics);
        Ok(())
    }

    /// Build a record from `input` and enrich it by the input's name.
    ///
    /// # Errors
    /// Same as [`EnrichmentService::enrich`].
    pub async fn enrich_input(&self, input: NameInput) -> Result<EnrichedRecord, EnrichmentError> {
        let mut record = EnrichedRecord::from_input(input);
        let name = record.name.clone();
        self.enrich(&name, &mut record).await?;
        Ok(record)
    }
}

async fn run_lookup<L>(
    lookup: &L,
    fetcher: &dyn JsonFetcher,
    name: &str,
    slot: &mut Option<L::Output>,
    errors: &mpsc::Sender<LookupError>,
) where
    L: DemographicLookup,
{
    match resolve(lookup, fetcher, name).await {
        Ok(value) => *slot = Some(value),
        Err(err) => {
            warn!(attribute = %lookup.attribute(), error = %err, "lookup failed");
            if let Err(send_err) = errors.try_send(err) {
                warn!(error = %send_err, "lookup error channel rejected failure");
            }
        }
    }
}
