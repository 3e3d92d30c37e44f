mod store;
pub use store::{JsonFileStore, MemoryStore, PropertyStore};

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use aln_model::{Encoding, FormatTag, ParameterSlot, SlotRole};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::CoreError;

const EVENT_CAPACITY: usize = 64;

/// Change notification emitted by [`ParameterStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChanged {
    Slot {
        role: SlotRole,
        value: Option<PathBuf>,
    },
    Encoding(Option<Encoding>),
}

/// Owned copy of every slot value at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSnapshot {
    values: BTreeMap<SlotRole, PathBuf>,
}

impl SlotSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: SlotRole, path: impl Into<PathBuf>) -> Self {
        self.values.insert(role, path.into());
        self
    }

    pub fn get(&self, role: SlotRole) -> Option<&Path> {
        self.values.get(&role).map(PathBuf::as_path)
    }
}

/// Current value of every panel input.
///
/// Slots with a persisted key are seeded from the [`PropertyStore`] and written back on each successful selection.
/// Every change is also broadcast to subscribers.
pub struct ParameterStore {
    slots: BTreeMap<SlotRole, ParameterSlot>,
    encoding: Option<Encoding>,
    store: Arc<dyn PropertyStore>,
    events: broadcast::Sender<ParamChanged>,
}

impl ParameterStore {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        let mut slots = BTreeMap::new();
        for role in SlotRole::ALL {
            let mut slot = ParameterSlot::empty(role);
            if let Some(key) = role.persist_key()
                && let Some(saved) = store.get(key)
            {
                if slot.try_set(PathBuf::from(&saved)) {
                    debug!(%role, key, path = %saved, "slot seeded from properties");
                } else {
                    warn!(%role, key, path = %saved, "persisted value does not match slot formats; ignored");
                }
            }
            slots.insert(role, slot);
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            slots,
            encoding: None,
            store,
            events,
        }
    }

    /// Receive every future change.
    pub fn subscribe(&self) -> broadcast::Receiver<ParamChanged> {
        self.events.subscribe()
    }

    pub fn slot(&self, role: SlotRole) -> &ParameterSlot {
        &self.slots[&role]
    }

    pub fn get(&self, role: SlotRole) -> Option<&Path> {
        self.slot(role).value()
    }

    /// Select `path` for `role`.
    ///
    /// Fails with [`CoreError::UnsupportedFormat`] and keeps the old value when the file does not match the slot's formats.
    pub fn select(&mut self, role: SlotRole, path: impl Into<PathBuf>) -> Result<(), CoreError> {
        let path = path.into();
        let slot = self
            .slots
            .entry(role)
            .or_insert_with(|| ParameterSlot::empty(role));

        if !slot.try_set(path.clone()) {
            return Err(CoreError::UnsupportedFormat {
                role,
                expected: describe(slot.allowed_formats()),
                path,
            });
        }
        debug!(%role, path = %path.display(), "slot selected");

        if let Some(key) = role.persist_key() {
            let absolute = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
            if let Err(e) = self.store.set(key, &absolute.to_string_lossy()) {
                warn!(%role, key, error = %e, "failed to persist slot value");
            }
        }

        let _ = self.events.send(ParamChanged::Slot {
            role,
            value: Some(path),
        });
        Ok(())
    }

    /// Make `role` absent again. The persisted default is left untouched.
    pub fn clear(&mut self, role: SlotRole) {
        if let Some(slot) = self.slots.get_mut(&role) {
            slot.clear();
        }
        let _ = self.events.send(ParamChanged::Slot { role, value: None });
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: Option<Encoding>) {
        self.encoding = encoding;
        let _ = self.events.send(ParamChanged::Encoding(encoding));
    }

    pub fn snapshot(&self) -> SlotSnapshot {
        let values = self
            .slots
            .iter()
            .filter_map(|(role, slot)| slot.value().map(|v| (*role, v.to_path_buf())))
            .collect();
        SlotSnapshot { values }
    }
}

fn describe(formats: &[FormatTag]) -> String {
    formats
        .iter()
        .map(|f| f.description())
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(store: &Arc<MemoryStore>) -> ParameterStore {
        ParameterStore::new(Arc::clone(store) as Arc<dyn PropertyStore>)
    }

    #[test]
    fn starts_empty_without_defaults() {
        let params = fresh(&Arc::new(MemoryStore::new()));
        for role in SlotRole::ALL {
            assert!(params.get(role).is_none());
        }
        assert!(params.encoding().is_none());
        assert_eq!(params.snapshot(), SlotSnapshot::new());
    }

    #[test]
    fn persisted_default_roundtrip() {
        let store = Arc::new(MemoryStore::new());
        let mut params = fresh(&store);
        params.select(SlotRole::DbSnp, "/ref/dbsnp_138.b37.vcf").unwrap();
        assert_eq!(store.get("dbSNP").as_deref(), Some("/ref/dbsnp_138.b37.vcf"));

        let reopened = fresh(&store);
        assert_eq!(reopened.get(SlotRole::DbSnp), Some(Path::new("/ref/dbsnp_138.b37.vcf")));
    }

    #[test]
    fn read_slots_are_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut params = fresh(&store);
        params.select(SlotRole::ForwardReads, "/reads/s_R1.fastq.gz").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn relative_selection_is_persisted_absolute() {
        let store = Arc::new(MemoryStore::new());
        let mut params = fresh(&store);
        params.select(SlotRole::Mills, "mills.vcf.gz").unwrap();

        assert_eq!(params.get(SlotRole::Mills), Some(Path::new("mills.vcf.gz")));
        let saved = store.get("mills").unwrap();
        assert!(Path::new(&saved).is_absolute());
        assert!(saved.ends_with("mills.vcf.gz"));
    }

    #[test]
    fn wrong_format_is_rejected_and_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut params = fresh(&store);
        params.select(SlotRole::ReferenceGenome, "/ref/g.fasta").unwrap();

        let err = params
            .select(SlotRole::ReferenceGenome, "/ref/mills.vcf")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedFormat { role: SlotRole::ReferenceGenome, .. }
        ));
        assert_eq!(params.get(SlotRole::ReferenceGenome), Some(Path::new("/ref/g.fasta")));
        assert_eq!(store.get("reference.genome").as_deref(), Some("/ref/g.fasta"));
    }

    #[test]
    fn mismatching_default_is_discarded() {
        let store = Arc::new(MemoryStore::with_values([("phase1", "/ref/phase1.txt")]));
        let params = fresh(&store);
        assert!(params.get(SlotRole::Phase1Indels).is_none());
    }

    #[test]
    fn clear_keeps_persisted_default() {
        let store = Arc::new(MemoryStore::new());
        let mut params = fresh(&store);
        params.select(SlotRole::Mills, "/ref/mills.vcf").unwrap();
        params.clear(SlotRole::Mills);

        assert!(params.get(SlotRole::Mills).is_none());
        assert_eq!(store.get("mills").as_deref(), Some("/ref/mills.vcf"));
    }

    #[test]
    fn changes_are_broadcast() {
        let mut params = fresh(&Arc::new(MemoryStore::new()));
        let mut rx = params.subscribe();

        params.select(SlotRole::ReverseReads, "/reads/s_R2.fq").unwrap();
        params.set_encoding(Some(Encoding::Phred33));
        params.clear(SlotRole::ReverseReads);
        let _ = params.select(SlotRole::ReverseReads, "/reads/s_R2.bam");

        assert_eq!(
            rx.try_recv().unwrap(),
            ParamChanged::Slot {
                role: SlotRole::ReverseReads,
                value: Some("/reads/s_R2.fq".into())
            }
        );
        assert_eq!(rx.try_recv().unwrap(), ParamChanged::Encoding(Some(Encoding::Phred33)));
        assert_eq!(
            rx.try_recv().unwrap(),
            ParamChanged::Slot {
                role: SlotRole::ReverseReads,
                value: None
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn snapshot_copies_present_values() {
        let mut params = fresh(&Arc::new(MemoryStore::new()));
        params.select(SlotRole::ForwardReads, "/reads/s_R1.fq").unwrap();
        let snap = params.snapshot();
        params.clear(SlotRole::ForwardReads);

        assert_eq!(snap.get(SlotRole::ForwardReads), Some(Path::new("/reads/s_R1.fq")));
        assert!(snap.get(SlotRole::ReverseReads).is_none());
    }
}
