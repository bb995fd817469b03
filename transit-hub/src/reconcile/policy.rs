//! Output-mapping policy selected per outbound request.

/// How identifiers in an outbound query/response are mapped.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MappingPolicy {
    /// Keep the provider's original ids. Meaningless without a dataset
    /// scope; requests lacking one resolve to an empty result.
    OriginalId,
    /// Map through the per-dataset alternate-id table.
    AltId,
    /// Map through the canonical stop registry: dataset-agnostic on the
    /// forward path, dataset-scoped on reverse.
    #[default]
    Canonical,
}
